use content_tree_core::{
    BuildOptions, RenderOptions, TextFlattener, XmlRenderer, from_body_xml, to_body_xml,
};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::io::{self, Write};

// A dummy writer that discards data, similar to /dev/null
struct NullWriter;
impl Write for NullWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn generate_large_body_xml() -> String {
    let mut s = String::with_capacity(1_000_000);
    s.push_str("<body><h1>Benchmark Document</h1>");
    for i in 0..5_000 {
        s.push_str(&format!(
            "<p>Paragraph {i} with <strong>bold</strong> and <a href=\"https://www.ft.com/content/id-{i}\">a link</a>.</p>"
        ));
        s.push_str("<ul><li>List item</li><li><p>Nested <em>emphasis</em></p></li></ul>");
        if i % 100 == 0 {
            s.push_str(&format!(
                "<ft-content type=\"http://www.ft.com/ontology/content/ImageSet\" url=\"http://api.ft.com/content/img-{i}\" data-embedded=\"true\"></ft-content>"
            ));
        }
    }
    s.push_str("</body>");
    s
}

fn benchmark_conversions(c: &mut Criterion) {
    let input = generate_large_body_xml();
    let root = from_body_xml(&input, BuildOptions::strict()).unwrap();
    let mut group = c.benchmark_group("conversion_throughput");

    // Calculate throughput in bytes per second
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("build_tree", |b| {
        b.iter(|| from_body_xml(black_box(&input), BuildOptions::strict()).unwrap())
    });

    // Streaming straight into the writer, no intermediate String
    group.bench_function("render_streaming", |b| {
        b.iter(|| {
            XmlRenderer::new(NullWriter, RenderOptions::default())
                .render(black_box(&root))
                .unwrap()
        })
    });

    group.bench_function("render_buffered", |b| {
        b.iter(|| {
            let markup = to_body_xml(black_box(&root), RenderOptions::default()).unwrap();
            let mut writer = NullWriter;
            writer.write_all(markup.as_bytes()).unwrap();
        })
    });

    let flattener = TextFlattener::new();
    group.bench_function("flatten_text", |b| {
        b.iter(|| flattener.flatten(black_box(&root)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, benchmark_conversions);
criterion_main!(benches);
