use content_tree_core::tree::BodyBlock;
use content_tree_core::{
    BuildOptions, LegacyRewriteOptions, LinkDialect, RenderOptions, Root, TreeError, TreeVariant,
    from_body_xml, rewrite_legacy_markup, to_body_xml, to_text,
};
use pretty_assertions::assert_eq;

const BLOCKS: &[&str] = &[
    "<h1>Markets</h1>",
    r#"<h2 id="outlook">Outlook</h2>"#,
    r#"<p>Shares <strong>rose</strong>, <em>sharply</em> &amp; <s>briefly</s> fell.<br/>Then <a href="https://example.com/x" title="Ex">recovered</a>.</p>"#,
    "<ul><li>one</li><li><p>two</p></li></ul>",
    "<blockquote><p>Quoted</p></blockquote>",
    "<pull-quote><pull-quote-text><p>Words</p></pull-quote-text><pull-quote-source>Speaker</pull-quote-source></pull-quote>",
    "<big-number><big-number-headline>42%</big-number-headline><big-number-intro>of respondents</big-number-intro></big-number>",
    r#"<ft-content type="http://www.ft.com/ontology/content/ImageSet" url="http://api.ft.com/content/img-1" data-embedded="true"></ft-content>"#,
    r#"<ft-content type="http://www.ft.com/ontology/content/Video" url="http://api.ft.com/content/vid-1" data-embedded="true"></ft-content>"#,
    "<hr/>",
    r#"<div class="n-content-layout" data-layout-name="card" data-layout-width="full-width"><div class="n-content-layout__container"><h2>Card</h2><img src="https://example.com/a.jpg" alt="A" longdesc="Caption" data-copyright="Credit"/><div class="n-content-layout__slot"><p>Slot copy</p></div></div></div>"#,
    r#"<table class="data-table" data-table-stripes="true" data-table-compact="false" data-table-layout-width="auto" data-table-collapse-rownum="2" data-table-responsive-style="overflow"><colgroup><col data-hide-on-mobile="false" data-sortable="true" data-sort-type="number"/></colgroup><caption>Prices</caption><tbody><tr><th>Item</th></tr><tr><td colspan="2">Tea</td></tr></tbody><tfoot>Source: survey</tfoot></table>"#,
    r#"<scrollable-block theme="sans"><scrollable-section theme-style="dark-background" position="center"><ft-content type="http://www.ft.com/ontology/content/ImageSet" url="http://api.ft.com/content/img-2" data-embedded="true"></ft-content><scrollable-text><h3>Part</h3><p>Scroll copy</p></scrollable-text></scrollable-section></scrollable-block>"#,
    "<timeline><h3>History</h3><timeline-event><h4>1990</h4><p>Founded</p></timeline-event></timeline>",
    r#"<recommended><recommended-title>Read more</recommended-title><ft-content type="http://www.ft.com/ontology/content/Article" url="http://api.ft.com/content/rec-1">Override</ft-content></recommended>"#,
    r#"<blockquote class="twitter-tweet"><a href="https://twitter.com/ft/status/1"></a></blockquote>"#,
    r#"<div class="flourish-embed" data-src="visualisation/123" data-flourish-type="chart" data-layout-width="in-line"></div>"#,
    r#"<a data-asset-type="video" data-embedded="true" href="https://www.youtube.com/watch?v=x"></a>"#,
    r#"<ft-content type="http://www.ft.com/ontology/content/CustomCodeComponent" url="http://api.ft.com/content/ccc-1" data-layout-width="in-line"></ft-content>"#,
];

fn document(separator: &str) -> String {
    format!("<body>{}</body>", BLOCKS.join(separator))
}

fn build(markup: &str) -> Root {
    from_body_xml(markup, BuildOptions::strict()).expect("document should build")
}

#[test]
fn canonical_markup_round_trips_exactly() {
    let markup = document("");
    let root = build(&markup);

    assert_eq!(root.body.children.len(), BLOCKS.len());
    assert_eq!(to_body_xml(&root, RenderOptions::default()).unwrap(), markup);
}

#[test]
fn build_render_build_is_stable() {
    let root = build(&document(""));
    let rendered = to_body_xml(&root, RenderOptions::default()).unwrap();

    assert_eq!(build(&rendered), root);
}

#[test]
fn whitespace_between_blocks_is_insignificant() {
    assert_eq!(build(&document("\n    ")), build(&document("")));
}

#[test]
fn tree_json_round_trips() {
    let root = build(&document(""));
    let json = root.to_json().unwrap();

    assert_eq!(Root::from_json(&json).unwrap(), root);
}

#[test]
fn built_trees_are_transit_trees() {
    let root = build(&document(""));

    root.validate(TreeVariant::Transit).unwrap();
    root.validate(TreeVariant::Loose).unwrap();
    assert!(matches!(
        root.validate(TreeVariant::Full),
        Err(TreeError::MalformedNode { .. })
    ));
}

#[test]
fn text_covers_headings_and_paragraphs() {
    let text = to_text(&build(&document(""))).unwrap();

    assert!(text.starts_with("Markets Outlook Shares rose, sharply & briefly fell."));
    assert!(text.contains("Slot copy"));
    assert!(text.contains("Scroll copy"));
    assert!(!text.contains("  "));
}

#[test]
fn ft_content_links_rebuild_to_the_same_link() {
    let root = build(
        r#"<body><p>Read <a href="https://www.ft.com/content/abc123" title="Story">this</a></p></body>"#,
    );
    let rendered = to_body_xml(
        &root,
        RenderOptions {
            dialect: LinkDialect::FtContent,
        },
    )
    .unwrap();

    assert!(rendered.contains(r#"<ft-content type="http://www.ft.com/ontology/content/Article""#));
    assert_eq!(build(&rendered), root);
}

#[test]
fn list_scenarios() {
    let ordered = build("<body><ol><li>a</li><li>b</li></ol></body>");
    let unordered = build("<body><ul><li>a</li><li>b</li></ul></body>");

    assert!(matches!(&ordered.body.children[0], BodyBlock::List(list) if list.ordered));
    assert_eq!(
        to_body_xml(&ordered, RenderOptions::default()).unwrap(),
        "<body><ol><li>a</li><li>b</li></ol></body>"
    );
    assert_eq!(
        to_body_xml(&unordered, RenderOptions::default()).unwrap(),
        "<body><ul><li>a</li><li>b</li></ul></body>"
    );
}

#[test]
fn legacy_markup_converts_end_to_end() {
    let legacy = r#"<body><p>Intro</p><content id="vid-3" type="http://www.ft.com/ontology/content/Video" data-embedded="false"></content></body>"#;
    let upgraded = rewrite_legacy_markup(legacy, &LegacyRewriteOptions::default()).unwrap();
    let root = build(&upgraded);

    assert_eq!(
        to_body_xml(&root, RenderOptions::default()).unwrap(),
        r#"<body><p>Intro</p><ft-content type="http://www.ft.com/ontology/content/Video" url="http://api.ft.com/content/vid-3" data-embedded="false"></ft-content></body>"#
    );
}
