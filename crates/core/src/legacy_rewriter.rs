//! Streaming pre-processor that upgrades legacy `<content id=…>` references to
//! `<ft-content url=…>` before the markup reaches the tree builder.

use lol_html::{HtmlRewriter, OutputSink, Selector, Settings, element};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::transform::API_CONTENT_BASE;

/// Controls how legacy markup is rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyRewriteOptions {
    /// Rename `<content id=…>` to `<ft-content url=…>`.
    pub rename_content_elements: bool,
    /// Prefix joined with the legacy id to form the `url` attribute.
    pub api_base: String,
}

impl Default for LegacyRewriteOptions {
    fn default() -> Self {
        LegacyRewriteOptions {
            rename_content_elements: true,
            api_base: API_CONTENT_BASE.to_string(),
        }
    }
}

/// Implements [`Write`] so markup can be pushed through lol_html chunk by chunk.
///
/// Rewritten chunks go straight to the destination writer, which lol_html's output sink shares
/// with this handle.
pub struct LegacyRewriter<W: Write> {
    rewriter: Option<HtmlRewriter<'static, SharedSink<W>>>,
    sink: SharedSink<W>,
}

impl<W: Write> LegacyRewriter<W> {
    pub fn new(writer: W, options: &LegacyRewriteOptions) -> Self {
        let sink = SharedSink(Rc::new(RefCell::new(Sink {
            writer,
            error: None,
        })));
        let rewriter = HtmlRewriter::new(options.to_settings(), sink.clone());

        Self {
            rewriter: Some(rewriter),
            sink,
        }
    }

    /// Ends the rewrite and returns the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.end()?;

        let sink = Rc::try_unwrap(self.sink.0)
            .map_err(|_| io::Error::other("rewriter output still shared"))?
            .into_inner();
        Ok(sink.writer)
    }

    fn end(&mut self) -> io::Result<()> {
        if let Some(rewriter) = self.rewriter.take() {
            rewriter.end().map_err(io::Error::other)?;
        }
        self.sink.take_error()
    }
}

impl<W: Write> Write for LegacyRewriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let rewriter = self
            .rewriter
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "rewriter finalized"))?;

        rewriter.write(buf).map_err(io::Error::other)?;
        self.sink.take_error()?;
        Ok(buf.len())
    }

    /// Ends the rewrite; later writes fail.
    fn flush(&mut self) -> io::Result<()> {
        self.end()
    }
}

/// Rewrites a complete document in memory.
pub fn rewrite_legacy_markup(markup: &str, options: &LegacyRewriteOptions) -> io::Result<String> {
    let mut rewriter = LegacyRewriter::new(Vec::with_capacity(markup.len()), options);
    rewriter.write_all(markup.as_bytes())?;
    let bytes = rewriter.into_inner()?;
    String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

impl LegacyRewriteOptions {
    fn to_settings(&self) -> Settings<'static, 'static> {
        let mut settings = Settings::default();
        let mut handlers = Vec::new();

        if self.rename_content_elements {
            handlers.push(content_element_handler(self.api_base.clone()));
        }

        settings.element_content_handlers = handlers;
        settings
    }
}

fn content_element_handler(
    api_base: String,
) -> (
    Cow<'static, Selector>,
    lol_html::ElementContentHandlers<'static>,
) {
    element!("content[id]", move |el| {
        if let Some(id) = el.get_attribute("id") {
            el.remove_attribute("id");
            el.set_attribute("url", &format!("{api_base}{id}"))?;
        }
        el.set_tag_name("ft-content")?;

        Ok(())
    })
}

struct Sink<W> {
    writer: W,
    error: Option<io::Error>,
}

/// lol_html's output sink. The first write error is kept and later chunks are dropped.
struct SharedSink<W>(Rc<RefCell<Sink<W>>>);

impl<W> Clone for SharedSink<W> {
    fn clone(&self) -> Self {
        SharedSink(Rc::clone(&self.0))
    }
}

impl<W> SharedSink<W> {
    fn take_error(&self) -> io::Result<()> {
        match self.0.borrow_mut().error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<W: Write> OutputSink for SharedSink<W> {
    fn handle_chunk(&mut self, chunk: &[u8]) {
        let mut sink = self.0.borrow_mut();
        if chunk.is_empty() || sink.error.is_some() {
            return;
        }
        if let Err(err) = sink.writer.write_all(chunk) {
            sink.error = Some(err);
        }
    }
}
