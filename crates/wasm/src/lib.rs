use content_tree_core::{
    BuildOptions, LinkDialect, RenderOptions, Root, XmlRenderer, from_body_xml, to_body_xml,
    to_text,
};
use js_sys::Function;
use std::io::{self, Write};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

/// Builds a content tree from bodyXML and returns it as JSON.
///
/// Unknown elements are skipped unless `strict` is set.
#[wasm_bindgen(js_name = body_xml_to_tree)]
pub fn body_xml_to_tree(input: &str, strict: Option<bool>) -> Result<String, JsError> {
    let options = if strict.unwrap_or(false) {
        BuildOptions::strict()
    } else {
        BuildOptions::lenient()
    };

    let root = from_body_xml(input, options).map_err(to_js_error)?;
    root.to_json().map_err(to_js_error)
}

/// Renders a JSON content tree to a bodyXML `String`.
#[wasm_bindgen(js_name = tree_to_body_xml)]
pub fn tree_to_body_xml(tree: &str, ft_content_links: Option<bool>) -> Result<String, JsError> {
    let root = Root::from_json(tree).map_err(to_js_error)?;
    to_body_xml(&root, render_options(ft_content_links)).map_err(to_js_error)
}

/// Flattens a JSON content tree to plain text.
#[wasm_bindgen(js_name = tree_to_text)]
pub fn tree_to_text(tree: &str) -> Result<String, JsError> {
    let root = Root::from_json(tree).map_err(to_js_error)?;
    to_text(&root).map_err(to_js_error)
}

/// Streams rendered bodyXML chunks into the provided JavaScript callback.
///
/// The callback is invoked with each UTF-8 chunk as the renderer writes it,
/// so callers can forward output to a `WritableStream` without buffering the
/// whole document.
#[wasm_bindgen(js_name = stream_body_xml)]
pub fn stream_body_xml(
    tree: &str,
    chunk_callback: &Function,
    ft_content_links: Option<bool>,
) -> Result<(), JsError> {
    let root = Root::from_json(tree).map_err(to_js_error)?;
    let writer = JsChunkWriter::new(chunk_callback.clone());

    XmlRenderer::new(writer, render_options(ft_content_links))
        .render(&root)
        .map_err(to_js_error)?;
    Ok(())
}

fn render_options(ft_content_links: Option<bool>) -> RenderOptions {
    let dialect = if ft_content_links.unwrap_or(false) {
        LinkDialect::FtContent
    } else {
        LinkDialect::Html
    };
    RenderOptions { dialect }
}

fn to_js_error<E: ToString>(err: E) -> JsError {
    JsError::new(&err.to_string())
}

struct JsChunkWriter {
    callback: Function,
}

impl JsChunkWriter {
    fn new(callback: Function) -> Self {
        Self { callback }
    }
}

impl Write for JsChunkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let chunk = std::str::from_utf8(buf)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

        self.callback
            .call1(&JsValue::UNDEFINED, &JsValue::from_str(chunk))
            .map_err(js_callback_error)?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn js_callback_error(err: JsValue) -> io::Error {
    let message = err
        .as_string()
        .or_else(|| {
            js_sys::JSON::stringify(&err)
                .ok()
                .and_then(|s| s.as_string())
        })
        .unwrap_or_else(|| "callback threw".to_string());
    io::Error::other(message)
}
