#![deny(missing_docs)]
//! Node.js bindings that surface the content tree converters.

use content_tree_core::{
    BuildOptions, LinkDialect, RenderOptions, Root, from_body_xml, to_body_xml, to_text,
};
use napi::{Error, Result};
use napi_derive::napi;

/// Returns the version string reported by the core crate.
#[napi]
pub fn version() -> String {
    content_tree_core::version().to_string()
}

/// Builds a content tree from bodyXML and returns it as JSON.
#[napi]
pub fn body_xml_to_tree(input: String, strict: Option<bool>) -> Result<String> {
    let options = if strict.unwrap_or(false) {
        BuildOptions::strict()
    } else {
        BuildOptions::lenient()
    };

    let root = from_body_xml(&input, options).map_err(to_napi_error)?;
    root.to_json().map_err(to_napi_error)
}

/// Renders a JSON content tree to bodyXML.
#[napi]
pub fn tree_to_body_xml(tree: String, ft_content_links: Option<bool>) -> Result<String> {
    let root = Root::from_json(&tree).map_err(to_napi_error)?;
    let dialect = if ft_content_links.unwrap_or(false) {
        LinkDialect::FtContent
    } else {
        LinkDialect::Html
    };
    to_body_xml(&root, RenderOptions { dialect }).map_err(to_napi_error)
}

/// Flattens a JSON content tree to plain text.
#[napi]
pub fn tree_to_text(tree: String) -> Result<String> {
    let root = Root::from_json(&tree).map_err(to_napi_error)?;
    to_text(&root).map_err(to_napi_error)
}

fn to_napi_error<E: ToString>(err: E) -> Error {
    Error::from_reason(err.to_string())
}
