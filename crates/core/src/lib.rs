//! Content tree document model with bodyXML and plain-text converters.
//!
//! ```text
//! markup ─▶ (LegacyRewriter) ─▶ TreeBuilder ─▶ Root ─┬─▶ XmlRenderer ─▶ bodyXML
//!                                                    └─▶ TextFlattener ─▶ text
//! ```

use std::sync::OnceLock;

pub mod builder;
pub mod error;
pub mod legacy_rewriter;
pub mod options;
pub mod text_flattener;
pub mod transform;
pub mod tree;
pub mod xml_renderer;

pub use builder::{MAX_NESTING, TreeBuilder};
pub use error::{TreeError, TreeResult};
pub use legacy_rewriter::{LegacyRewriteOptions, LegacyRewriter, rewrite_legacy_markup};
pub use options::{BuildOptions, Fidelity, LinkDialect, RenderOptions};
pub use text_flattener::{TextFlattener, TextOverride};
pub use transform::{Construction, Element, Transformer, TransformerTable};
pub use tree::{AsNode, Node, NodeRef, Root, TreeVariant};
pub use xml_renderer::XmlRenderer;

/// Returns the crate version baked in at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

fn standard_table() -> &'static TransformerTable {
    static TABLE: OnceLock<TransformerTable> = OnceLock::new();
    TABLE.get_or_init(TransformerTable::standard)
}

/// Builds a tree from bodyXML with the standard transformer table.
pub fn from_body_xml(markup: &str, options: BuildOptions) -> TreeResult<Root> {
    TreeBuilder::new(standard_table(), options).build(markup)
}

/// Renders a tree to a bodyXML string.
pub fn to_body_xml(root: &Root, options: RenderOptions) -> TreeResult<String> {
    let bytes = XmlRenderer::new(Vec::new(), options).render(root)?;
    String::from_utf8(bytes).map_err(|err| TreeError::Io(std::io::Error::other(err)))
}

/// Flattens a tree to plain text with the default flattener.
pub fn to_text(root: &Root) -> TreeResult<String> {
    TextFlattener::new().flatten(root)
}
