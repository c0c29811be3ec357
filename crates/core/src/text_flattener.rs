//! Flattens a content tree to single-spaced plain text.

use std::collections::HashMap;
use std::fmt;

use crate::error::TreeError;
use crate::tree::{AsNode, NodeRef, Root};

/// Replaces the text produced for one node kind. It receives the flattener so it can recurse.
pub type TextOverride =
    Box<dyn Fn(NodeRef<'_>, &TextFlattener) -> Result<String, TreeError> + Send + Sync>;

/// Tree → plain text conversion with optional per-kind overrides.
#[derive(Default)]
pub struct TextFlattener {
    overrides: HashMap<&'static str, TextOverride>,
}

impl TextFlattener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override<F>(mut self, kind: &'static str, render: F) -> Self
    where
        F: Fn(NodeRef<'_>, &TextFlattener) -> Result<String, TreeError> + Send + Sync + 'static,
    {
        self.overrides.insert(kind, Box::new(render));
        self
    }

    /// Flattens the whole tree, collapsing whitespace runs to one space and trimming the ends.
    pub fn flatten(&self, root: &Root) -> Result<String, TreeError> {
        self.flatten_node(root.as_node())
    }

    pub fn flatten_node(&self, node: NodeRef<'_>) -> Result<String, TreeError> {
        let raw = self.node_text(node)?;
        Ok(collapse_whitespace(&raw))
    }

    /// Uncollapsed text of one node, for use inside overrides.
    pub fn node_text(&self, node: NodeRef<'_>) -> Result<String, TreeError> {
        if let Some(render) = self.overrides.get(node.kind()) {
            return render(node, self);
        }

        match node {
            NodeRef::Text(text) => Ok(text.value.clone()),
            NodeRef::Paragraph(_)
            | NodeRef::Heading(_)
            | NodeRef::ScrollyHeading(_)
            | NodeRef::TableCell(_) => {
                let mut text = self.children_text(node)?;
                if !text.is_empty() {
                    text.push(' ');
                }
                Ok(text)
            }
            _ => {
                node.check_shape()?;
                self.children_text(node)
            }
        }
    }

    /// Concatenated text of the children; empty for leaves.
    pub fn children_text(&self, node: NodeRef<'_>) -> Result<String, TreeError> {
        let mut text = String::new();
        if let Some(children) = node.children() {
            for child in children {
                text.push_str(&self.node_text(child)?);
            }
        }
        Ok(text)
    }
}

impl fmt::Debug for TextFlattener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.overrides.keys().copied().collect();
        kinds.sort_unstable();
        f.debug_struct("TextFlattener")
            .field("overrides", &kinds)
            .finish()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
