//! Whole-tree validation against the transit, full and loose variants.

use serde::{Deserialize, Serialize};

use super::arity::ChildGrammar;
use super::{AsNode, Layout, NodeRef, Root, ScrollySection, Table};
use crate::error::TreeError;

/// Which externally resolved fields a tree is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreeVariant {
    /// As stored: every external field absent.
    Transit,
    /// As published: every external field present.
    Full,
    /// Either.
    Loose,
}

impl TreeVariant {
    fn allows(self, present: bool) -> bool {
        match self {
            TreeVariant::Transit => !present,
            TreeVariant::Full => present,
            TreeVariant::Loose => true,
        }
    }
}

impl std::fmt::Display for TreeVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TreeVariant::Transit => "transit",
            TreeVariant::Full => "full",
            TreeVariant::Loose => "loose",
        };
        f.write_str(name)
    }
}

impl Root {
    /// Checks external fields and fixed-arity shapes across the whole tree.
    pub fn validate(&self, variant: TreeVariant) -> Result<(), TreeError> {
        let mut stack = vec![self.as_node()];

        while let Some(node) = stack.pop() {
            for (field, present) in node.external_fields() {
                if !variant.allows(present) {
                    let state = if present { "present" } else { "missing" };
                    return Err(TreeError::malformed(
                        node.kind(),
                        format!("a {variant} tree"),
                        format!("external field `{field}` is {state}"),
                    ));
                }
            }

            node.check_shape()?;

            if let Some(children) = node.children() {
                stack.extend(children.into_iter().rev());
            }
        }

        Ok(())
    }
}

impl<'a> NodeRef<'a> {
    /// Externally resolved fields of this node and whether each is set.
    pub fn external_fields(self) -> Vec<(&'static str, bool)> {
        match self {
            NodeRef::ImageSet(node) => vec![("picture", node.picture.is_some())],
            NodeRef::ScrollyImage(node) => vec![("picture", node.picture.is_some())],
            NodeRef::LayoutImage(node) => vec![("picture", node.picture.is_some())],
            NodeRef::Recommended(node) => vec![("teaser", node.teaser.is_some())],
            NodeRef::Tweet(node) => vec![("html", node.html.is_some())],
            NodeRef::Flourish(node) => vec![("fallbackImage", node.fallback_image.is_some())],
            NodeRef::Video(node) => vec![("title", node.title.is_some())],
            NodeRef::CustomCodeComponent(node) => vec![
                ("path", node.path.is_some()),
                ("versionRange", node.version_range.is_some()),
                ("attributesLastModified", node.attributes_last_modified.is_some()),
                ("attributes", node.attributes.is_some()),
            ],
            NodeRef::ClipSet(node) => vec![
                ("clips", node.clips.is_some()),
                ("caption", node.caption.is_some()),
                ("credits", node.credits.is_some()),
                ("description", node.description.is_some()),
            ],
            _ => Vec::new(),
        }
    }

    /// The grammar and current child kinds of a fixed-arity parent.
    pub fn child_shape(self) -> Option<(&'static ChildGrammar, Vec<&'static str>)> {
        match self {
            NodeRef::Layout(node) => Some((Layout::grammar(), node.child_kinds())),
            NodeRef::Table(node) => Some((Table::grammar(), node.child_kinds())),
            NodeRef::ScrollySection(node) => Some((ScrollySection::grammar(), node.child_kinds())),
            _ => None,
        }
    }

    /// Checks the complete child sequence of a fixed-arity parent.
    pub fn check_shape(self) -> Result<(), TreeError> {
        match self.child_shape() {
            Some((grammar, kinds)) => grammar.check_complete(&kinds),
            None => Ok(()),
        }
    }
}
