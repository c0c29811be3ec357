//! Element-to-node transformer tables.
//!
//! A [`TransformerTable`] maps a markup element to a [`Construction`]: either a finished node, a
//! node whose children the builder still has to fill, an instruction to lift the element's
//! children into the enclosing parent, or "unknown". Tables are plain values injected into the
//! builder, so callers can extend the standard bodyXML table or assemble a partial one.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use roxmltree::NodeId;

use crate::tree::Node;

mod bodyxml;

pub use bodyxml::{API_CONTENT_BASE, CONTENT_TYPE_BASE, content_type};

/// Tags whose node kind is chosen by their `type` attribute.
pub const TYPED_CONTENT_TAGS: [&str; 2] = ["ft-content", "content"];

/// A pure mapping from one element to its construction.
pub type Transformer = fn(&Element<'_, '_>) -> Construction;

/// What the builder does with an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Construction {
    /// A fully formed node. The element's children are not visited.
    Leaf(Node),
    /// A node whose children come from the element's children, minus the `detached` ones that
    /// were already folded into attributes.
    Parent { node: Node, detached: Vec<NodeId> },
    /// Drop the element and process its children in the enclosing context.
    LiftChildren,
    /// No mapping exists.
    Unknown,
}

impl Construction {
    pub fn leaf(node: impl Into<Node>) -> Self {
        Construction::Leaf(node.into())
    }

    pub fn parent(node: impl Into<Node>) -> Self {
        Construction::Parent {
            node: node.into(),
            detached: Vec::new(),
        }
    }

    pub fn parent_detaching(node: impl Into<Node>, detached: Vec<NodeId>) -> Self {
        Construction::Parent {
            node: node.into(),
            detached,
        }
    }
}

/// Read-only view of a markup element handed to transformers.
#[derive(Clone, Copy)]
pub struct Element<'a, 'input> {
    node: roxmltree::Node<'a, 'input>,
}

impl<'a, 'input: 'a> Element<'a, 'input> {
    pub fn new(node: roxmltree::Node<'a, 'input>) -> Self {
        Element { node }
    }

    pub fn node(&self) -> roxmltree::Node<'a, 'input> {
        self.node
    }

    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    pub fn tag(&self) -> &'a str {
        self.node.tag_name().name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    pub fn attr_or_empty(&self, name: &str) -> String {
        self.attr(name).unwrap_or_default().to_owned()
    }

    pub fn attr_owned(&self, name: &str) -> Option<String> {
        self.attr(name).map(str::to_owned)
    }

    /// `true` only for the literal value `"true"`.
    pub fn flag(&self, name: &str) -> bool {
        self.attr(name) == Some("true")
    }

    pub fn number<T: FromStr>(&self, name: &str) -> Option<T> {
        self.attr(name).and_then(|value| value.trim().parse().ok())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|name| name == class))
    }

    pub fn is_typed_content(&self) -> bool {
        TYPED_CONTENT_TAGS.contains(&self.tag())
    }

    /// The `type` attribute of typed content.
    pub fn content_type(&self) -> Option<&'a str> {
        if self.is_typed_content() {
            self.attr("type")
        } else {
            None
        }
    }

    /// What selected (or failed to select) a transformer beyond the tag.
    pub fn discriminator(&self) -> Option<&'a str> {
        if self.is_typed_content() {
            self.attr("type")
        } else if self.tag() == "div" {
            self.attr("class")
        } else {
            None
        }
    }

    /// The content id of typed content: the last path segment of its `url`.
    pub fn content_id(&self) -> String {
        self.attr("url")
            .map(|url| url.trim_end_matches('/'))
            .and_then(|url| url.rsplit('/').next())
            .unwrap_or_default()
            .to_owned()
    }

    pub fn parent_tag(&self) -> Option<&'a str> {
        self.node
            .parent_element()
            .map(|parent| parent.tag_name().name())
    }

    /// Child elements in document order.
    pub fn children(self) -> impl Iterator<Item = Element<'a, 'input>> {
        self.node
            .children()
            .filter(|child| child.is_element())
            .map(Element::new)
    }

    pub fn first_child_element(self) -> Option<Element<'a, 'input>> {
        self.children().next()
    }

    /// Descendant elements in document order, excluding this one.
    pub fn descendants(self) -> impl Iterator<Item = Element<'a, 'input>> {
        self.node
            .descendants()
            .skip(1)
            .filter(|child| child.is_element())
            .map(Element::new)
    }

    pub fn find(self, tag: &str) -> Option<Element<'a, 'input>> {
        self.descendants().find(|element| element.tag() == tag)
    }

    /// Concatenated descendant text.
    pub fn text_content(&self) -> String {
        self.node
            .descendants()
            .filter(|node| node.is_text())
            .filter_map(|node| node.text())
            .collect()
    }

    /// Trimmed descendant text, `None` when empty.
    pub fn trimmed_text(&self) -> Option<String> {
        let text = self.text_content();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_owned())
    }
}

impl fmt::Debug for Element<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag())
            .field("discriminator", &self.discriminator())
            .finish()
    }
}

/// Transformers keyed by tag name and, for typed content, by `type`.
#[derive(Clone, Default)]
pub struct TransformerTable {
    tags: HashMap<String, Transformer>,
    content_types: HashMap<String, Transformer>,
}

impl TransformerTable {
    /// An empty table. Every element is unknown until entries are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bodyXML table.
    pub fn standard() -> Self {
        bodyxml::standard_table()
    }

    pub fn with_tag(mut self, tag: impl Into<String>, transformer: Transformer) -> Self {
        self.tags.insert(tag.into(), transformer);
        self
    }

    pub fn with_content_type(
        mut self,
        content_type: impl Into<String>,
        transformer: Transformer,
    ) -> Self {
        self.content_types.insert(content_type.into(), transformer);
        self
    }

    pub fn without_tag(mut self, tag: &str) -> Self {
        self.tags.remove(tag);
        self
    }

    pub fn handles_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    pub fn transform(&self, element: &Element<'_, '_>) -> Construction {
        let transformer = if element.is_typed_content() {
            element
                .content_type()
                .and_then(|content_type| self.content_types.get(content_type))
        } else {
            self.tags.get(element.tag())
        };

        match transformer {
            Some(transformer) => transformer(element),
            None => Construction::Unknown,
        }
    }
}

impl fmt::Debug for TransformerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.tags.keys().map(String::as_str).collect();
        tags.sort_unstable();
        let mut content_types: Vec<&str> =
            self.content_types.keys().map(String::as_str).collect();
        content_types.sort_unstable();

        f.debug_struct("TransformerTable")
            .field("tags", &tags)
            .field("content_types", &content_types)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Paragraph, Text, ThematicBreak};

    fn first_element<'a, 'input>(document: &'a roxmltree::Document<'input>) -> Element<'a, 'input> {
        Element::new(document.root_element())
            .first_child_element()
            .expect("document should have a child element")
    }

    #[test]
    fn element_reads_attributes_and_text() {
        let document = roxmltree::Document::parse(
            r#"<body><ft-content type="http://www.ft.com/ontology/content/ImageSet" url="http://api.ft.com/content/abc-123" data-embedded="true">x <b>y</b></ft-content></body>"#,
        )
        .unwrap();
        let element = first_element(&document);

        assert!(element.is_typed_content());
        assert_eq!(element.content_id(), "abc-123");
        assert!(element.flag("data-embedded"));
        assert_eq!(element.text_content(), "x y");
        assert_eq!(element.parent_tag(), Some("body"));
        assert_eq!(
            element.discriminator(),
            Some("http://www.ft.com/ontology/content/ImageSet")
        );
    }

    #[test]
    fn has_class_matches_whole_tokens() {
        let document =
            roxmltree::Document::parse(r#"<body><div class="a n-content-layout__slot"/></body>"#)
                .unwrap();
        let element = first_element(&document);

        assert!(element.has_class("n-content-layout__slot"));
        assert!(!element.has_class("n-content-layout"));
    }

    #[test]
    fn partial_table_only_knows_its_entries() {
        fn rule(_: &Element<'_, '_>) -> Construction {
            Construction::leaf(ThematicBreak::default())
        }

        let table = TransformerTable::new().with_tag("hr", rule);
        let document = roxmltree::Document::parse("<body><hr/><p/></body>").unwrap();
        let mut children = Element::new(document.root_element()).children();

        let rule_element = children.next().unwrap();
        assert_eq!(
            table.transform(&rule_element),
            Construction::Leaf(ThematicBreak::default().into())
        );
        let paragraph_element = children.next().unwrap();
        assert_eq!(table.transform(&paragraph_element), Construction::Unknown);
    }

    #[test]
    fn typed_content_is_keyed_by_type() {
        fn typed(_: &Element<'_, '_>) -> Construction {
            Construction::parent(Paragraph::new(vec![Text::new("typed").into()]))
        }

        let table = TransformerTable::new().with_content_type("urn:thing", typed);
        let document = roxmltree::Document::parse(
            r#"<body><content type="urn:thing" url="x"/><content type="urn:other" url="y"/></body>"#,
        )
        .unwrap();
        let mut children = Element::new(document.root_element()).children();

        assert!(matches!(
            table.transform(&children.next().unwrap()),
            Construction::Parent { .. }
        ));
        assert_eq!(
            table.transform(&children.next().unwrap()),
            Construction::Unknown
        );
    }
}
