//! The content tree node model.
//!
//! Every node kind is a plain struct that owns its attributes and children. [`Node`] is the owned
//! sum of all kinds and [`NodeRef`] the borrowed one; the child unions narrow [`Node`] to the
//! kinds a given parent admits, so a tree that type-checks can only hold legal parent/child pairs.
//! Fixed-arity parents (layout, table, scrolly-section) additionally check their child sequence
//! against a [`ChildGrammar`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::TreeError;

/// Generates [`Node`], [`NodeRef`] and the per-kind conversions from the `Kind => "tag"` list.
macro_rules! content_nodes {
    ($($variant:ident => $tag:literal),+ $(,)?) => {
        /// An owned node of any kind, tagged by its `type`.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type")]
        pub enum Node {
            $(
                #[serde(rename = $tag)]
                $variant($variant),
            )+
        }

        /// A borrowed node of any kind.
        #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
        #[serde(tag = "type")]
        pub enum NodeRef<'a> {
            $(
                #[serde(rename = $tag)]
                $variant(&'a $variant),
            )+
        }

        /// Every kind tag, in declaration order.
        pub const ALL_KINDS: &[&str] = &[$($tag,)+];

        impl Node {
            /// The `type` tag of this node.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(Node::$variant(_) => $tag,)+
                }
            }

            pub fn as_node_ref(&self) -> NodeRef<'_> {
                match self {
                    $(Node::$variant(node) => NodeRef::$variant(node),)+
                }
            }
        }

        impl<'a> NodeRef<'a> {
            pub fn kind(self) -> &'static str {
                match self {
                    $(NodeRef::$variant(_) => $tag,)+
                }
            }

            /// The opaque `data` bag, passed through unmodified.
            pub fn data(self) -> Option<&'a Value> {
                match self {
                    $(NodeRef::$variant(node) => node.data.as_ref(),)+
                }
            }
        }

        $(
            impl $variant {
                pub const KIND: &'static str = $tag;
            }

            impl From<$variant> for Node {
                fn from(node: $variant) -> Self {
                    Node::$variant(node)
                }
            }

            impl TryFrom<Node> for $variant {
                type Error = Node;

                fn try_from(node: Node) -> Result<Self, Node> {
                    match node {
                        Node::$variant(node) => Ok(node),
                        other => Err(other),
                    }
                }
            }

            impl AsNode for $variant {
                fn as_node(&self) -> NodeRef<'_> {
                    NodeRef::$variant(self)
                }
            }

            impl ChildSlot for $variant {
                const KINDS: &'static [&'static str] = &[$tag];
            }
        )+
    };
}

/// Generates a closed child union: exactly one alternative is populated, and (de)serialization
/// goes through the embedded node's own `type` discriminator.
macro_rules! node_union {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $($variant($variant),)+
        }

        impl $name {
            pub fn kind(&self) -> &'static str {
                match self {
                    $($name::$variant(_) => $variant::KIND,)+
                }
            }

            /// The single populated alternative.
            pub fn embedded(&self) -> NodeRef<'_> {
                match self {
                    $($name::$variant(node) => NodeRef::$variant(node),)+
                }
            }
        }

        impl AsNode for $name {
            fn as_node(&self) -> NodeRef<'_> {
                self.embedded()
            }
        }

        impl ChildSlot for $name {
            const KINDS: &'static [&'static str] = &[$($variant::KIND,)+];
        }

        $(
            impl From<$variant> for $name {
                fn from(node: $variant) -> Self {
                    $name::$variant(node)
                }
            }
        )+

        impl From<$name> for Node {
            fn from(child: $name) -> Self {
                match child {
                    $($name::$variant(node) => Node::$variant(node),)+
                }
            }
        }

        impl TryFrom<Node> for $name {
            type Error = Node;

            fn try_from(node: Node) -> Result<Self, Node> {
                match node {
                    $(Node::$variant(node) => Ok($name::$variant(node)),)+
                    other => Err(other),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.embedded().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let node = Node::deserialize(deserializer)?;
                $name::try_from(node).map_err(|node| {
                    serde::de::Error::custom(format!(
                        "{} is not allowed here, expected one of: {}",
                        node.kind(),
                        <$name as ChildSlot>::KINDS.join(", "),
                    ))
                })
            }
        }
    };
}

/// Generates a closed string enumeration with its wire names and a fallback default.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Parses an optional attribute value, falling back to the default when it is
            /// missing or out of range.
            pub fn parse_or_default(value: Option<&str>) -> Self {
                value.and_then(Self::parse).unwrap_or_default()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod arity;
mod blocks;
mod layout;
mod media;
mod phrasing;
mod scrolly;
mod table;
mod timeline;
mod unions;
mod validate;

pub use arity::{ChildGrammar, Repeat, Shape};
pub use blocks::{
    BigNumber, Blockquote, Heading, HeadingLevel, List, ListItem, Paragraph, Pullquote,
    ThematicBreak,
};
pub use layout::{Layout, LayoutImage, LayoutName, LayoutSlot, LayoutWidth};
pub use media::{
    AttributeValue, Clip, ClipFormat, ClipSet, ClipSetLayoutWidth, ClipSource,
    CustomCodeComponent, Flourish, FlourishLayoutWidth, Image, ImageFormat, ImageSet,
    ImageSetPicture, ImageSource, ImageType, Recommended, Teaser, TeaserConcept, TeaserImage,
    TeaserType, Tweet, Video, YoutubeVideo,
};
pub use phrasing::{Break, Emphasis, Link, Strikethrough, Strong, Text};
pub use scrolly::{
    ScrollyBlock, ScrollyCopy, ScrollyDisplay, ScrollyHeading, ScrollyHeadingLevel, ScrollyImage,
    ScrollyPosition, ScrollySection, ScrollyTheme, ScrollyTransition,
};
pub use table::{
    SortType, Table, TableBody, TableCaption, TableCell, TableColumnSettings, TableFooter,
    TableLayoutWidth, TableResponsiveStyle, TableRow,
};
pub use timeline::{Timeline, TimelineEvent};
pub use unions::{
    BlockquoteChild, BodyBlock, LayoutChild, LayoutSlotChild, ListItemChild, Phrasing,
    ScrollyCopyChild, ScrollySectionChild, TableChild, TimelineEventChild,
};
pub use validate::TreeVariant;

content_nodes! {
    Root => "root",
    Body => "body",
    Text => "text",
    Break => "break",
    ThematicBreak => "thematic-break",
    Paragraph => "paragraph",
    Heading => "heading",
    Strong => "strong",
    Emphasis => "emphasis",
    Strikethrough => "strikethrough",
    Link => "link",
    List => "list",
    ListItem => "list-item",
    Blockquote => "blockquote",
    Pullquote => "pullquote",
    ImageSet => "image-set",
    Recommended => "recommended",
    Tweet => "tweet",
    Flourish => "flourish",
    BigNumber => "big-number",
    Video => "video",
    YoutubeVideo => "youtube-video",
    ScrollyBlock => "scrolly-block",
    ScrollySection => "scrolly-section",
    ScrollyImage => "scrolly-image",
    ScrollyCopy => "scrolly-copy",
    ScrollyHeading => "scrolly-heading",
    Layout => "layout",
    LayoutSlot => "layout-slot",
    LayoutImage => "layout-image",
    Table => "table",
    TableCaption => "table-caption",
    TableBody => "table-body",
    TableRow => "table-row",
    TableCell => "table-cell",
    TableFooter => "table-footer",
    CustomCodeComponent => "custom-code-component",
    ClipSet => "clip-set",
    Timeline => "timeline",
    TimelineEvent => "timeline-event",
}

/// Borrowed access to any node, union or kind struct.
pub trait AsNode {
    fn as_node(&self) -> NodeRef<'_>;
}

/// A type that can occupy a child position: a single kind or a child union.
pub trait ChildSlot: TryFrom<Node, Error = Node> + AsNode {
    /// The kind tags this slot accepts.
    const KINDS: &'static [&'static str];

    fn expected() -> String {
        Self::KINDS.join(" | ")
    }
}

/// A node that receives children while a tree is being constructed.
pub trait Append {
    fn kind(&self) -> &'static str;

    /// Checks that a child of `kind` may be appended next, without appending it.
    fn admits(&self, kind: &'static str) -> Result<(), TreeError>;

    fn append(&mut self, child: Node) -> Result<(), TreeError>;
}

/// The document root. It wraps exactly one [`Body`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Root {
    #[serde(serialize_with = "serialize_body", deserialize_with = "deserialize_body")]
    pub body: Body,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Root {
    pub fn new(body: Body) -> Self {
        Root { body, data: None }
    }

    /// Reads a tree from its JSON form, `{"type":"root","body":{…}}`.
    ///
    /// Child lists of fixed-arity nodes must form a complete legal shape. JSON nesting is
    /// bounded by serde_json's recursion limit, which trees within
    /// [`MAX_NESTING`](crate::MAX_NESTING) stay under.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        match serde_json::from_str::<Node>(json)? {
            Node::Root(root) => Ok(root),
            other => Err(TreeError::malformed(
                Root::KIND,
                "a root node",
                format!("document starts with {}", other.kind()),
            )),
        }
    }

    pub fn to_json(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string(&self.as_node())?)
    }

    pub fn to_json_value(&self) -> Result<Value, TreeError> {
        Ok(serde_json::to_value(self.as_node())?)
    }
}

fn serialize_body<S: Serializer>(body: &Body, serializer: S) -> Result<S::Ok, S::Error> {
    NodeRef::Body(body).serialize(serializer)
}

fn deserialize_body<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Body, D::Error> {
    match Node::deserialize(deserializer)? {
        Node::Body(body) => Ok(body),
        other => Err(serde::de::Error::custom(format!(
            "root must wrap a body, found {}",
            other.kind()
        ))),
    }
}

/// The article body: a versioned sequence of block-level nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub version: u32,
    #[serde(default)]
    pub children: Vec<BodyBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Body {
    pub fn new(version: u32, children: Vec<BodyBlock>) -> Self {
        Body {
            version,
            children,
            data: None,
        }
    }
}

impl Append for Body {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn admits(&self, kind: &'static str) -> Result<(), TreeError> {
        admits_slot::<BodyBlock>(Self::KIND, kind)
    }

    fn append(&mut self, child: Node) -> Result<(), TreeError> {
        push(Self::KIND, &mut self.children, child)
    }
}

impl AsNode for Node {
    fn as_node(&self) -> NodeRef<'_> {
        self.as_node_ref()
    }
}

impl<'a> NodeRef<'a> {
    /// The ordered children of a parent kind, or `None` for leaves.
    pub fn children(self) -> Option<Vec<NodeRef<'a>>> {
        fn all<'a, T: AsNode>(children: &'a [T]) -> Option<Vec<NodeRef<'a>>> {
            Some(children.iter().map(AsNode::as_node).collect())
        }

        match self {
            NodeRef::Root(root) => Some(vec![NodeRef::Body(&root.body)]),
            NodeRef::Body(node) => all(&node.children),
            NodeRef::Paragraph(node) => all(&node.children),
            NodeRef::Heading(node) => all(&node.children),
            NodeRef::Strong(node) => all(&node.children),
            NodeRef::Emphasis(node) => all(&node.children),
            NodeRef::Strikethrough(node) => all(&node.children),
            NodeRef::Link(node) => all(&node.children),
            NodeRef::List(node) => all(&node.children),
            NodeRef::ListItem(node) => all(&node.children),
            NodeRef::Blockquote(node) => all(&node.children),
            NodeRef::ScrollyBlock(node) => all(&node.children),
            NodeRef::ScrollySection(node) => all(&node.children),
            NodeRef::ScrollyCopy(node) => all(&node.children),
            NodeRef::ScrollyHeading(node) => all(&node.children),
            NodeRef::Layout(node) => all(&node.children),
            NodeRef::LayoutSlot(node) => all(&node.children),
            NodeRef::Table(node) => all(&node.children),
            NodeRef::TableCaption(node) => all(&node.children),
            NodeRef::TableBody(node) => all(&node.children),
            NodeRef::TableRow(node) => all(&node.children),
            NodeRef::TableCell(node) => all(&node.children),
            NodeRef::TableFooter(node) => all(&node.children),
            NodeRef::Timeline(node) => all(&node.children),
            NodeRef::TimelineEvent(node) => all(&node.children),
            NodeRef::Text(_)
            | NodeRef::Break(_)
            | NodeRef::ThematicBreak(_)
            | NodeRef::Pullquote(_)
            | NodeRef::ImageSet(_)
            | NodeRef::Recommended(_)
            | NodeRef::Tweet(_)
            | NodeRef::Flourish(_)
            | NodeRef::BigNumber(_)
            | NodeRef::Video(_)
            | NodeRef::YoutubeVideo(_)
            | NodeRef::ScrollyImage(_)
            | NodeRef::LayoutImage(_)
            | NodeRef::CustomCodeComponent(_)
            | NodeRef::ClipSet(_) => None,
        }
    }

    pub fn is_parent(self) -> bool {
        self.children().is_some()
    }
}

impl Append for Node {
    fn kind(&self) -> &'static str {
        Node::kind(self)
    }

    fn admits(&self, kind: &'static str) -> Result<(), TreeError> {
        let parent = Node::kind(self);
        match self {
            Node::Body(body) => body.admits(kind),
            Node::Layout(layout) => layout.admits(kind),
            Node::Table(table) => table.admits(kind),
            Node::ScrollySection(section) => section.admits(kind),
            Node::Paragraph(_)
            | Node::Heading(_)
            | Node::Strong(_)
            | Node::Emphasis(_)
            | Node::Strikethrough(_)
            | Node::Link(_)
            | Node::TableCaption(_)
            | Node::TableCell(_)
            | Node::TableFooter(_) => admits_slot::<Phrasing>(parent, kind),
            Node::List(_) => admits_slot::<ListItem>(parent, kind),
            Node::ListItem(_) => admits_slot::<ListItemChild>(parent, kind),
            Node::Blockquote(_) => admits_slot::<BlockquoteChild>(parent, kind),
            Node::ScrollyBlock(_) => admits_slot::<ScrollySection>(parent, kind),
            Node::ScrollyCopy(_) => admits_slot::<ScrollyCopyChild>(parent, kind),
            Node::ScrollyHeading(_) => admits_slot::<Text>(parent, kind),
            Node::LayoutSlot(_) => admits_slot::<LayoutSlotChild>(parent, kind),
            Node::TableBody(_) => admits_slot::<TableRow>(parent, kind),
            Node::TableRow(_) => admits_slot::<TableCell>(parent, kind),
            Node::Timeline(_) => admits_slot::<TimelineEvent>(parent, kind),
            Node::TimelineEvent(_) => admits_slot::<TimelineEventChild>(parent, kind),
            _ => Err(TreeError::invalid_child_placement(parent, kind, NO_CHILDREN)),
        }
    }

    fn append(&mut self, child: Node) -> Result<(), TreeError> {
        let parent = Node::kind(self);
        match self {
            Node::Body(body) => body.append(child),
            Node::Layout(layout) => layout.append(child),
            Node::Table(table) => table.append(child),
            Node::ScrollySection(section) => section.append(child),
            Node::Paragraph(node) => push(parent, &mut node.children, child),
            Node::Heading(node) => push(parent, &mut node.children, child),
            Node::Strong(node) => push(parent, &mut node.children, child),
            Node::Emphasis(node) => push(parent, &mut node.children, child),
            Node::Strikethrough(node) => push(parent, &mut node.children, child),
            Node::Link(node) => push(parent, &mut node.children, child),
            Node::TableCaption(node) => push(parent, &mut node.children, child),
            Node::TableCell(node) => push(parent, &mut node.children, child),
            Node::TableFooter(node) => push(parent, &mut node.children, child),
            Node::List(node) => push(parent, &mut node.children, child),
            Node::ListItem(node) => push(parent, &mut node.children, child),
            Node::Blockquote(node) => push(parent, &mut node.children, child),
            Node::ScrollyBlock(node) => push(parent, &mut node.children, child),
            Node::ScrollyCopy(node) => push(parent, &mut node.children, child),
            Node::ScrollyHeading(node) => push(parent, &mut node.children, child),
            Node::LayoutSlot(node) => push(parent, &mut node.children, child),
            Node::TableBody(node) => push(parent, &mut node.children, child),
            Node::TableRow(node) => push(parent, &mut node.children, child),
            Node::Timeline(node) => push(parent, &mut node.children, child),
            Node::TimelineEvent(node) => push(parent, &mut node.children, child),
            _ => Err(TreeError::invalid_child_placement(
                parent,
                child.kind(),
                NO_CHILDREN,
            )),
        }
    }
}

/// Serde helpers for child lists of one concrete kind, so each child still carries its `type`.
pub(crate) mod tagged {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{ChildSlot, Node};

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S: Serializer, T: ChildSlot>(
        children: &Vec<T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(children.len()))?;
        for child in children {
            seq.serialize_element(&child.as_node())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>, T: ChildSlot>(
        deserializer: D,
    ) -> Result<Vec<T>, D::Error> {
        Vec::<Node>::deserialize(deserializer)?
            .into_iter()
            .map(|node| {
                T::try_from(node).map_err(|node| {
                    serde::de::Error::custom(format!(
                        "{} is not allowed here, expected one of: {}",
                        node.kind(),
                        T::KINDS.join(", "),
                    ))
                })
            })
            .collect()
    }
}

const NO_CHILDREN: &str = "no children";

pub(crate) fn admits_slot<T: ChildSlot>(
    parent: &'static str,
    kind: &'static str,
) -> Result<(), TreeError> {
    if T::KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(TreeError::invalid_child_placement(parent, kind, T::expected()))
    }
}

pub(crate) fn push<T: ChildSlot>(
    parent: &'static str,
    children: &mut Vec<T>,
    child: Node,
) -> Result<(), TreeError> {
    let child = T::try_from(child).map_err(|node| {
        TreeError::invalid_child_placement(parent, node.kind(), T::expected())
    })?;
    children.push(child);
    Ok(())
}
