//! Closed child unions. Each names the kinds one parent position admits.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{
    AsNode, BigNumber, Blockquote, Break, ChildSlot, ClipSet, CustomCodeComponent, Emphasis,
    Flourish, Heading, ImageSet, Layout, LayoutImage, LayoutSlot, Link, List, Node, NodeRef,
    Paragraph, Pullquote, Recommended, ScrollyBlock, ScrollyCopy, ScrollyHeading, ScrollyImage,
    Strikethrough, Strong, Table, TableBody, TableCaption, TableFooter, Text, ThematicBreak,
    Timeline, Tweet, Video, YoutubeVideo,
};

node_union! {
    /// Inline content.
    Phrasing { Text, Break, Strong, Emphasis, Strikethrough, Link }
}

node_union! {
    /// Block-level content of the body.
    BodyBlock {
        Paragraph,
        Heading,
        ImageSet,
        Flourish,
        BigNumber,
        CustomCodeComponent,
        Layout,
        List,
        Blockquote,
        Pullquote,
        ScrollyBlock,
        ThematicBreak,
        Table,
        Recommended,
        Tweet,
        Video,
        YoutubeVideo,
        ClipSet,
        Timeline,
    }
}

node_union! {
    ListItemChild { Paragraph, Text, Break, Strong, Emphasis, Strikethrough, Link }
}

node_union! {
    BlockquoteChild { Paragraph, Text, Break, Strong, Emphasis, Strikethrough, Link }
}

node_union! {
    LayoutChild { Heading, LayoutImage, LayoutSlot }
}

node_union! {
    LayoutSlotChild { Heading, Paragraph, LayoutImage }
}

node_union! {
    TableChild { TableCaption, TableBody, TableFooter }
}

node_union! {
    ScrollySectionChild { ScrollyImage, ScrollyCopy }
}

node_union! {
    ScrollyCopyChild { ScrollyHeading, Paragraph }
}

node_union! {
    TimelineEventChild { Paragraph, ImageSet }
}

impl From<Phrasing> for ListItemChild {
    fn from(phrasing: Phrasing) -> Self {
        match phrasing {
            Phrasing::Text(node) => ListItemChild::Text(node),
            Phrasing::Break(node) => ListItemChild::Break(node),
            Phrasing::Strong(node) => ListItemChild::Strong(node),
            Phrasing::Emphasis(node) => ListItemChild::Emphasis(node),
            Phrasing::Strikethrough(node) => ListItemChild::Strikethrough(node),
            Phrasing::Link(node) => ListItemChild::Link(node),
        }
    }
}

impl From<Phrasing> for BlockquoteChild {
    fn from(phrasing: Phrasing) -> Self {
        match phrasing {
            Phrasing::Text(node) => BlockquoteChild::Text(node),
            Phrasing::Break(node) => BlockquoteChild::Break(node),
            Phrasing::Strong(node) => BlockquoteChild::Strong(node),
            Phrasing::Emphasis(node) => BlockquoteChild::Emphasis(node),
            Phrasing::Strikethrough(node) => BlockquoteChild::Strikethrough(node),
            Phrasing::Link(node) => BlockquoteChild::Link(node),
        }
    }
}
