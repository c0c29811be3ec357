//! Editorial layouts: a heading, an optional lead image and one or more slots.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::arity::{ChildGrammar, Repeat, Shape};
use super::{Append, Heading, ImageSetPicture, LayoutChild, LayoutSlotChild, Node, push};
use crate::error::TreeError;

string_enum! {
    /// Width hint shared by layouts and custom code components. Defaults to `full-width`.
    LayoutWidth {
        Auto => "auto",
        InLine => "in-line",
        InsetLeft => "inset-left",
        InsetRight => "inset-right",
        FullBleed => "full-bleed",
        FullGrid => "full-grid",
        MidGrid => "mid-grid",
        #[default]
        FullWidth => "full-width",
    }
}

string_enum! {
    LayoutName {
        #[default]
        Auto => "auto",
        Card => "card",
        Timeline => "timeline",
    }
}

static LAYOUT_GRAMMAR: ChildGrammar = ChildGrammar::new(
    Layout::KIND,
    &[
        Shape(&[(Heading::KIND, Repeat::One), (LayoutSlot::KIND, Repeat::OneOrMore)]),
        Shape(&[
            (Heading::KIND, Repeat::One),
            (LayoutImage::KIND, Repeat::One),
            (LayoutSlot::KIND, Repeat::OneOrMore),
        ]),
        Shape(&[(LayoutSlot::KIND, Repeat::ZeroOrMore)]),
    ],
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(default)]
    pub layout_name: LayoutName,
    #[serde(default)]
    pub layout_width: LayoutWidth,
    #[serde(default, deserialize_with = "layout_children")]
    pub children: Vec<LayoutChild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Layout {
    pub fn new(layout_name: LayoutName, layout_width: LayoutWidth) -> Self {
        Layout {
            layout_name,
            layout_width,
            children: Vec::new(),
            data: None,
        }
    }

    /// Builds a layout from a complete child sequence, rejecting illegal shapes.
    pub fn with_children(
        layout_name: LayoutName,
        layout_width: LayoutWidth,
        children: Vec<LayoutChild>,
    ) -> Result<Self, TreeError> {
        let mut layout = Layout::new(layout_name, layout_width);
        for child in children {
            layout.append(child.into())?;
        }
        LAYOUT_GRAMMAR.check_complete(&layout.child_kinds())?;
        Ok(layout)
    }

    pub fn grammar() -> &'static ChildGrammar {
        &LAYOUT_GRAMMAR
    }

    pub(crate) fn child_kinds(&self) -> Vec<&'static str> {
        self.children.iter().map(LayoutChild::kind).collect()
    }
}

fn layout_children<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<LayoutChild>, D::Error> {
    LAYOUT_GRAMMAR.deserialize_children(deserializer)
}

impl Append for Layout {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn admits(&self, kind: &'static str) -> Result<(), TreeError> {
        LAYOUT_GRAMMAR.check_next(&self.child_kinds(), kind)
    }

    fn append(&mut self, child: Node) -> Result<(), TreeError> {
        self.admits(child.kind())?;
        push(Self::KIND, &mut self.children, child)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSlot {
    #[serde(default)]
    pub children: Vec<LayoutSlotChild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl LayoutSlot {
    pub fn new(children: Vec<LayoutSlotChild>) -> Self {
        LayoutSlot {
            children,
            data: None,
        }
    }
}

/// An image placed inside a layout. `id` is the image URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutImage {
    pub id: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub credit: String,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<ImageSetPicture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl LayoutImage {
    pub fn new(id: impl Into<String>) -> Self {
        LayoutImage {
            id: id.into(),
            ..Default::default()
        }
    }
}
