//! Scrollytelling blocks: full-screen images with copy that scrolls over them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::arity::{ChildGrammar, Repeat, Shape};
use super::{
    Append, ImageSetPicture, Node, ScrollyCopyChild, ScrollySectionChild, Text, push,
};
use crate::error::TreeError;

string_enum! {
    ScrollyTheme {
        #[default]
        Sans => "sans",
        Serif => "serif",
    }
}

string_enum! {
    ScrollyDisplay {
        #[default]
        DarkBackground => "dark-background",
        LightBackground => "light-background",
    }
}

string_enum! {
    ScrollyPosition {
        Left => "left",
        #[default]
        Center => "center",
        Right => "right",
    }
}

string_enum! {
    ScrollyTransition {
        #[default]
        DelayBefore => "delay-before",
        DelayAfter => "delay-after",
    }
}

string_enum! {
    /// Rendered as `h1`, `h2` and `h3`.
    ScrollyHeadingLevel {
        Chapter => "chapter",
        #[default]
        Heading => "heading",
        Subheading => "subheading",
    }
}

impl ScrollyHeadingLevel {
    pub fn tag(self) -> &'static str {
        match self {
            ScrollyHeadingLevel::Chapter => "h1",
            ScrollyHeadingLevel::Heading => "h2",
            ScrollyHeadingLevel::Subheading => "h3",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(ScrollyHeadingLevel::Chapter),
            "h2" => Some(ScrollyHeadingLevel::Heading),
            "h3" => Some(ScrollyHeadingLevel::Subheading),
            _ => None,
        }
    }
}

static SECTION_GRAMMAR: ChildGrammar = ChildGrammar::new(
    ScrollySection::KIND,
    &[Shape(&[
        (ScrollyImage::KIND, Repeat::One),
        (ScrollyCopy::KIND, Repeat::ZeroOrMore),
    ])],
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollyBlock {
    #[serde(default)]
    pub theme: ScrollyTheme,
    #[serde(default, with = "super::tagged")]
    pub children: Vec<ScrollySection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollySection {
    #[serde(default)]
    pub display: ScrollyDisplay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_box: Option<bool>,
    #[serde(default)]
    pub position: ScrollyPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<ScrollyTransition>,
    #[serde(deserialize_with = "section_children")]
    pub children: Vec<ScrollySectionChild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ScrollySection {
    pub fn grammar() -> &'static ChildGrammar {
        &SECTION_GRAMMAR
    }

    pub(crate) fn child_kinds(&self) -> Vec<&'static str> {
        self.children.iter().map(ScrollySectionChild::kind).collect()
    }
}

fn section_children<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<ScrollySectionChild>, D::Error> {
    SECTION_GRAMMAR.deserialize_children(deserializer)
}

impl Append for ScrollySection {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn admits(&self, kind: &'static str) -> Result<(), TreeError> {
        SECTION_GRAMMAR.check_next(&self.child_kinds(), kind)
    }

    fn append(&mut self, child: Node) -> Result<(), TreeError> {
        self.admits(child.kind())?;
        push(Self::KIND, &mut self.children, child)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollyImage {
    pub id: String,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<ImageSetPicture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ScrollyImage {
    pub fn new(id: impl Into<String>) -> Self {
        ScrollyImage {
            id: id.into(),
            picture: None,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollyCopy {
    #[serde(default)]
    pub children: Vec<ScrollyCopyChild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollyHeading {
    pub level: ScrollyHeadingLevel,
    #[serde(default, with = "super::tagged")]
    pub children: Vec<Text>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ScrollyHeading {
    pub fn new(level: ScrollyHeadingLevel, children: Vec<Text>) -> Self {
        ScrollyHeading {
            level,
            children,
            data: None,
        }
    }
}
