//! Block kinds: paragraphs, headings, lists, quotes and the other text-bearing blocks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BlockquoteChild, ListItemChild, Phrasing};

string_enum! {
    /// Heading depth. Rendered as `h1`, `h2` and `h4`.
    HeadingLevel {
        Chapter => "chapter",
        #[default]
        Subheading => "subheading",
        Label => "label",
    }
}

impl HeadingLevel {
    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::Chapter => "h1",
            HeadingLevel::Subheading => "h2",
            HeadingLevel::Label => "h4",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub children: Vec<Phrasing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Paragraph {
    pub fn new(children: Vec<Phrasing>) -> Self {
        Paragraph {
            children,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    pub level: HeadingLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment_identifier: Option<String>,
    #[serde(default)]
    pub children: Vec<Phrasing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Heading {
    pub fn new(level: HeadingLevel, children: Vec<Phrasing>) -> Self {
        Heading {
            level,
            fragment_identifier: None,
            children,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThematicBreak {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    #[serde(default, with = "super::tagged")]
    pub children: Vec<ListItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl List {
    pub fn new(ordered: bool, children: Vec<ListItem>) -> Self {
        List {
            ordered,
            children,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub children: Vec<ListItemChild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ListItem {
    pub fn new(children: Vec<ListItemChild>) -> Self {
        ListItem {
            children,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blockquote {
    #[serde(default)]
    pub children: Vec<BlockquoteChild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Blockquote {
    pub fn new(children: Vec<BlockquoteChild>) -> Self {
        Blockquote {
            children,
            data: None,
        }
    }
}

/// A pulled-out quotation with an optional attribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pullquote {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Pullquote {
    pub fn new(text: impl Into<String>, source: Option<String>) -> Self {
        Pullquote {
            text: text.into(),
            source,
            data: None,
        }
    }
}

/// A headline figure with a short description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BigNumber {
    pub number: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl BigNumber {
    pub fn new(number: impl Into<String>, description: impl Into<String>) -> Self {
        BigNumber {
            number: number.into(),
            description: description.into(),
            data: None,
        }
    }
}
