//! Inline kinds that make up [`Phrasing`] content.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Phrasing;

/// A run of character data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Text {
            value: value.into(),
            data: None,
        }
    }
}

/// A line break.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Break {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Strong {
    #[serde(default)]
    pub children: Vec<Phrasing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Strong {
    pub fn new(children: Vec<Phrasing>) -> Self {
        Strong {
            children,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    #[serde(default)]
    pub children: Vec<Phrasing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Emphasis {
    pub fn new(children: Vec<Phrasing>) -> Self {
        Emphasis {
            children,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Strikethrough {
    #[serde(default)]
    pub children: Vec<Phrasing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Strikethrough {
    pub fn new(children: Vec<Phrasing>) -> Self {
        Strikethrough {
            children,
            data: None,
        }
    }
}

/// A hyperlink. `title` is empty when the markup carries none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub children: Vec<Phrasing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Link {
    pub fn new(url: impl Into<String>, title: impl Into<String>, children: Vec<Phrasing>) -> Self {
        Link {
            url: url.into(),
            title: title.into(),
            children,
            data: None,
        }
    }
}
