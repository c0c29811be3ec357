//! Timelines of dated events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TimelineEventChild;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default)]
    pub title: String,
    #[serde(default, with = "super::tagged")]
    pub children: Vec<TimelineEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Timeline {
    pub fn new(title: impl Into<String>, children: Vec<TimelineEvent>) -> Self {
        Timeline {
            title: title.into(),
            children,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub children: Vec<TimelineEventChild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl TimelineEvent {
    pub fn new(title: impl Into<String>, children: Vec<TimelineEventChild>) -> Self {
        TimelineEvent {
            title: title.into(),
            children,
            data: None,
        }
    }
}
