//! Embedded media and external content: images, teasers, tweets, charts, video and clips.
//!
//! Fields documented as *external* are resolved from other services after the body is stored.
//! They are absent in a transit tree and present in a full tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::LayoutWidth;

string_enum! {
    ImageType {
        #[default]
        Image => "image",
        Graphic => "graphic",
    }
}

string_enum! {
    ImageFormat {
        Desktop => "desktop",
        Mobile => "mobile",
        Square => "square",
        SquareFtEdit => "square-ftedit",
        #[default]
        Standard => "standard",
        Wide => "wide",
        StandardInline => "standard-inline",
    }
}

string_enum! {
    TeaserType {
        #[default]
        Article => "article",
        Video => "video",
        Podcast => "podcast",
        Audio => "audio",
        Package => "package",
        Liveblog => "liveblog",
        PromotedContent => "promoted-content",
        PaidPost => "paid-post",
    }
}

string_enum! {
    /// Width of a Flourish chart. Defaults to `in-line`.
    FlourishLayoutWidth {
        #[default]
        InLine => "in-line",
        FullGrid => "full-grid",
    }
}

string_enum! {
    /// Width of a clip set. Defaults to `in-line`.
    ClipSetLayoutWidth {
        #[default]
        InLine => "in-line",
        MidGrid => "mid-grid",
        FullGrid => "full-grid",
    }
}

string_enum! {
    ClipFormat {
        #[default]
        StandardInline => "standard-inline",
        Mobile => "mobile",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    pub url: String,
    pub width: u32,
    pub dpr: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_set: Option<Vec<ImageSource>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSetPicture {
    pub layout_width: String,
    pub image_type: ImageType,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub credit: String,
    #[serde(default)]
    pub images: Vec<Image>,
    pub fallback_image: Image,
}

/// A set of image renditions referenced by content id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSet {
    pub id: String,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<ImageSetPicture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ImageSet {
    pub fn new(id: impl Into<String>) -> Self {
        ImageSet {
            id: id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeaserConcept {
    pub id: String,
    pub api_url: String,
    pub direct_type: String,
    pub pref_label: String,
    #[serde(default)]
    pub types: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeaserImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teaser {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub teaser_type: TeaserType,
    pub title: String,
    #[serde(default)]
    pub standfirst: String,
    pub published_date: String,
    pub first_published_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_link: Option<TeaserConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_alt_link: Option<TeaserConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_prefix_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_suffix_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<TeaserImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
}

/// A recommended-reading link to another piece of content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommended {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teaser_title_override: Option<String>,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teaser: Option<Teaser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Recommended {
    pub fn new(id: impl Into<String>) -> Self {
        Recommended {
            id: id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    /// The tweet URL.
    pub id: String,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Tweet {
    pub fn new(id: impl Into<String>) -> Self {
        Tweet {
            id: id.into(),
            html: None,
            data: None,
        }
    }
}

/// A Flourish chart embed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flourish {
    pub id: String,
    #[serde(default)]
    pub layout_width: FlourishLayoutWidth,
    #[serde(default)]
    pub flourish_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment_identifier: Option<String>,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Flourish {
    pub fn new(id: impl Into<String>, flourish_type: impl Into<String>) -> Self {
        Flourish {
            id: id.into(),
            flourish_type: flourish_type.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub embedded: bool,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Video {
    pub fn new(id: impl Into<String>, embedded: bool) -> Self {
        Video {
            id: id.into(),
            embedded,
            title: None,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YoutubeVideo {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl YoutubeVideo {
    pub fn new(url: impl Into<String>) -> Self {
        YoutubeVideo {
            url: url.into(),
            data: None,
        }
    }
}

/// A value of a custom code component attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Text(String),
}

/// A versioned, separately hosted component embedded in the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCodeComponent {
    pub id: String,
    #[serde(default)]
    pub layout_width: LayoutWidth,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_range: Option<String>,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes_last_modified: Option<String>,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, AttributeValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl CustomCodeComponent {
    pub fn new(id: impl Into<String>, layout_width: LayoutWidth) -> Self {
        CustomCodeComponent {
            id: id.into(),
            layout_width,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipSource {
    pub url: String,
    pub media_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: String,
    pub format: ClipFormat,
    #[serde(default)]
    pub data_source: Vec<ClipSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

/// A set of short looping video clips. It has no bodyXML form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipSet {
    pub id: String,
    #[serde(default)]
    pub autoplay: bool,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub layout_width: ClipSetLayoutWidth,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clips: Option<Vec<Clip>>,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<String>,
    /// External.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ClipSet {
    pub fn new(id: impl Into<String>) -> Self {
        ClipSet {
            id: id.into(),
            ..Default::default()
        }
    }
}
