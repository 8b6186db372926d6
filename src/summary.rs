//! Kind-specific summaries attached to decoded messages.
//!
//! Field names serialize in camelCase, the shape renderers consume.

use serde::{Deserialize, Serialize};

use crate::markup::Node;

/// Image descriptor from an `<img>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub thumb_url: Option<String>,
    /// Mid-resolution URL, falling back to the thumbnail AES key.
    pub origin_url: Option<String>,
    pub file_key: Option<String>,
    pub md5: Option<String>,
}

/// Voice descriptor from a `<voicemsg>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceInfo {
    /// Duration in milliseconds, as stored.
    pub length: Option<String>,
    pub format: Option<String>,
    pub end_flag: Option<String>,
}

/// Animated emoji descriptor from an `<emoji>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmojiInfo {
    pub url: Option<String>,
    pub md5: Option<String>,
    pub width: u32,
    pub height: u32,
    pub desc: String,
}

/// Shared location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    pub x: String,
    pub y: String,
    pub scale: String,
    pub label: String,
    /// POI name, falling back to the label.
    pub poiname: String,
}

/// Merged chat-history card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeInfo {
    pub title: String,
    pub desc: String,
    /// Record list, passed through for the renderer.
    pub record: Option<Node>,
}

/// Red envelope card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedEnvelopeInfo {
    pub title: String,
    pub icon_url: String,
    pub inner_type: i64,
}

/// "Pat" nudge notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatInfo {
    pub title: String,
    pub template: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Quoted reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInfo {
    pub refer: ReferInfo,
}

/// The message a quote refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferInfo {
    #[serde(rename = "type")]
    pub refer_type: Option<String>,
    pub content: String,
    pub content_text: String,
    pub displayname: String,
    pub svrid: Option<String>,
}

/// Generic app-share card (links, articles, mini-programs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppMessageInfo {
    pub title: String,
    pub desc: String,
    pub url: String,
    pub cover: String,
    pub appname: String,
    pub sourcedisplayname: String,
    /// Present when the card references a mini-program.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapp: Option<WeappInfo>,
}

/// Mini-program reference. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeappInfo {
    pub appid: String,
    pub username: String,
    pub pagepath: String,
    pub icon: String,
}

/// Call mode of a voice/video call summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallMode {
    #[default]
    Voice,
    Video,
}

/// Voice/video call summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoipInfo {
    pub text: String,
    pub mode: CallMode,
    pub duration: String,
}
