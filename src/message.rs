//! Message records and their decoded form.
//!
//! [`MessageRecord`] is a row as the storage layer hands it over: a type
//! code plus up to two embedded payloads. [`DecodedMessage`] is what the
//! decoder returns for it: the sender/content split, the parsed payload
//! trees, and at most two kind-specific summaries.
//!
//! # Example
//!
//! ```
//! use wxdecode::MessageRecord;
//!
//! let record = MessageRecord::new(1)
//!     .with_message_content("alice:\nhello")
//!     .with_local_id(42);
//!
//! assert_eq!(record.local_type, 1);
//! assert_eq!(record.message_content.as_deref(), Some("alice:\nhello"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kind::MessageKind;
use crate::markup::Node;
use crate::summary::{
    AppMessageInfo, EmojiInfo, ImageInfo, LocationInfo, MergeInfo, PatInfo, QuoteInfo,
    RedEnvelopeInfo, VoiceInfo, VoipInfo,
};

/// A raw message row.
///
/// The decoder only borrows records; nothing here is modified by decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Row id in the local message table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_id: Option<i64>,

    /// Server-side message id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<i64>,

    /// Packed type code selecting which enrichers run.
    pub local_type: i64,

    /// Send time as unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,

    /// Sender username joined in by the storage layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,

    /// Primary payload: markup, or plain `"sender:\ncontent"` text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_content: Option<String>,

    /// Fallback payload with the same shape as `message_content`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress_content: Option<String>,
}

impl MessageRecord {
    /// Creates a record with the given type code and no payloads.
    pub fn new(local_type: i64) -> Self {
        Self {
            local_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_message_content(mut self, content: impl Into<String>) -> Self {
        self.message_content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_compress_content(mut self, content: impl Into<String>) -> Self {
        self.compress_content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_local_id(mut self, id: i64) -> Self {
        self.local_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_server_id(mut self, id: i64) -> Self {
        self.server_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_create_time(mut self, unix_seconds: i64) -> Self {
        self.create_time = Some(unix_seconds);
        self
    }

    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Returns the send time, if present and in range.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.create_time
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

/// Sender and content separated from the primary payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derived {
    pub sender: String,
    pub content: String,
}

impl Derived {
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
        }
    }
}

/// The decoded, render-ready form of a [`MessageRecord`].
///
/// Summary slots are `None` unless their enricher ran and found data; they
/// are omitted from serialized output when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_id: Option<i64>,
    pub local_type: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    /// Semantic kind of `local_type`.
    pub kind: MessageKind,

    /// Sender/content split, possibly refined by an enricher.
    pub data: Derived,

    /// Parse tree of the primary payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_content: Option<Node>,
    /// Parse tree of the fallback payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compress_content: Option<Node>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<EmojiInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<MergeInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red_envelope: Option<RedEnvelopeInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pat: Option<PatInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<QuoteInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_msg: Option<AppMessageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voip: Option<VoipInfo>,
}

impl DecodedMessage {
    /// Starts a decoded message carrying the record's identity fields.
    pub fn from_record(record: &MessageRecord, data: Derived) -> Self {
        Self {
            local_id: record.local_id,
            server_id: record.server_id,
            local_type: record.local_type,
            create_time: record.create_time,
            data,
            ..Self::default()
        }
    }

    pub fn sender(&self) -> &str {
        &self.data.sender
    }

    pub fn content(&self) -> &str {
        &self.data.content
    }

    /// Number of kind-specific summaries present.
    pub fn summary_count(&self) -> usize {
        [
            self.image.is_some(),
            self.voice.is_some(),
            self.video.is_some(),
            self.emoji.is_some(),
            self.location.is_some(),
            self.merge.is_some(),
            self.red_envelope.is_some(),
            self.pat.is_some(),
            self.quote.is_some(),
            self.app_msg.is_some(),
            self.voip.is_some(),
        ]
        .into_iter()
        .filter(|&present| present)
        .count()
    }

    /// Drops the parse trees, keeping only derived data and summaries.
    #[must_use]
    pub fn without_trees(mut self) -> Self {
        self.message_content = None;
        self.compress_content = None;
        self
    }
}
