//! Decoder configuration.
//!
//! [`DecoderConfig`] holds the values that come from the originating client
//! rather than from the decoder's logic: which type codes denote
//! application-message cards, which sender prefixes are machine-generated,
//! and the placeholder labels used when a payload carries no text.
//!
//! # Example
//!
//! ```rust
//! use wxdecode::config::DecoderConfig;
//! use wxdecode::decoder::Decoder;
//!
//! let config = DecoderConfig::new()
//!     .with_app_message_type(99)
//!     .with_location_label("Location");
//!
//! let decoder = Decoder::with_config(config)?;
//! # Ok::<(), wxdecode::DecodeError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::kind::DEFAULT_APP_MESSAGE_TYPES;

/// Configuration for [`Decoder`](crate::decoder::Decoder).
///
/// Deserializes from partial documents; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Type codes of card-style application messages (links, articles,
    /// mini-programs). Each receives the app-share summary.
    pub app_message_types: Vec<i64>,

    /// Patterns matched case-insensitively against the text before the first
    /// `":\n"` of the primary payload. A match marks a machine-generated
    /// sender tag, which is stripped before splitting and parsing.
    pub automated_prefix_patterns: Vec<String>,

    /// Content used for a location with neither POI name nor label.
    pub location_label: String,

    /// Title used for a merged transcript without one.
    pub chat_history_label: String,

    /// Title used for a red envelope without one.
    pub red_envelope_label: String,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            app_message_types: DEFAULT_APP_MESSAGE_TYPES.to_vec(),
            automated_prefix_patterns: vec!["^(wxid_|wx_)".to_string()],
            location_label: "位置".to_string(),
            chat_history_label: "聊天记录".to_string(),
            red_envelope_label: "微信红包".to_string(),
        }
    }
}

impl DecoderConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type code to the application-message set.
    #[must_use]
    pub fn with_app_message_type(mut self, type_code: i64) -> Self {
        if !self.app_message_types.contains(&type_code) {
            self.app_message_types.push(type_code);
        }
        self
    }

    /// Replaces the application-message set.
    #[must_use]
    pub fn with_app_message_types(mut self, type_codes: impl IntoIterator<Item = i64>) -> Self {
        self.app_message_types = type_codes.into_iter().collect();
        self
    }

    /// Adds an automated-sender prefix pattern.
    #[must_use]
    pub fn with_automated_prefix_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.automated_prefix_patterns.push(pattern.into());
        self
    }

    /// Sets the placeholder content for unnamed locations.
    #[must_use]
    pub fn with_location_label(mut self, label: impl Into<String>) -> Self {
        self.location_label = label.into();
        self
    }

    /// Sets the placeholder title for merged transcripts.
    #[must_use]
    pub fn with_chat_history_label(mut self, label: impl Into<String>) -> Self {
        self.chat_history_label = label.into();
        self
    }

    /// Sets the placeholder title for red envelopes.
    #[must_use]
    pub fn with_red_envelope_label(mut self, label: impl Into<String>) -> Self {
        self.red_envelope_label = label.into();
        self
    }
}
