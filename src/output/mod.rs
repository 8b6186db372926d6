//! Output writers for decoded messages.
//!
//! - [`write_json`] / [`to_json`] - JSON array of messages
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one message per line
//! - [`write_csv`] / [`to_csv`] - semicolon-delimited CSV of the derived
//!   text (requires the `csv-output` feature)
//!
//! JSON output carries every summary. Parse trees are large and only
//! included with [`OutputConfig::with_trees`].
//!
//! # Example
//!
//! ```rust,no_run
//! use wxdecode::output::{OutputConfig, write_json, write_jsonl};
//! use wxdecode::{MessageRecord, decode_message};
//!
//! let record = MessageRecord::new(1).with_message_content("alice:\nhi");
//! let messages = vec![decode_message(&record, "me")];
//!
//! write_json(&messages, "decoded.json", &OutputConfig::new().with_pretty())?;
//! write_jsonl(&messages, "decoded.jsonl", &OutputConfig::new())?;
//! # Ok::<(), wxdecode::DecodeError>(())
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod json_writer;
mod jsonl_writer;

use std::borrow::Cow;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
pub use json_writer::{to_json, write_json};
pub use jsonl_writer::{to_jsonl, write_jsonl};

use crate::message::DecodedMessage;

/// Controls what the writers emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Include the parsed payload trees in JSON output
    pub include_trees: bool,
    /// Pretty-print JSON arrays
    pub pretty: bool,
    /// Add a formatted send-time column to CSV output
    pub include_timestamps: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_trees(mut self) -> Self {
        self.include_trees = true;
        self
    }

    #[must_use]
    pub fn with_pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }
}

/// Applies `config` to `message` for JSON serialization.
fn prepare<'a>(message: &'a DecodedMessage, config: &OutputConfig) -> Cow<'a, DecodedMessage> {
    let has_trees = message.message_content.is_some() || message.compress_content.is_some();
    if config.include_trees || !has_trees {
        Cow::Borrowed(message)
    } else {
        Cow::Owned(message.clone().without_trees())
    }
}
