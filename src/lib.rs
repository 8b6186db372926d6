//! # wxdecode
//!
//! A Rust library for decoding WeChat v4 message records into normalized,
//! render-ready structures.
//!
//! ## Overview
//!
//! A v4 message row carries a packed type code and up to two embedded
//! payloads: plain `"sender:\ncontent"` text or an XML document. Decoding a
//! row:
//!
//! 1. strips a machine-generated sender tag and splits sender from content
//! 2. parses both payloads into [`Node`](markup::Node) trees
//! 3. runs the enrichers routed for the type code, each filling one
//!    kind-specific summary (image, voice, location, red envelope, quote,
//!    app share, ...)
//!
//! Decoding is total: malformed payloads are logged through `tracing` and
//! leave their summaries empty.
//!
//! ## Quick Start
//!
//! ```rust
//! use wxdecode::prelude::*;
//!
//! let record = MessageRecord::new(48).with_message_content(
//!     r#"<msg><location x="39.9" y="116.4" label="Beijing" poiname="Tiananmen"/></msg>"#,
//! );
//!
//! let decoded = decode_message(&record, "wxid_me");
//! let location = decoded.location.as_ref().unwrap();
//! assert_eq!(location.poiname, "Tiananmen");
//! assert_eq!(decoded.kind, MessageKind::Location);
//! ```
//!
//! ## Module Structure
//!
//! - [`decoder`] - [`Decoder`], [`decode_message`]
//! - [`dispatch`] - type code to enricher routing
//! - [`enrich`] - kind-specific enrichers
//! - [`resolver`] - memoized payload parsing, `msg/appmsg` lookup
//! - [`markup`] - [`MarkupParser`](markup::MarkupParser) and the XML implementation
//! - [`split`], [`text`] - sender/content splitting, text normalization
//! - [`message`], [`summary`], [`kind`] - record and result types
//! - [`config`] - [`DecoderConfig`](config::DecoderConfig)
//! - [`input`], [`output`], [`format`] - reading records, writing results
//! - `payload` - zstd column decoding (feature `compression`)
//! - `media` - image attachment paths (feature `media`)
//! - [`error`] - [`DecodeError`], [`Result`]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod decoder;
pub mod dispatch;
pub mod enrich;
pub mod error;
pub mod format;
pub mod input;
pub mod kind;
pub mod markup;
#[cfg(feature = "media")]
pub mod media;
pub mod message;
pub mod output;
#[cfg(feature = "compression")]
pub mod payload;
pub mod resolver;
pub mod split;
pub mod summary;
pub mod text;

pub use decoder::{Decoder, decode_message};
pub use error::{DecodeError, Result};
pub use message::{DecodedMessage, Derived, MessageRecord};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use wxdecode::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::DecoderConfig;
    pub use crate::decoder::{Decoder, decode_message};
    pub use crate::error::{DecodeError, Result};
    pub use crate::format::{OutputFormat, write_to_format};
    pub use crate::input::{parse_records, read_records};
    pub use crate::kind::MessageKind;
    pub use crate::markup::{MarkupParser, Node, XmlParser};
    pub use crate::message::{DecodedMessage, Derived, MessageRecord};
    pub use crate::output::{OutputConfig, to_json, to_jsonl, write_json, write_jsonl};
    #[cfg(feature = "csv-output")]
    pub use crate::output::{to_csv, write_csv};
    pub use crate::summary::CallMode;
}
