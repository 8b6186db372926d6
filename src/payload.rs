//! Storage column decoding.
//!
//! The message table stores payloads as raw bytes. Some rows hold plain
//! UTF-8, others a zstd frame wrapping it. [`ColumnDecoder`] detects the
//! frame magic and decompresses before decoding text.
//!
//! # Example
//!
//! ```rust
//! use wxdecode::MessageRecord;
//! use wxdecode::payload::decode_column;
//!
//! let compressed = zstd::encode_all(&b"<msg/>"[..], 0)?;
//! assert_eq!(decode_column("compress_content", &compressed)?, "<msg/>");
//! assert_eq!(decode_column("message_content", b"hello")?, "hello");
//!
//! let record = MessageRecord::from_columns(
//!     1,
//!     Some(&b"alice:\nhi"[..]),
//!     Some(compressed.as_slice()),
//! )?;
//! assert_eq!(record.compress_content.as_deref(), Some("<msg/>"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use tracing::trace;

use crate::error::{DecodeError, Result};
use crate::message::MessageRecord;

/// Leading bytes of a zstd frame.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Returns `true` if `bytes` starts with a zstd frame header.
pub fn is_zstd(bytes: &[u8]) -> bool {
    bytes.starts_with(&ZSTD_MAGIC)
}

/// Decodes storage columns into text.
///
/// Strict by default: invalid UTF-8 is an error. With
/// [`with_lossy`](Self::with_lossy), invalid sequences become U+FFFD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnDecoder {
    lossy: bool,
}

impl ColumnDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_lossy(mut self, lossy: bool) -> Self {
        self.lossy = lossy;
        self
    }

    /// Decodes one column. `column` names it in errors.
    pub fn decode(&self, column: &'static str, bytes: &[u8]) -> Result<String> {
        let raw = if is_zstd(bytes) {
            trace!(column, len = bytes.len(), "decompressing zstd column");
            zstd::decode_all(bytes)
                .map_err(|source| DecodeError::Decompress { column, source })?
        } else {
            bytes.to_vec()
        };

        if self.lossy {
            return Ok(String::from_utf8_lossy(&raw).into_owned());
        }
        String::from_utf8(raw).map_err(|source| DecodeError::Utf8 { column, source })
    }

    /// Builds a record from raw payload columns.
    pub fn record(
        &self,
        local_type: i64,
        message_content: Option<&[u8]>,
        compress_content: Option<&[u8]>,
    ) -> Result<MessageRecord> {
        let mut record = MessageRecord::new(local_type);
        record.message_content = message_content
            .map(|bytes| self.decode("message_content", bytes))
            .transpose()?;
        record.compress_content = compress_content
            .map(|bytes| self.decode("compress_content", bytes))
            .transpose()?;
        Ok(record)
    }
}

/// Decodes one column strictly.
pub fn decode_column(column: &'static str, bytes: &[u8]) -> Result<String> {
    ColumnDecoder::new().decode(column, bytes)
}

impl MessageRecord {
    /// Builds a record from raw payload columns, decoding strictly.
    pub fn from_columns(
        local_type: i64,
        message_content: Option<&[u8]>,
        compress_content: Option<&[u8]>,
    ) -> Result<Self> {
        ColumnDecoder::new().record(local_type, message_content, compress_content)
    }
}
