//! Unified error types for wxdecode.
//!
//! Decoding a single message never fails: markup problems inside a record are
//! logged and degrade that record's enrichment. The errors here cover the
//! surfaces around the decoder: reading record files, decoding storage
//! columns, compiling configuration, and writing output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for wxdecode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// The error type for all fallible wxdecode operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// An I/O error occurred while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A compressed storage column could not be decompressed.
    #[error("Failed to decompress {column} column: {source}")]
    Decompress {
        /// Name of the column being decoded
        column: &'static str,
        #[source]
        source: io::Error,
    },

    /// A storage column is not valid UTF-8.
    #[error("UTF-8 encoding error in {column} column: {source}")]
    Utf8 {
        /// Name of the column being decoded
        column: &'static str,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Input or configuration doesn't have the expected shape.
    #[error("Invalid {format}: {message}{}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    InvalidFormat {
        /// What was being read (e.g., "record file", "prefix pattern")
        format: &'static str,
        /// Description of what's wrong
        message: String,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<std::string::FromUtf8Error> for DecodeError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        DecodeError::Utf8 {
            column: "output",
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl DecodeError {
    /// Creates an invalid format error without a path.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        DecodeError::InvalidFormat {
            format,
            message: message.into(),
            path: None,
        }
    }

    /// Attaches a file path to an [`InvalidFormat`](DecodeError::InvalidFormat) error.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            DecodeError::InvalidFormat {
                format, message, ..
            } => DecodeError::InvalidFormat {
                format,
                message,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, DecodeError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, DecodeError::InvalidFormat { .. })
    }
}
