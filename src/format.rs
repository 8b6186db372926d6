//! Output format selection.
//!
//! # Example
//!
//! ```rust
//! use wxdecode::format::OutputFormat;
//!
//! let format = OutputFormat::from_path("decoded.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! assert_eq!(format.extension(), "jsonl");
//! # Ok::<(), wxdecode::DecodeError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, Result};
use crate::message::DecodedMessage;
use crate::output::OutputConfig;

#[cfg(feature = "csv-output")]
const FORMAT_NAMES: &[&str] = &["json", "jsonl", "ndjson", "csv"];
#[cfg(not(feature = "csv-output"))]
const FORMAT_NAMES: &[&str] = &["json", "jsonl", "ndjson"];

/// Output format for decoded messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// JSON array of decoded messages
    #[default]
    Json,

    /// JSON Lines - one decoded message per line
    #[cfg_attr(feature = "cli", value(alias = "ndjson"))]
    Jsonl,

    /// CSV with semicolon delimiter, derived text only
    #[cfg(feature = "csv-output")]
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            #[cfg(feature = "csv-output")]
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        FORMAT_NAMES
    }

    /// Detects format from a file path based on extension.
    pub fn from_path(path: &str) -> Result<Self> {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();
        ext.parse().map_err(|_| {
            DecodeError::invalid_format(
                "output",
                format!(
                    "Unknown file extension: '.{}'. Expected one of: {}",
                    ext,
                    OutputFormat::all_names().join(", ")
                ),
            )
        })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            #[cfg(feature = "csv-output")]
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            #[cfg(feature = "csv-output")]
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes messages to a file in the specified format.
pub fn write_to_format(
    messages: &[DecodedMessage],
    output_path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        OutputFormat::Json => crate::output::write_json(messages, output_path, config),
        OutputFormat::Jsonl => crate::output::write_jsonl(messages, output_path, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::output::write_csv(messages, output_path, config),
    }
}

/// Converts messages to a string in the specified format.
pub fn to_format_string(
    messages: &[DecodedMessage],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    match format {
        OutputFormat::Json => crate::output::to_json(messages, config),
        OutputFormat::Jsonl => crate::output::to_jsonl(messages, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::output::to_csv(messages, config),
    }
}
