//! Reading message records from files.
//!
//! Two layouts are accepted:
//! - a JSON array of records
//! - JSON Lines, one record per line (blank lines are skipped)
//!
//! The layout is detected from the first non-whitespace character.
//!
//! # Example
//!
//! ```rust
//! use wxdecode::input::parse_records;
//!
//! let array = r#"[{"local_type": 1, "message_content": "alice:\nhi"}]"#;
//! let lines = "{\"local_type\": 1}\n\n{\"local_type\": 3}\n";
//!
//! assert_eq!(parse_records(array)?.len(), 1);
//! assert_eq!(parse_records(lines)?.len(), 2);
//! # Ok::<(), wxdecode::DecodeError>(())
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{DecodeError, Result};
use crate::message::MessageRecord;

/// Reads records from a JSON array or JSON Lines file.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<MessageRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let records = parse_records(&content).map_err(|e| e.with_path(path))?;
    debug!(path = %path.display(), count = records.len(), "read records");
    Ok(records)
}

/// Parses records from a JSON array or JSON Lines string.
pub fn parse_records(content: &str) -> Result<Vec<MessageRecord>> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| DecodeError::invalid_format("record file", e.to_string()));
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| {
                DecodeError::invalid_format("record file", format!("line {}: {}", index + 1, e))
            })
        })
        .collect()
}
