//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::{OutputConfig, prepare};
use crate::error::Result;
use crate::message::DecodedMessage;

/// Writes messages to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"localType": 1, "kind": "text", "data": {"sender": "alice", "content": "hi"}},
///   {"localType": 3, "kind": "image", "data": {...}, "image": {"thumbUrl": "..."}}
/// ]
/// ```
pub fn write_json(
    messages: &[DecodedMessage],
    output_path: &str,
    config: &OutputConfig,
) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = BufWriter::new(File::create(output_path)?);
    file.write_all(json.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Converts messages to a JSON array string.
pub fn to_json(messages: &[DecodedMessage], config: &OutputConfig) -> Result<String> {
    let prepared: Vec<_> = messages.iter().map(|m| prepare(m, config)).collect();

    let json = if config.pretty {
        serde_json::to_string_pretty(&prepared)?
    } else {
        serde_json::to_string(&prepared)?
    };
    Ok(json)
}
