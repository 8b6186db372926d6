//! JSON Lines (JSONL) output writer.
//!
//! One decoded message per line, which suits streaming consumers and
//! line-oriented tools.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::{OutputConfig, prepare};
use crate::error::Result;
use crate::message::DecodedMessage;

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a compact JSON object. `pretty` is ignored.
pub fn write_jsonl(
    messages: &[DecodedMessage],
    output_path: &str,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, messages, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl(messages: &[DecodedMessage], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(&mut buffer, messages, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(
    writer: &mut W,
    messages: &[DecodedMessage],
    config: &OutputConfig,
) -> Result<()> {
    for msg in messages {
        serde_json::to_writer(&mut *writer, &prepare(msg, config))?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MessageRecord, decode_message};
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_jsonl_basic() {
        let messages = vec![
            decode_message(&MessageRecord::new(1).with_message_content("alice:\nHello"), "me"),
            decode_message(&MessageRecord::new(1).with_message_content("Hi"), "me"),
        ];

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        write_jsonl(&messages, path, &OutputConfig::new().with_pretty()).unwrap();

        let file = std::fs::File::open(path).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["data"]["sender"], "alice");
        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["data"]["sender"], "me");
        assert_eq!(second["data"]["content"], "Hi");
    }

    #[test]
    fn test_to_jsonl_empty() {
        assert_eq!(to_jsonl(&[], &OutputConfig::new()).unwrap(), "");
    }
}
