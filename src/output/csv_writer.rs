//! CSV output writer.

use std::fs::File;
use std::io::Write;

use chrono::DateTime;

use super::OutputConfig;
use crate::error::Result;
use crate::message::DecodedMessage;

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `local_id`, `type`, `kind`, `sender`, `content`
///   - With timestamps: `time` (UTC, `%Y-%m-%d %H:%M:%S`) after `kind`
/// - Encoding: UTF-8
///
/// Summaries and trees are not written; `content` is the derived text.
pub fn write_csv(
    messages: &[DecodedMessage],
    output_path: &str,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, messages, config)
}

/// Converts messages to a CSV string.
pub fn to_csv(messages: &[DecodedMessage], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, messages, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(
    sink: W,
    messages: &[DecodedMessage],
    config: &OutputConfig,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = vec!["local_id", "type", "kind"];
    if config.include_timestamps {
        header.push("time");
    }
    header.extend(["sender", "content"]);
    header
}

fn build_record(msg: &DecodedMessage, config: &OutputConfig) -> Vec<String> {
    let mut record = vec![
        msg.local_id.map(|id| id.to_string()).unwrap_or_default(),
        msg.local_type.to_string(),
        msg.kind.to_string(),
    ];

    if config.include_timestamps {
        record.push(
            msg.create_time
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        );
    }

    record.push(msg.data.sender.clone());
    record.push(msg.data.content.clone());
    record
}
