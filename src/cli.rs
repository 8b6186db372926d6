//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::format::OutputFormat;

/// Default output path; its extension follows `--format`.
pub const DEFAULT_OUTPUT: &str = "decoded.json";

/// Decode WeChat v4 message records into render-ready JSON, JSONL, or CSV.
#[derive(Parser, Debug, Clone)]
#[command(name = "wxdecode")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    wxdecode messages.json
    wxdecode messages.jsonl -o decoded.jsonl -f jsonl
    wxdecode messages.json --sender wxid_me --with-trees --pretty
    wxdecode messages.json -f csv
    RUST_LOG=wxdecode=debug wxdecode messages.json")]
pub struct Args {
    /// Records file (JSON array or JSON Lines)
    pub input: PathBuf,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Sender used when a payload names none (usually the account owner)
    #[arg(long, value_name = "ID", default_value = "")]
    pub sender: String,

    /// Decoder configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Include parsed payload trees in JSON output
    #[arg(long)]
    pub with_trees: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Add a send-time column to CSV output
    #[arg(short = 't', long)]
    pub timestamps: bool,
}

impl Args {
    /// Output path, with the extension adjusted to the format when the
    /// default path is in use.
    pub fn output_path(&self) -> String {
        if self.output == DEFAULT_OUTPUT {
            format!("decoded.{}", self.format.extension())
        } else {
            self.output.clone()
        }
    }
}
