//! # wxdecode CLI
//!
//! Command-line interface for the wxdecode library.

use std::fs;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use wxdecode::cli::Args;
use wxdecode::config::DecoderConfig;
use wxdecode::decoder::Decoder;
use wxdecode::format::write_to_format;
use wxdecode::input::read_records;
use wxdecode::output::OutputConfig;
use wxdecode::{DecodeError, DecodedMessage};

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), DecodeError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    let output_path = args.output_path();

    println!("📦 wxdecode v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", args.format);
    if !args.sender.is_empty() {
        println!("👤 Sender:  {}", args.sender);
    }

    let decoder = match &args.config {
        Some(path) => {
            println!("⚙️  Config:  {}", path.display());
            Decoder::with_config(load_config(path)?)?
        }
        None => Decoder::new(),
    };
    println!();

    println!("⏳ Reading records...");
    let read_start = Instant::now();
    let records = read_records(&args.input)?;
    println!(
        "   Found {} records ({:.2}s)",
        records.len(),
        read_start.elapsed().as_secs_f64()
    );

    println!("🔍 Decoding...");
    let decode_start = Instant::now();
    let messages = decoder.decode_all(&records, &args.sender);
    let enriched = messages.iter().filter(|m| m.summary_count() > 0).count();
    println!(
        "   {} enriched, {} plain ({:.2}s)",
        enriched,
        messages.len() - enriched,
        decode_start.elapsed().as_secs_f64()
    );

    let mut output_config = OutputConfig::new();
    if args.with_trees {
        output_config = output_config.with_trees();
    }
    if args.pretty {
        output_config = output_config.with_pretty();
    }
    if args.timestamps {
        output_config = output_config.with_timestamps();
    }

    println!("💾 Writing {}...", args.format);
    let write_start = Instant::now();
    write_to_format(&messages, &output_path, args.format, &output_config)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Output saved to {}", output_path);
    print_summary(&messages);

    let total_time = total_start.elapsed();
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    #[allow(clippy::cast_precision_loss)]
    let per_sec = messages.len() as f64 / total_time.as_secs_f64().max(f64::EPSILON);
    println!("   Throughput:  {:.0} records/sec", per_sec);

    Ok(())
}

fn load_config(path: &std::path::Path) -> Result<DecoderConfig, DecodeError> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        DecodeError::invalid_format("decoder config", e.to_string()).with_path(path)
    })
}

/// Prints message counts per kind, most frequent first.
fn print_summary(messages: &[DecodedMessage]) {
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for message in messages {
        let kind = message.kind.as_str();
        match counts.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, n)) => *n += 1,
            None => counts.push((kind, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    println!();
    println!("📊 Summary:");
    println!("   Records:   {}", messages.len());
    for (kind, n) in counts {
        println!("   {:<18} {}", kind, n);
    }
}
