//! End-to-end CLI tests for wxdecode.
//!
//! These tests run the actual binary against record files in a temporary
//! directory and check the written output.
//!
//! # Test Categories
//!
//! - **Basic functionality**: JSON array and JSON Lines input
//! - **Output formats**: JSON, JSONL, CSV generation
//! - **Flags**: sender, trees, pretty printing, config file
//! - **Error handling**: Proper error messages for bad input
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Creates a temporary directory with record files.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    let records = r#"[
  {"local_id": 1, "local_type": 1, "create_time": 1718454600, "message_content": "alice:\nHello there"},
  {"local_id": 2, "local_type": 48, "create_time": 1718454660, "message_content": "<msg><location x=\"39.9\" y=\"116.4\" label=\"Beijing\" poiname=\"Tiananmen\"/></msg>"},
  {"local_id": 3, "local_type": 244813135921, "message_content": "wxid_bob:\n<msg><appmsg><title>agreed</title><refermsg><displayname>Alice</displayname><content>lunch?</content></refermsg></appmsg></msg>"},
  {"local_id": 4, "local_type": 50, "message_content": "<voipmsg><VoIPBubbleMsg><msg>视频通话 00:42</msg></VoIPBubbleMsg></voipmsg>"},
  {"local_id": 5, "local_type": 99, "message_content": "<msg><appmsg><title>Custom card</title></appmsg></msg>"}
]"#;
    fs::write(dir.path().join("records.json"), records).unwrap();

    let jsonl = concat!(
        r#"{"local_id": 1, "local_type": 1, "message_content": "hi"}"#,
        "\n\n",
        r#"{"local_id": 2, "local_type": 3, "message_content": "<msg><img md5=\"abc\" cdnthumburl=\"t\"/></msg>"}"#,
        "\n",
    );
    fs::write(dir.path().join("records.jsonl"), jsonl).unwrap();

    fs::write(
        dir.path().join("config.json"),
        r#"{"app_message_types": [99], "location_label": "Pin"}"#,
    )
    .unwrap();

    fs::write(dir.path().join("empty.json"), "").unwrap();
    fs::write(dir.path().join("broken.json"), "[{\"local_type\": 1,").unwrap();
    fs::write(
        dir.path().join("bad_config.json"),
        r#"{"automated_prefix_patterns": ["("]}"#,
    )
    .unwrap();

    dir
}

fn wxdecode_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_wxdecode"));
    Command::from_std(cmd)
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn run(fixtures: &TempDir, input: &str, output: &str, extra: &[&str]) -> String {
    let input = fixtures.path().join(input);
    let output = output_path(fixtures, output);

    wxdecode_cmd()
        .arg(input.to_str().unwrap())
        .args(["-o", output.to_str().unwrap()])
        .args(extra)
        .assert()
        .success()
        .stdout(predicate::str::contains("Done"));

    fs::read_to_string(&output).unwrap()
}

fn parse_json(content: &str) -> Vec<serde_json::Value> {
    serde_json::from_str(content).expect("output is a JSON array")
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_json_array_input() {
        let fixtures = setup_fixtures();
        let content = run(&fixtures, "records.json", "out.json", &[]);

        let messages = parse_json(&content);
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0]["data"]["sender"], "alice");
        assert_eq!(messages[0]["data"]["content"], "Hello there");
        assert_eq!(messages[1]["location"]["poiname"], "Tiananmen");
        assert_eq!(messages[1]["kind"], "location");
        assert_eq!(messages[3]["voip"]["mode"], "video");
    }

    #[test]
    fn test_jsonl_input_skips_blank_lines() {
        let fixtures = setup_fixtures();
        let content = run(&fixtures, "records.jsonl", "out.json", &[]);

        let messages = parse_json(&content);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1]["image"]["md5"], "abc");
    }

    #[test]
    fn test_quote_record() {
        let fixtures = setup_fixtures();
        let content = run(&fixtures, "records.json", "out.json", &[]);

        let quote = &parse_json(&content)[2];
        assert_eq!(quote["data"]["content"], "agreed");
        assert_eq!(quote["quote"]["refer"]["displayname"], "Alice");
        assert_eq!(quote["kind"], "quote");
        assert!(quote.get("appMsg").is_none());
    }

    #[test]
    fn test_summary_printed() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("records.json");
        let output = output_path(&fixtures, "out.json");

        wxdecode_cmd()
            .args([input.to_str().unwrap(), "-o", output.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Found 5 records"))
            .stdout(predicate::str::contains("Summary"))
            .stdout(predicate::str::contains("location"));
    }

    #[test]
    fn test_trees_omitted_by_default() {
        let fixtures = setup_fixtures();
        let content = run(&fixtures, "records.json", "out.json", &[]);

        assert!(!content.contains("messageContent"));
    }
}

// ============================================================================
// Output Format Tests
// ============================================================================

mod output_formats {
    use super::*;

    #[test]
    fn test_output_jsonl() {
        let fixtures = setup_fixtures();
        let content = run(&fixtures, "records.json", "out.jsonl", &["-f", "jsonl"]);

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["localType"].is_i64());
        }
    }

    #[test]
    fn test_ndjson_alias() {
        let fixtures = setup_fixtures();
        let content = run(&fixtures, "records.json", "out.ndjson", &["--format", "ndjson"]);
        assert_eq!(content.lines().count(), 5);
    }

    #[test]
    fn test_output_csv() {
        let fixtures = setup_fixtures();
        let content = run(&fixtures, "records.json", "out.csv", &["-f", "csv"]);

        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("local_id;type;kind;sender;content"));
        assert!(content.contains("1;1;text;alice;Hello there"));
    }

    #[test]
    fn test_csv_timestamps() {
        let fixtures = setup_fixtures();
        let content = run(&fixtures, "records.json", "out.csv", &["-f", "csv", "-t"]);

        assert!(content.starts_with("local_id;type;kind;time;sender;content"));
        assert!(content.contains("2024-06-15 12:30:00"));
    }

    #[test]
    fn test_default_output_filename_changes_with_format() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("records.json");

        wxdecode_cmd()
            .current_dir(fixtures.path())
            .args([input.to_str().unwrap(), "-f", "jsonl"])
            .assert()
            .success()
            .stdout(predicate::str::contains("decoded.jsonl"));

        assert!(fixtures.path().join("decoded.jsonl").exists());
    }
}

// ============================================================================
// Flag Tests
// ============================================================================

mod flags {
    use super::*;

    #[test]
    fn test_sender_flag() {
        let fixtures = setup_fixtures();
        let content = run(&fixtures, "records.json", "out.json", &["--sender", "wxid_me"]);

        let messages = parse_json(&content);
        assert_eq!(messages[1]["data"]["sender"], "wxid_me");
        assert_eq!(messages[0]["data"]["sender"], "alice");
    }

    #[test]
    fn test_with_trees_flag() {
        let fixtures = setup_fixtures();
        let content = run(&fixtures, "records.json", "out.json", &["--with-trees"]);

        let messages = parse_json(&content);
        assert_eq!(
            messages[1]["messageContent"]["msg"]["location"]["@poiname"],
            "Tiananmen"
        );
    }

    #[test]
    fn test_pretty_flag() {
        let fixtures = setup_fixtures();
        let compact = run(&fixtures, "records.json", "compact.json", &[]);
        let pretty = run(&fixtures, "records.json", "pretty.json", &["--pretty"]);

        assert!(pretty.lines().count() > compact.lines().count());
        assert_eq!(parse_json(&pretty), parse_json(&compact));
    }

    #[test]
    fn test_config_flag() {
        let fixtures = setup_fixtures();
        let config = fixtures.path().join("config.json");
        let content = run(
            &fixtures,
            "records.json",
            "out.json",
            &["--config", config.to_str().unwrap()],
        );

        let card = &parse_json(&content)[4];
        assert_eq!(card["kind"], "app_share");
        assert_eq!(card["appMsg"]["title"], "Custom card");
    }

    #[test]
    fn test_unconfigured_type_is_plain() {
        let fixtures = setup_fixtures();
        let content = run(&fixtures, "records.json", "out.json", &[]);

        let card = &parse_json(&content)[4];
        assert_eq!(card["kind"], "unknown");
        assert!(card.get("appMsg").is_none());
    }

    #[test]
    fn test_version_flag() {
        wxdecode_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("wxdecode"));
    }

    #[test]
    fn test_help_flag() {
        wxdecode_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--sender"))
            .stdout(predicate::str::contains("--with-trees"));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_missing_input_file() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.json");

        wxdecode_cmd()
            .args(["/nonexistent/records.json", "-o", output.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"));

        assert!(!output.exists());
    }

    #[test]
    fn test_malformed_input_file() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("broken.json");

        wxdecode_cmd()
            .current_dir(fixtures.path())
            .arg(input.to_str().unwrap())
            .assert()
            .failure()
            .stderr(predicate::str::contains("record file"));
    }

    #[test]
    fn test_unknown_format() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("records.json");

        wxdecode_cmd()
            .args([input.to_str().unwrap(), "-f", "xml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value"));
    }

    #[test]
    fn test_invalid_config_pattern() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("records.json");
        let config = fixtures.path().join("bad_config.json");

        wxdecode_cmd()
            .current_dir(fixtures.path())
            .args([input.to_str().unwrap(), "--config", config.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("prefix pattern"));
    }

    #[test]
    fn test_missing_input_argument() {
        wxdecode_cmd().assert().failure();
    }

    #[test]
    fn test_empty_input_file() {
        let fixtures = setup_fixtures();
        let content = run(&fixtures, "empty.json", "out.json", &[]);

        assert!(parse_json(&content).is_empty());
    }
}
