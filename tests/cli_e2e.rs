//! End-to-end tests for the bookshelf binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"[
    {
        "source": "library/expanse-1.m4b",
        "duration_secs": 75600,
        "attributes": {
            "©nam": [{"text": "Leviathan Wakes (The Expanse #1)"}],
            "©ART": [{"text": "james s. a. corey"}]
        }
    },
    {"source": "library/broken.m4b", "attributes": 7}
]"#;

const RECORDS: &str = r#"[
    {"title": "Leviathan Wakes", "series": "The Expanse", "series_index_display": "1", "series_index_sort": 1.0, "author": "James S. A. Corey", "year": "2011", "duration": "21:00"},
    {"title": "Caliban's War", "series": "The Expanse", "series_index_display": "2", "series_index_sort": 2.0, "author": "James S. A. Corey", "year": "2012", "duration": "22:00"},
    {"title": "Cibola Burn", "series": "The Expanse", "series_index_display": "4", "series_index_sort": 4.0, "author": "James S. A. Corey", "year": "2014", "duration": "20:30"},
    {"title": "The Martian", "author": "Andy Weir", "year": "2014", "duration": "11:00"}
]"#;

/// Binary with the config lookup pointed at an empty directory.
fn bookshelf(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Test that --help shows the description.
#[test]
fn test_binary_help_shows_description() {
    let dir = TempDir::new().unwrap();
    bookshelf(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolve and audit"));
}

/// Test that --version shows the package version.
#[test]
fn test_binary_version_shows_version() {
    let dir = TempDir::new().unwrap();
    bookshelf(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that running without a command prints guidance and exits cleanly.
#[test]
fn test_binary_no_command_prints_guidance() {
    let dir = TempDir::new().unwrap();
    bookshelf(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No command given"));
}

/// Test that an unknown flag is rejected.
#[test]
fn test_binary_invalid_flag_fails() {
    let dir = TempDir::new().unwrap();
    bookshelf(dir.path())
        .arg("--invalid-flag-xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Test the title parser verdict in text and JSON.
#[test]
fn test_parse_title_text_and_json() {
    let dir = TempDir::new().unwrap();
    bookshelf(dir.path())
        .args(["parse-title", "Foundation (Book IV)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("series = Foundation"))
        .stdout(predicate::str::contains("index = 4"));

    bookshelf(dir.path())
        .args(["parse-title", "Emma (Unabridged)", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""outcome": "excluded""#))
        .stdout(predicate::str::contains(r#""rule": "abridgement""#));
}

/// Test that resolve emits records and skips unreadable items.
#[test]
fn test_resolve_snapshot_json() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_file(&dir, "snapshot.json", SNAPSHOT);

    let output = bookshelf(dir.path())
        .args(["-q", "resolve", "--format", "json"])
        .arg(&snapshot)
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["series"], "The Expanse");
    assert_eq!(records[0]["series_index_display"], "1");
    assert_eq!(records[0]["author"], "James S. A. Corey");
    assert_eq!(records[0]["duration"], "21:00");
}

/// Test that unreadable items are reported on stderr in text mode.
#[test]
fn test_resolve_snapshot_text_warns_on_bad_items() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_file(&dir, "snapshot.json", SNAPSHOT);

    bookshelf(dir.path())
        .arg("resolve")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved 1 item(s), 1 unreadable"))
        .stderr(predicate::str::contains("library/broken.m4b"));
}

/// Test that a snapshot that is not an array fails with guidance.
#[test]
fn test_resolve_rejects_non_array_snapshot() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_file(&dir, "snapshot.json", r#"{"source": "x"}"#);

    bookshelf(dir.path())
        .arg("resolve")
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("array"));
}

/// Test the series report over a records file.
#[test]
fn test_series_report_lists_gaps() {
    let dir = TempDir::new().unwrap();
    let records = write_file(&dir, "records.json", RECORDS);

    bookshelf(dir.path())
        .arg("series")
        .arg(&records)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "The Expanse by James S. A. Corey: 3 book(s), 75.0% (mostly-complete)",
        ))
        .stdout(predicate::str::contains("missing 3"))
        .stdout(predicate::str::contains("1 standalone, 4 total"));
}

/// Test stats output honors --top.
#[test]
fn test_stats_report_json() {
    let dir = TempDir::new().unwrap();
    let records = write_file(&dir, "records.json", RECORDS);

    let output = bookshelf(dir.path())
        .args(["stats", "--top", "1", "--format", "json"])
        .arg(&records)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["total_records"], 4);
    assert_eq!(stats["total_minutes"], 4470);
    assert_eq!(stats["unique_authors"], 2);
    assert_eq!(stats["top_authors"].as_array().unwrap().len(), 1);
    assert_eq!(stats["top_authors"][0]["name"], "James S. A. Corey");
}

/// Test diff lists records missing from the previous catalog.
#[test]
fn test_diff_lists_new_records() {
    let dir = TempDir::new().unwrap();
    let previous = write_file(
        &dir,
        "previous.json",
        r#"[{"title": "Leviathan Wakes", "author": "James S. A. Corey"}]"#,
    );
    let current = write_file(&dir, "current.json", RECORDS);

    bookshelf(dir.path())
        .args(["diff", "--limit", "2"])
        .arg(&previous)
        .arg(&current)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 new record(s) in 4 total"))
        .stdout(predicate::str::contains("Caliban's War by James S. A. Corey"))
        .stdout(predicate::str::contains("... and 1 more"));
}

/// Test that a malformed records file fails with context.
#[test]
fn test_series_rejects_malformed_records() {
    let dir = TempDir::new().unwrap();
    let records = write_file(&dir, "records.json", "not json");

    bookshelf(dir.path())
        .arg("series")
        .arg(&records)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse records file"));
}

/// Test config show with defaults and with an explicit file.
#[test]
fn test_config_show_defaults_and_file() {
    let dir = TempDir::new().unwrap();
    bookshelf(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found (using defaults)"))
        .stdout(predicate::str::contains("output_format = text"));

    let config = write_file(
        &dir,
        "custom.toml",
        "output_format = \"json\"\nseries_hints = \"saga\"\ntop_limit = 3\n",
    );
    bookshelf(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_file = loaded"))
        .stdout(predicate::str::contains("output_format = json"))
        .stdout(predicate::str::contains("series_hints = saga"))
        .stdout(predicate::str::contains("top_limit = 3"));
}

/// Test that the config file output format applies to commands.
#[test]
fn test_config_output_format_applies() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("bookshelf");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "output_format = \"json\"\n").unwrap();

    bookshelf(dir.path())
        .args(["parse-title", "Dune: 2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""outcome": "matched""#));
}

/// Test that a missing explicit config path is an error.
#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    bookshelf(dir.path())
        .args(["--config", "/nonexistent/bookshelf.toml", "config", "show"])
        .assert()
        .failure();
}
