use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

fn log_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.split_once(' ').unwrap().1.to_string())
        .collect()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_missing_arguments() {
    Command::new(assert_cmd::cargo::cargo_bin!("filelog"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_flag() {
    Command::new(assert_cmd::cargo::cargo_bin!("filelog"))
        .args(["tests/fixtures/basic.csv", "out.log", "--verbose"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown flag --verbose"));
}

#[test]
fn test_nonexistent_input() {
    let dir = tempfile::tempdir().unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("filelog"))
        .arg("nonexistent.csv")
        .arg(dir.path().join("out.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_log_file_cannot_be_created() {
    let dir = tempfile::tempdir().unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("filelog"))
        .arg("tests/fixtures/basic.csv")
        .arg(dir.path().join("missing").join("out.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot create log file"));
}

// ============================================================================
// Replay Tests
// ============================================================================

#[test]
fn test_replay_basic_records() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("out.log");

    Command::new(assert_cmd::cargo::cargo_bin!("filelog"))
        .arg("tests/fixtures/basic.csv")
        .arg(&log)
        .args(["--label", "svc"])
        .assert()
        .success()
        .stdout("3\n");

    assert_eq!(
        log_lines(&log),
        vec![
            "info svc : service started",
            "warning svc : mount=/var used=91% disk almost full",
            "error svc : request=42 status=500 request failed",
        ]
    );
}

#[test]
fn test_replay_appends_to_existing_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("out.log");

    for _ in 0..2 {
        Command::new(assert_cmd::cargo::cargo_bin!("filelog"))
            .arg("tests/fixtures/basic.csv")
            .arg(&log)
            .assert()
            .success();
    }

    let lines = log_lines(&log);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], lines[3]);
    assert_eq!(lines[0], "info filelog : service started");
}

#[test]
fn test_default_level_skips_debug_and_trace() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("out.log");

    Command::new(assert_cmd::cargo::cargo_bin!("filelog"))
        .arg("tests/fixtures/levels.csv")
        .arg(&log)
        .assert()
        .success()
        .stdout("3\n");

    let lines = log_lines(&log);
    assert!(lines[0].starts_with("info "));
    assert!(lines[1].starts_with("notice "));
    assert!(lines[2].starts_with("critical "));
}

#[test]
fn test_min_level_flag() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("out.log");

    Command::new(assert_cmd::cargo::cargo_bin!("filelog"))
        .arg("tests/fixtures/levels.csv")
        .arg(&log)
        .args(["--min-level", "TRACE"])
        .assert()
        .success()
        .stdout("5\n");

    assert_eq!(log_lines(&log)[1], "debug filelog : key=user:7 cache miss");
}

#[test]
fn test_invalid_min_level_flag() {
    let dir = tempfile::tempdir().unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("filelog"))
        .arg("tests/fixtures/levels.csv")
        .arg(dir.path().join("out.log"))
        .args(["--min-level", "loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level: loud"));
}

#[test]
fn test_metadata_column_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("out.log");

    Command::new(assert_cmd::cargo::cargo_bin!("filelog"))
        .arg("tests/fixtures/no_metadata_column.csv")
        .arg(&log)
        .assert()
        .success();

    assert_eq!(
        log_lines(&log),
        vec!["info filelog : hello", "warning filelog : careful"]
    );
}

#[test]
fn test_upper_case_levels_in_records() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("out.log");

    Command::new(assert_cmd::cargo::cargo_bin!("filelog"))
        .arg("tests/fixtures/upper_case_levels.csv")
        .arg(&log)
        .assert()
        .success()
        .stdout("2\n");

    assert_eq!(
        log_lines(&log),
        vec!["info filelog : hello", "warning filelog : disk=sda careful"]
    );
}

// ============================================================================
// Bad Input Tests
// ============================================================================

#[test]
fn test_invalid_metadata_pair() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("out.log");

    Command::new(assert_cmd::cargo::cargo_bin!("filelog"))
        .arg("tests/fixtures/bad_metadata.csv")
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid metadata pair: novalue"));

    // Records before the bad one were already written.
    assert_eq!(log_lines(&log), vec!["info filelog : a=1 ok"]);
}

#[test]
fn test_invalid_level_in_records() {
    let dir = tempfile::tempdir().unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("filelog"))
        .arg("tests/fixtures/bad_level.csv")
        .arg(dir.path().join("out.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("CSV error"));
}
