//! CLI integration tests for the `recog` binary.
//!
//! Uses `assert_cmd` to spawn the binary and verify exit codes, stdout
//! content, and stderr content. Inputs are written to temp directories.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper: create a Command for the `recog` binary with a clean environment.
fn recog() -> Command {
    let mut cmd = cargo_bin_cmd!("recog");
    cmd.env_remove("RECOG_OUTPUT");
    cmd
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn capture_json(input: &Path, at: &str, description: &str) -> serde_json::Value {
    let out = recog()
        .args(["capture", "--decision", "3", "--state", "17", "--at", at])
        .args(["--description", description])
        .arg(input)
        .output()
        .unwrap();
    assert!(out.status.success());
    serde_json::from_slice(&out.stdout).unwrap()
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    recog()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Recognition failure capture and inspection",
        ));
}

#[test]
fn version_exits_0() {
    recog()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("recog"));
}

// ──────────────────────────────────────────────
// 2. Capture
// ──────────────────────────────────────────────

#[test]
fn capture_emits_field_set() {
    let tmp = TempDir::new().unwrap();
    let input = write(tmp.path(), "expr.txt", "1 + A");
    let fields = capture_json(&input, "4", "rule X alt 2");
    assert_eq!(fields["kind"], "NoViableAlternative");
    assert_eq!(fields["decision_number"], 3);
    assert_eq!(fields["state_number"], 17);
    assert_eq!(fields["decision_description"], "rule X alt 2");
    assert_eq!(fields["character"], 65);
    assert_eq!(fields["stream_kind"], "character");
}

#[test]
fn capture_reports_rendering_on_stderr() {
    let tmp = TempDir::new().unwrap();
    let input = write(tmp.path(), "expr.txt", "A");
    recog()
        .args(["capture", "--decision", "1", "--state", "2"])
        .args(["--description", "rule X alt 2"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "NoViableAlternativeFailure('A'@[rule X alt 2])",
        ));
}

#[test]
fn capture_index_past_end_exits_1() {
    let tmp = TempDir::new().unwrap();
    let input = write(tmp.path(), "short.txt", "ab");
    recog()
        .args(["capture", "--decision", "1", "--state", "2", "--at", "9"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("past the end"));
}

#[test]
fn capture_missing_file_exits_1() {
    recog()
        .args(["capture", "--decision", "1", "--state", "2", "/nonexistent/input.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error reading file"));
}

// ──────────────────────────────────────────────
// 3. Explain
// ──────────────────────────────────────────────

#[test]
fn explain_round_trips_captured_failure() {
    let tmp = TempDir::new().unwrap();
    let input = write(tmp.path(), "expr.txt", "x\n+y");
    let fields = capture_json(&input, "2", "expr");
    let saved = write(tmp.path(), "failure.json", &fields.to_string());

    recog()
        .arg("explain")
        .arg(&saved)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "NoViableAlternativeFailure('+'@[expr])",
        ))
        .stdout(predicate::str::contains(
            "line 2:0 no viable alternative at character '+'",
        ))
        .stdout(predicate::str::contains("decision 3 (state 17): expr"));
}

#[test]
fn explain_json_output() {
    let tmp = TempDir::new().unwrap();
    let input = write(tmp.path(), "expr.txt", "A");
    let fields = capture_json(&input, "0", "");
    let saved = write(tmp.path(), "failure.json", &fields.to_string());

    let out = recog()
        .args(["--output", "json", "explain"])
        .arg(&saved)
        .output()
        .unwrap();
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["failure"], "NoViableAlternativeFailure('A'@[])");
    assert_eq!(report["kind"], "NoViableAlternative");
    assert_eq!(report["decision_number"], 3);
    assert_eq!(report["message"], "no viable alternative at character 'A'");
}

#[test]
fn explain_output_format_from_env() {
    let tmp = TempDir::new().unwrap();
    let input = write(tmp.path(), "expr.txt", "A");
    let fields = capture_json(&input, "0", "d");
    let saved = write(tmp.path(), "failure.json", &fields.to_string());

    recog()
        .env("RECOG_OUTPUT", "json")
        .arg("explain")
        .arg(&saved)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"header\""));
}

#[test]
fn explain_token_failure_with_names() {
    let tmp = TempDir::new().unwrap();
    let fields = serde_json::json!({
        "format_version": 1,
        "kind": "NoViableAlternative",
        "stream_kind": "symbol",
        "index": 0,
        "line": 4,
        "char_position_in_line": 2,
        "approximate_line_info": false,
        "source_name": null,
        "character": null,
        "token": {
            "token_type": 7,
            "text": "while",
            "line": 4,
            "char_position_in_line": 2,
            "index": 0
        },
        "decision_description": "rule Y",
        "decision_number": 0,
        "state_number": 0
    });
    let saved = write(tmp.path(), "failure.json", &fields.to_string());

    recog()
        .args(["explain", "--token-names", "a,b,c,d,e,f,g,WHILE"])
        .arg(&saved)
        .assert()
        .success()
        .stdout(predicate::str::contains("NoViableAlternativeFailure(7@[rule Y])"))
        .stdout(predicate::str::contains(
            "line 4:2 no viable alternative at input 'while'",
        ));
}

#[test]
fn explain_mismatched_token_maps_expected_type_to_name() {
    let tmp = TempDir::new().unwrap();
    let fields = serde_json::json!({
        "format_version": 1,
        "kind": "MismatchedToken",
        "stream_kind": "symbol",
        "index": 2,
        "line": 3,
        "char_position_in_line": 8,
        "approximate_line_info": false,
        "source_name": "loop.src",
        "character": null,
        "token": {
            "token_type": 5,
            "text": "42",
            "line": 3,
            "char_position_in_line": 8,
            "index": 2
        },
        "expecting": 7
    });
    let saved = write(tmp.path(), "failure.json", &fields.to_string());

    recog()
        .args(["explain", "--token-names", "a,b,c,d,ID,INT,SEMI,WHILE"])
        .arg(&saved)
        .assert()
        .success()
        .stdout(predicate::str::contains("MismatchedTokenFailure(5!=7)"))
        .stdout(predicate::str::contains(
            "loop.src line 3:8 mismatched input '42' expecting WHILE",
        ));
}

#[test]
fn explain_missing_field_exits_1() {
    let tmp = TempDir::new().unwrap();
    let saved = write(
        tmp.path(),
        "failure.json",
        r#"{"format_version": 1, "kind": "NoViableAlternative"}"#,
    );
    recog()
        .arg("explain")
        .arg(&saved)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field"));
}

#[test]
fn explain_json_errors_are_structured() {
    let tmp = TempDir::new().unwrap();
    let saved = write(tmp.path(), "failure.json", "not json");
    let out = recog()
        .args(["--output", "json", "explain"])
        .arg(&saved)
        .output()
        .unwrap();
    assert!(!out.status.success());
    let err: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert!(err["error"]
        .as_str()
        .unwrap()
        .contains("malformed field set"));
}

#[test]
fn quiet_suppresses_errors() {
    recog()
        .args(["--quiet", "explain", "/nonexistent/failure.json"])
        .assert()
        .failure()
        .stderr(predicate::str::is_empty());
}
