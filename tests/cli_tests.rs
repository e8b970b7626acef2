//! Integration tests for the germs-eval CLI
//!
//! These tests run the binary and check exit codes and error reporting.

mod support;

use predicates::prelude::*;
use support::{
    germs, stderr_json, tsv, write_file, write_gold, CATEGORICAL_HEADER, DISTRIBUTION_HEADER,
};
use tempfile::tempdir;

const VALID_CATEGORICAL: [&str; 4] = [
    "x1\t0\t1\t0\t0-Kein\t1",
    "x2\t1\t1\t1\t3-Stark\t0",
    "x3\t1\t1\t1\t1-Gering\t0",
    "x4\t0\t1\t0\t0-Kein\t1",
];

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    germs()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: germs-eval"))
        .stdout(predicate::str::contains("aggregate"))
        .stdout(predicate::str::contains("targets"))
        .stdout(predicate::str::contains("score"));
}

#[test]
fn test_version_flag() {
    germs()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("germs-eval"));
}

#[test]
fn test_no_subcommand_prints_hint() {
    germs()
        .assert()
        .success()
        .stdout(predicate::str::contains("germs-eval --help"));
}

// ============================================================================
// Usage errors (exit code 2)
// ============================================================================

#[test]
fn test_unknown_subtask_exit_code_2() {
    let dir = tempdir().unwrap();
    germs()
        .args(["aggregate", "--subtask", "3", "--input", "raw.jsonl", "--output", "out.tsv"])
        .current_dir(dir.path())
        .assert()
        .code(2);
}

#[test]
fn test_unknown_format_exit_code_2() {
    germs().args(["--format", "xml", "score"]).assert().code(2);
}

#[test]
fn test_usage_error_as_json() {
    let output = germs()
        .args(["--format", "json", "score", "--subtask", "9"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let json = stderr_json(&output);
    assert_eq!(json["error"]["type"], "usage_error");
}

#[test]
fn test_invalid_config_exit_code_2() {
    let dir = tempdir().unwrap();
    let gold = write_gold(dir.path());
    let submission = write_file(
        dir.path(),
        "task1.tsv",
        &tsv(CATEGORICAL_HEADER, &VALID_CATEGORICAL),
    );
    let config = write_file(dir.path(), "config.toml", "eps = 2.0\n");

    germs()
        .arg("--config")
        .arg(&config)
        .args(["validate", "--subtask", "1"])
        .arg("--submission")
        .arg(&submission)
        .arg("--targets")
        .arg(&gold)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("eps"));
}

#[test]
fn test_output_overwriting_input_rejected() {
    let dir = tempdir().unwrap();
    let raw = support::write_raw(dir.path());

    germs()
        .args(["aggregate", "--subtask", "1"])
        .arg("--input")
        .arg(&raw)
        .arg("--output")
        .arg(&raw)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("would overwrite"));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_validate_accepts_valid_submission() {
    let dir = tempdir().unwrap();
    let gold = write_gold(dir.path());
    let submission = write_file(
        dir.path(),
        "task1.tsv",
        &tsv(CATEGORICAL_HEADER, &VALID_CATEGORICAL),
    );

    germs()
        .args(["validate", "--subtask", "1"])
        .arg("--submission")
        .arg(&submission)
        .arg("--targets")
        .arg(&gold)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid subtask 1 submission (4 rows)"));
}

#[test]
fn test_schema_mismatch_exit_code_3() {
    let dir = tempdir().unwrap();
    let gold = write_gold(dir.path());
    let submission = write_file(
        dir.path(),
        "task1.tsv",
        &tsv(
            "id\tbin_maj\tbin_one\tbin_all\tmulti_maj",
            &["x1\t0\t1\t0\t0-Kein", "x2\t1\t1\t1\t3-Stark", "x3\t1\t1\t1\t1-Gering", "x4\t0\t1\t0\t0-Kein"],
        ),
    );

    germs()
        .args(["validate", "--subtask", "1"])
        .arg("--submission")
        .arg(&submission)
        .arg("--targets")
        .arg(&gold)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid column names"));
}

#[test]
fn test_too_many_rows() {
    let dir = tempdir().unwrap();
    let gold = write_gold(dir.path());
    let mut rows = VALID_CATEGORICAL.to_vec();
    rows.push("x5\t0\t0\t0\t0-Kein\t0");
    let submission = write_file(dir.path(), "task1.tsv", &tsv(CATEGORICAL_HEADER, &rows));

    germs()
        .args(["validate", "--subtask", "1"])
        .arg("--submission")
        .arg(&submission)
        .arg("--targets")
        .arg(&gold)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("too many rows, expected 4"));
}

#[test]
fn test_distribution_not_normalized() {
    let dir = tempdir().unwrap();
    let gold = write_gold(dir.path());
    let submission = write_file(
        dir.path(),
        "task2.tsv",
        &tsv(
            DISTRIBUTION_HEADER,
            &[
                "x1\t0.5\t0.5\t0.2\t0.2\t0.2\t0.2\t0.2",
                "x2\t0.5\t0.47\t0.2\t0.2\t0.2\t0.2\t0.2",
                "x3\t0.5\t0.5\t0.2\t0.2\t0.2\t0.2\t0.2",
                "x4\t0.5\t0.5\t0.2\t0.2\t0.2\t0.2\t0.2",
            ],
        ),
    );

    germs()
        .args(["validate", "--subtask", "2"])
        .arg("--submission")
        .arg(&submission)
        .arg("--targets")
        .arg(&gold)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("with id x2"));
}

#[test]
fn test_all_errors_json_lists_violations() {
    let dir = tempdir().unwrap();
    let gold = write_gold(dir.path());
    let submission = write_file(
        dir.path(),
        "task1.tsv",
        &tsv(
            CATEGORICAL_HEADER,
            &[
                "x1\t2\t1\t0\t0-Kein\t1",
                "x2\t1\t1\t1\t3-Stark\t0",
                "x3\t1\t1\t1\tGering\t0",
                "x4\t0\t1\t0\t0-Kein\t1",
            ],
        ),
    );

    let output = germs()
        .args(["--format", "json", "validate", "--subtask", "1", "--all-errors"])
        .arg("--submission")
        .arg(&submission)
        .arg("--targets")
        .arg(&gold)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let json = stderr_json(&output);
    assert_eq!(json["error"]["type"], "validation_failed");
    let violations = json["error"]["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0]["id"], "x1");
    assert_eq!(violations[1]["id"], "x3");
}

// ============================================================================
// Scoring failures
// ============================================================================

#[test]
fn test_id_mismatch_exit_code_3() {
    let dir = tempdir().unwrap();
    let gold = write_gold(dir.path());
    let submission = write_file(
        dir.path(),
        "task1.tsv",
        &tsv(
            CATEGORICAL_HEADER,
            &[
                "x1\t0\t1\t0\t0-Kein\t1",
                "x2\t1\t1\t1\t3-Stark\t0",
                "x3\t1\t1\t1\t1-Gering\t0",
                "y9\t0\t1\t0\t0-Kein\t1",
            ],
        ),
    );
    let report = dir.path().join("scores.json");

    germs()
        .args(["score", "--subtask", "1"])
        .arg("--submission")
        .arg(&submission)
        .arg("--targets")
        .arg(&gold)
        .arg("--output")
        .arg(&report)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("missing: x4"))
        .stderr(predicate::str::contains("unexpected: y9"));

    assert!(!report.exists());
}

#[test]
fn test_ambiguous_submission_directory() {
    let dir = tempdir().unwrap();
    let gold = write_gold(dir.path());
    let submission_dir = dir.path().join("submission");
    std::fs::create_dir(&submission_dir).unwrap();
    let content = tsv(CATEGORICAL_HEADER, &VALID_CATEGORICAL);
    write_file(&submission_dir, "a.tsv", &content);
    write_file(&submission_dir, "b.tsv", &content);

    germs()
        .args(["score", "--subtask", "1"])
        .arg("--submission")
        .arg(&submission_dir)
        .arg("--targets")
        .arg(&gold)
        .arg("--output")
        .arg(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("multiple files ending with '.tsv'"));
}

#[test]
fn test_missing_submission_in_directory() {
    let dir = tempdir().unwrap();
    let gold = write_gold(dir.path());
    let submission_dir = dir.path().join("submission");
    std::fs::create_dir(&submission_dir).unwrap();

    let output = germs()
        .args(["--format", "json", "score", "--subtask", "1"])
        .arg("--submission")
        .arg(&submission_dir)
        .arg("--targets")
        .arg(&gold)
        .arg("--output")
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(stderr_json(&output)["error"]["type"], "no_submission_found");
}

#[test]
fn test_quiet_suppresses_errors() {
    let dir = tempdir().unwrap();
    germs()
        .args(["--quiet", "validate", "--subtask", "1"])
        .arg("--submission")
        .arg(dir.path().join("missing.tsv"))
        .arg("--targets")
        .arg(dir.path().join("missing.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::is_empty());
}
