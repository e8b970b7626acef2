use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

/// Get a Command for germs-eval
pub fn germs() -> Command {
    cargo_bin_cmd!("germs-eval")
}

/// Four annotated texts: a clear majority with disagreement, a tie among
/// present labels, a unanimous item and a tie between `0-Kein` and a
/// present label
pub const RAW_RECORDS: &str = r#"{"id": "x1", "text": "erster Text", "annotations": [{"user": "A001", "label": "0-Kein"}, {"user": "A002", "label": "0-Kein"}, {"user": "A003", "label": "2-Vorhanden"}]}
{"id": "x2", "text": "zweiter Text", "annotations": [{"user": "A001", "label": "3-Stark"}, {"user": "A002", "label": "4-Extrem"}]}
{"id": "x3", "text": "dritter Text", "annotations": [{"user": "A001", "label": "1-Gering"}, {"user": "A002", "label": "1-Gering"}, {"user": "A004", "label": "1-Gering"}]}
{"id": "x4", "text": "vierter Text", "annotations": [{"user": "A003", "label": "0-Kein"}, {"user": "A004", "label": "3-Stark"}]}
"#;

pub const CATEGORICAL_HEADER: &str = "id\tbin_maj\tbin_one\tbin_all\tmulti_maj\tdisagree_bin";

pub const DISTRIBUTION_HEADER: &str =
    "id\tdist_bin_0\tdist_bin_1\tdist_multi_0\tdist_multi_1\tdist_multi_2\tdist_multi_3\tdist_multi_4";

/// Write a file into `dir` and return its path
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Write the raw records fixture
pub fn write_raw(dir: &Path) -> PathBuf {
    write_file(dir, "raw.jsonl", RAW_RECORDS)
}

/// Derive gold targets from the raw records fixture
pub fn write_gold(dir: &Path) -> PathBuf {
    let raw = write_raw(dir);
    let gold = dir.join("gold.json");
    germs()
        .arg("targets")
        .arg("--input")
        .arg(&raw)
        .arg("--output")
        .arg(&gold)
        .assert()
        .success();
    gold
}

/// Build a tab-separated table from a header and rows
#[allow(dead_code)]
pub fn tsv(header: &str, rows: &[&str]) -> String {
    let mut out = String::from(header);
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out
}

/// Parse stdout of a finished command as JSON
#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Parse stderr of a finished command as JSON
#[allow(dead_code)]
pub fn stderr_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stderr).unwrap()
}
