//! Integration tests for the nbprofile CLI commands.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NOTEBOOK: &str = r##"{
  "cells": [
    {"cell_type": "markdown", "metadata": {}, "source": ["# Analysis\n", "We load the data and plot it."]},
    {"cell_type": "code", "execution_count": 1, "metadata": {}, "outputs": [],
     "source": ["import pandas as pd\n", "from os import path\n", "df = pd.read_csv(path.join('a', 'b'))"]}
  ],
  "metadata": {"kernelspec": {"language": "python", "name": "python3"}},
  "nbformat": 4,
  "nbformat_minor": 5
}"##;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nbprofile"))
}

fn write_notebook(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, NOTEBOOK).unwrap();
    path
}

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("text-analysis"));
}

#[test]
fn test_imports() {
    let tmp = TempDir::new().unwrap();
    let nb = write_notebook(tmp.path(), "a.ipynb");

    cli()
        .arg("imports")
        .arg(&nb)
        .assert()
        .success()
        .stdout("pandas\nos\n");
}

#[test]
fn test_imports_missing_file() {
    cli()
        .args(["imports", "no/such/notebook.ipynb"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_text_analysis() {
    let tmp = TempDir::new().unwrap();
    let nb = write_notebook(tmp.path(), "a.ipynb");

    cli()
        .arg("text-analysis")
        .arg(&nb)
        .args(["--reading-rate", "8", "--rounded-minutes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Words: 9"))
        .stdout(predicate::str::contains("Reading time: 2 min"));
}

#[test]
fn test_text_analysis_code_line_seconds() {
    let tmp = TempDir::new().unwrap();
    let nb = tmp.path().join("setup.md");
    fs::write(&nb, "Install it first.\n\n```\npip install x\n# then\n```\n").unwrap();

    cli()
        .arg("text-analysis")
        .arg(&nb)
        .args(["--reading-rate", "60", "--code-line-seconds", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Code lines in markdown: 2"))
        .stdout(predicate::str::contains("(70 s at 60 wpm)"));

    cli()
        .arg("text-analysis")
        .arg(&nb)
        .args(["--code-line-seconds", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("code line seconds"));
}

#[test]
fn test_text_analysis_zero_rate_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let nb = write_notebook(tmp.path(), "a.ipynb");

    cli()
        .arg("text-analysis")
        .arg(&nb)
        .args(["--reading-rate", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid reading rate"));
}

#[test]
fn test_text_analysis_negative_rate() {
    let tmp = TempDir::new().unwrap();
    let nb = write_notebook(tmp.path(), "a.ipynb");

    cli()
        .arg("text-analysis")
        .arg(&nb)
        .args(["--reading-rate", "-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid reading rate: -10"));
}

#[test]
fn test_chart_writes_png() {
    let tmp = TempDir::new().unwrap();
    write_notebook(tmp.path(), "a.ipynb");
    write_notebook(tmp.path(), "b.ipynb");
    let out = tmp.path().join("review.png");

    cli()
        .arg("chart")
        .arg(tmp.path())
        .arg("--out")
        .arg(&out)
        .args(["--gapcolor", "none", "--linewidth", "10", "--width", "300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 notebooks"));

    let bytes = fs::read(&out).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn test_chart_negative_gap() {
    let tmp = TempDir::new().unwrap();
    let nb = write_notebook(tmp.path(), "a.ipynb");
    let out = tmp.path().join("review.png");

    cli()
        .arg("chart")
        .arg(&nb)
        .arg("--out")
        .arg(&out)
        .args(["--gap", "-1"])
        .assert()
        .failure();

    assert!(!out.exists());
}

fn png_size(bytes: &[u8]) -> (u32, u32) {
    let w = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let h = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    (w, h)
}

#[test]
fn test_chart_labels() {
    let tmp = TempDir::new().unwrap();
    write_notebook(tmp.path(), "a.ipynb");
    write_notebook(tmp.path(), "b.ipynb");
    let out = tmp.path().join("review.png");

    let chart = |extra: &[&str]| {
        cli()
            .arg("chart")
            .arg(tmp.path())
            .arg("--out")
            .arg(&out)
            .args(["--linewidth", "10", "--width", "300"])
            .args(extra)
            .assert()
            .success();
        png_size(&fs::read(&out).unwrap())
    };

    assert_eq!(chart(&["--no-labels"]), (300, 35));
    assert_eq!(chart(&["--font-size", "16"]), (300, 35 + 28 + 2 * 20));
}

#[test]
fn test_chart_too_large() {
    let tmp = TempDir::new().unwrap();
    let nb = write_notebook(tmp.path(), "a.ipynb");
    let out = tmp.path().join("review.png");

    cli()
        .arg("chart")
        .arg(&nb)
        .arg("--out")
        .arg(&out)
        .args(["--linewidth", "4000000000"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("too large"));

    assert!(!out.exists());
}

#[test]
fn test_chart_unknown_color() {
    let tmp = TempDir::new().unwrap();
    let nb = write_notebook(tmp.path(), "a.ipynb");

    cli()
        .arg("chart")
        .arg(&nb)
        .args(["--gapcolor", "not-a-colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown colour"));
}

#[test]
fn test_no_text_formats() {
    let tmp = TempDir::new().unwrap();
    let script = tmp.path().join("script.py");
    fs::write(&script, "# %%\nimport numpy\n").unwrap();

    cli()
        .arg("imports")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("numpy"));

    cli()
        .arg("imports")
        .arg(&script)
        .arg("--no-text-formats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported"));
}

#[test]
fn test_info_json() {
    let tmp = TempDir::new().unwrap();
    let nb = write_notebook(tmp.path(), "a.ipynb");

    cli()
        .arg("info")
        .arg(&nb)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"markdown_cells\": 1"))
        .stdout(predicate::str::contains("\"code_cells\": 1"));
}

#[test]
fn test_version() {
    cli()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
