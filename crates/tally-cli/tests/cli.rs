//! End-to-end tests for the `tally` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command pinned to a config file inside `dir`, so the user's config is never read.
fn tally(dir: &TempDir) -> Command {
    let config = dir.path().join("config.json");
    if !config.exists() {
        std::fs::write(&config, "{}").unwrap();
    }

    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn detect_text_picks_total() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["detect", "--text", "Tổng: 150.000 Thuế: 15.000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("150.000 VNĐ"))
        .stdout(predicate::str::contains("Amount: 150000"));
}

#[test]
fn detect_json_output() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["detect", "--format", "json", "--text", "(150.000)"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status":"found""#))
        .stdout(predicate::str::contains(r#""amount":-150000"#));
}

#[test]
fn detect_nothing_is_not_an_error() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["detect", "--format", "json", "--text", "0 0.00 abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"status":"nothing_detected"}"#));
}

#[test]
fn detect_reads_file_and_stdin() {
    let dir = TempDir::new().unwrap();
    let receipt = dir.path().join("receipt.txt");
    std::fs::write(&receipt, "TOTAL 1,234.56\nCASH 2,000.00\n").unwrap();

    tally(&dir)
        .args(["detect", "--format", "csv"])
        .arg(&receipt)
        .assert()
        .success()
        .stdout(predicate::str::contains("found,2000,2.000 VNĐ,2000.00,primary,"));

    tally(&dir)
        .args(["detect", "--format", "json"])
        .write_stdin("Razem: 1 234,56 zł")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""amount":1235"#));
}

#[test]
fn detect_honours_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"detection": {"grouping": "comma", "currency_label": "USD"}}"#,
    )
    .unwrap();

    tally(&dir)
        .args(["detect", "--text", "Total 1.234.567"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1,234,567 USD"));
}

#[test]
fn scan_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["scan"])
        .arg(dir.path().join("missing.jpg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn scan_without_models_fails() {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("receipt.png");
    std::fs::write(&image, b"not really a png").unwrap();

    tally(&dir)
        .args(["scan", "--model-dir"])
        .arg(dir.path().join("models"))
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load OCR models"));
}

#[test]
fn config_set_get_roundtrip() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("tally.json");

    Command::cargo_bin("tally")
        .unwrap()
        .args(["config", "--file"])
        .arg(&file)
        .args(["set", "detection.grouping", "space"])
        .assert()
        .success();

    Command::cargo_bin("tally")
        .unwrap()
        .args(["config", "--file"])
        .arg(&file)
        .args(["get", "detection.grouping"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""space""#));

    Command::cargo_bin("tally")
        .unwrap()
        .args(["config", "--file"])
        .arg(&file)
        .args(["set", "detection.grouping", "hex"])
        .assert()
        .failure();
}
