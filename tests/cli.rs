use std::fs;

use assert_cmd::Command;
use outbreak_sim::report::read_csv_file;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_default_run_writes_results() {
    let temp = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("outbreak").unwrap();
    cmd.arg("--output-dir")
        .arg(temp.path())
        .args(["--log-level", "off"])
        .assert()
        .success();

    let records = read_csv_file(&temp.path().join("simulation_results.csv")).unwrap();
    assert_eq!(records.len(), 365);
}

#[test]
fn test_run_logs_summary() {
    let temp = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("outbreak").unwrap();
    cmd.arg("--output-dir")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("entering masks regime"))
        .stderr(predicate::str::contains("infections peaked at"));
}

#[test]
fn test_config_file_overrides_defaults() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("scenario.json");
    fs::write(&config, r#"{ "TOTAL_DAYS": 40, "DAY_FOR_MASKS": 10, "DAY_FOR_VACCINE": 30 }"#)
        .unwrap();

    let mut cmd = Command::cargo_bin("outbreak").unwrap();
    cmd.arg("--config")
        .arg(&config)
        .arg("--output-dir")
        .arg(temp.path())
        .args(["--file-name", "short.csv", "--log-level", "off"])
        .assert()
        .success();

    let records = read_csv_file(&temp.path().join("short.csv")).unwrap();
    assert_eq!(records.len(), 40);
}

#[test]
fn test_invalid_config_fails_without_output() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("bad.json");
    fs::write(&config, r#"{ "MORTALITY_RATE": 2.0 }"#).unwrap();

    let mut cmd = Command::cargo_bin("outbreak").unwrap();
    cmd.arg("--config")
        .arg(&config)
        .arg("--output-dir")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("MORTALITY_RATE"));

    assert!(!temp.path().join("simulation_results.csv").exists());
}

#[test]
fn test_existing_output_requires_force() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("simulation_results.csv");
    fs::write(&path, "keep me").unwrap();

    let mut refused = Command::cargo_bin("outbreak").unwrap();
    refused
        .arg("--output-dir")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force-overwrite"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

    let mut forced = Command::cargo_bin("outbreak").unwrap();
    forced
        .arg("--output-dir")
        .arg(temp.path())
        .args(["--log-level", "off", "--force-overwrite"])
        .assert()
        .success();
    assert_eq!(read_csv_file(&path).unwrap().len(), 365);
}

#[test]
fn test_unknown_log_level_is_rejected() {
    let mut cmd = Command::cargo_bin("outbreak").unwrap();
    cmd.args(["--log-level", "loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--log-level"));
}
