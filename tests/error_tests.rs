//! Error scenario integration tests

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cliptrail(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cliptrail").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("XDG_RUNTIME_DIR", home)
        .env("NO_COLOR", "1")
        .env_remove("CLIPTRAIL_HISTORY_FILE");
    cmd
}

#[test]
fn config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    cliptrail(home.path())
        .args(["config", "get", "unknown_key"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_unknown_key() {
    let home = TempDir::new().unwrap();
    cliptrail(home.path())
        .args(["config", "set", "unknown_key", "value"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Valid keys"));
}

#[test]
fn config_set_invalid_interval() {
    let home = TempDir::new().unwrap();
    cliptrail(home.path())
        .args(["config", "set", "poll_interval", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("poll_interval"));
}

#[test]
fn config_set_invalid_boolean() {
    let home = TempDir::new().unwrap();
    cliptrail(home.path())
        .args(["config", "set", "paste_back", "maybe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("true").or(predicate::str::contains("false")));
}

#[test]
fn config_set_history_limit_out_of_range() {
    let home = TempDir::new().unwrap();
    cliptrail(home.path())
        .args(["config", "set", "max_history", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 to 1000"));
}

#[test]
fn interval_requires_daemon() {
    let home = TempDir::new().unwrap();
    cliptrail(home.path())
        .args(["--interval", "1s"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--daemon"));
}

#[test]
fn no_paste_back_requires_daemon() {
    let home = TempDir::new().unwrap();
    cliptrail(home.path())
        .arg("--no-paste-back")
        .assert()
        .code(2);
}

#[test]
fn daemon_rejects_invalid_interval() {
    let home = TempDir::new().unwrap();
    cliptrail(home.path())
        .args(["--daemon", "--interval", "fast"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid interval"));
}

#[test]
fn history_list_without_daemon() {
    let home = TempDir::new().unwrap();
    cliptrail(home.path())
        .args(["history", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No daemon running"));
}

#[test]
fn daemon_status_without_daemon() {
    let home = TempDir::new().unwrap();
    cliptrail(home.path())
        .args(["daemon", "status"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No daemon running"));
}

#[test]
fn history_restore_requires_index() {
    let home = TempDir::new().unwrap();
    cliptrail(home.path())
        .args(["history", "restore", "first"])
        .assert()
        .code(2);
}

#[test]
fn offline_list_rejects_newer_format() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("future.json");
    fs::write(&file, r#"{"version":9,"entries":[]}"#).unwrap();

    cliptrail(home.path())
        .arg("--history-file")
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("future.json"));
}

#[test]
fn offline_list_reports_corrupt_file() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("broken.json");
    fs::write(&file, "{not json").unwrap();

    cliptrail(home.path())
        .arg("--history-file")
        .arg(&file)
        .assert()
        .code(1);
}
