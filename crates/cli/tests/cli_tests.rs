//! Integration tests for the `confenv` binary.
//!
//! Responsibilities:
//! - Validate `detect`, `flatten`, and `get` output for each format.
//! - Verify structured exit codes for load failures and missing keys.
//!
//! Invariants:
//! - All tests use the hermetic `confenv_cmd()` helper.

mod common;

use common::confenv_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_help_lists_subcommands() {
    confenv_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("detect")
            .and(predicate::str::contains("flatten"))
            .and(predicate::str::contains("get")),
    );
}

#[test]
fn test_detect_from_extension_and_override() {
    confenv_cmd()
        .args(["--file", "app.YAML", "detect"])
        .assert()
        .success()
        .stdout("yaml\n");

    confenv_cmd()
        .args(["--file", "notes.txt", "detect"])
        .assert()
        .success()
        .stdout("env\n");

    confenv_cmd()
        .args(["--file", "notes.txt", "--format", "json", "detect"])
        .assert()
        .success()
        .stdout("json\n");
}

#[test]
fn test_file_from_environment_variable() {
    confenv_cmd()
        .env("CONFENV_FILE", "service.json")
        .arg("detect")
        .assert()
        .success()
        .stdout("json\n");
}

#[test]
fn test_flatten_yaml_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(
        &path,
        "server:\n  host: 0.0.0.0\n  port: 8080\nfeatures:\n  - auth\n  - metrics\n",
    )
    .unwrap();

    confenv_cmd()
        .arg("-f")
        .arg(&path)
        .arg("flatten")
        .assert()
        .success()
        .stdout("FEATURES=auth,metrics\nSERVER_HOST=0.0.0.0\nSERVER_PORT=8080\n");
}

#[test]
fn test_flatten_json_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.env");
    fs::write(&path, "# comment\nNAME='demo'\n").unwrap();

    let output = confenv_cmd()
        .arg("-f")
        .arg(&path)
        .args(["flatten", "--output", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed, serde_json::json!({"NAME": "demo"}));
}

#[test]
fn test_flatten_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();

    confenv_cmd()
        .arg("-f")
        .arg(dir.path().join("absent.json"))
        .arg("flatten")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_get_with_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.json");
    fs::write(&path, r#"{"database": {"port": 5432}}"#).unwrap();

    confenv_cmd()
        .arg("-f")
        .arg(&path)
        .args(["get", "DATABASE_PORT"])
        .assert()
        .success()
        .stdout("5432\n");

    confenv_cmd()
        .arg("-f")
        .arg(&path)
        .args(["get", "DATABASE_USER", "--default", "postgres"])
        .assert()
        .success()
        .stdout("postgres\n");
}

#[test]
fn test_get_missing_key_exit_code() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.env");
    fs::write(&path, "PRESENT=1\n").unwrap();

    confenv_cmd()
        .arg("-f")
        .arg(&path)
        .args(["get", "ABSENT"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Key 'ABSENT' is not set"));
}

#[test]
fn test_malformed_source_exit_code() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"a\": ").unwrap();

    confenv_cmd()
        .arg("-f")
        .arg(&path)
        .arg("flatten")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_unsupported_format_exit_code() {
    confenv_cmd()
        .args(["--format", "toml", "detect"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported config format: toml"));
}

#[test]
fn test_unreadable_source_exit_code() {
    let dir = TempDir::new().unwrap();

    confenv_cmd()
        .arg("-f")
        .arg(dir.path())
        .arg("flatten")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to read config file"));
}
