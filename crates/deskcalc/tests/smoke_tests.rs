//! Smoke tests for the deskcalc binary

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn deskcalc() -> Command {
    let mut cmd = Command::cargo_bin("deskcalc").expect("deskcalc binary should exist");
    cmd.env_remove("RUST_LOG")
        .env_remove("DESKCALC_MAX_DIGITS")
        .env_remove("DESKCALC_PRECISION");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    deskcalc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    deskcalc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("keys"))
        .stdout(predicate::str::contains("tui"))
        .stdout(predicate::str::contains("--max-digits"));
}

// ============================================================================
// keys subcommand
// ============================================================================

#[test]
fn test_keys_result() {
    deskcalc()
        .args(["keys", "1200*3="])
        .assert()
        .success()
        .stdout("1200*3 =\n3,600\n");
}

#[test]
fn test_keys_percent() {
    deskcalc()
        .args(["keys", "200+10%"])
        .assert()
        .success()
        .stdout("200 + 20\n20\n");
}

#[test]
fn test_keys_division_by_zero_is_a_view_not_a_failure() {
    deskcalc()
        .args(["keys", "6/0="])
        .assert()
        .success()
        .stdout("Cannot divide by zero\nError\n");
}

#[test]
fn test_keys_json() {
    let output = deskcalc()
        .args(["keys", "--json", "9<7"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let view: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(view["display"], "7");
    assert_eq!(view["is_error"], false);
}

#[test]
fn test_keys_unknown_key_fails() {
    deskcalc()
        .args(["keys", "12x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key 'x' at position 2"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_max_digits_flag() {
    deskcalc()
        .args(["--max-digits", "3", "keys", "12345"])
        .assert()
        .success()
        .stdout("123\n");
}

#[test]
fn test_max_digits_env() {
    deskcalc()
        .env("DESKCALC_MAX_DIGITS", "2")
        .args(["keys", "999"])
        .assert()
        .success()
        .stdout("99\n");
}

#[test]
fn test_precision_flag() {
    deskcalc()
        .args(["--precision", "2", "keys", "2/3="])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("\n0.67\n"));
}

#[test]
fn test_invalid_config_fails() {
    deskcalc()
        .args(["--max-digits", "0", "keys", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

// ============================================================================
// Logging
// ============================================================================

#[test]
fn test_log_file_receives_debug_events() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("deskcalc.log");

    deskcalc()
        .args(["-vv", "--log-file"])
        .arg(&log)
        .args(["keys", "1+2="])
        .assert()
        .success()
        .stdout("1+2 =\n3\n");

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("apply"));
    assert!(contents.contains("evaluated"));
}

#[test]
fn test_failed_calculation_logs_warning() {
    deskcalc()
        .args(["keys", "1/0="])
        .assert()
        .success()
        .stderr(predicate::str::contains("calculation failed"));
}
