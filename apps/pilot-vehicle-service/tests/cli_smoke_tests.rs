#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the pilot-vehicle-service binary
//!
//! These tests run the binary end to end: configuration loading, conformance
//! checking during assembly, and the scripted run.

use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Helper to run the pilot-vehicle-service binary with given arguments
fn run_service(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_pilot-vehicle-service"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("PILOT__CONFORMANCE__ENABLED")
        .env_remove("PILOT__CONFORMANCE__APPLICATION_ROOT")
        .env_remove("PILOT__FEATURES__VEHICLE_REPORT_AUDIT")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute pilot-vehicle-service")
}

fn write_config(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, contents).expect("Failed to write config");
    path_arg(&path)
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_cli_help_command() {
    let output = run_service(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage:") || stdout.contains("USAGE:"),
        "Should contain usage information"
    );
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(
        stdout.contains("--print-config"),
        "Should mention print-config option"
    );
}

#[test]
fn test_cli_version_command() {
    let output = run_service(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("pilot-vehicle-service"),
        "Should contain binary name"
    );
    assert!(
        stdout.chars().any(|c| c.is_ascii_digit()),
        "Should contain version numbers"
    );
}

#[test]
fn test_cli_invalid_command() {
    let output = run_service(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "Should report an error: {stderr}");
}

#[test]
fn test_cli_missing_config_file() {
    let output = run_service(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(
        !output.status.success(),
        "Should fail when config file doesn't exist"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("does not exist"),
        "Should indicate config file not found: {stderr}"
    );
}

#[test]
fn test_cli_check_passes_with_default_wiring() {
    let output = run_service(&["check"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Check should succeed: {stderr}");
    assert!(
        stdout.contains("Conformance check passed: 8 components"),
        "Should report the verified components: {stdout}"
    );
    assert!(stdout.contains("VehicleCommandService"));
    assert!(stdout.contains("PilotApplication"));
}

#[test]
fn test_cli_check_fails_on_miswired_report_service() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(
        &temp_dir,
        r"
features:
  vehicle_report_audit: true
",
    );

    let output = run_service(&["--config", &config, "check"]);

    assert!(
        !output.status.success(),
        "Startup should abort on a conformance violation"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("can only inject") && stderr.contains("cannot inject a CommandService"),
        "Should name the violated rule: {stderr}"
    );
    assert!(
        stderr.contains("VehicleReportService"),
        "Should name the offending component: {stderr}"
    );
}

#[test]
fn test_cli_disabled_conformance_allows_miswiring() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(
        &temp_dir,
        r"
conformance:
  enabled: false
features:
  vehicle_report_audit: true
",
    );

    let output = run_service(&["--config", &config, "check"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Check should succeed: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Conformance checking disabled: 9 components assembled"),
        "Should not claim a verdict: {stdout}"
    );
    assert!(!stdout.contains("Conformance check passed"));
}

#[test]
fn test_cli_print_config_outputs_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(
        &temp_dir,
        r"
logging:
  level: warn
services:
  transunion:
    min_year: 1995
",
    );

    let output = run_service(&["--config", &config, "--print-config"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "print-config should succeed: {stderr}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("conformance:"), "Should contain conformance section");
    assert!(stdout.contains("min_year: 1995"), "Should contain service section");

    let parsed: Result<std::collections::HashMap<String, serde_json::Value>, _> =
        serde_saphyr::from_str(&stdout);
    assert!(parsed.is_ok(), "Output should be valid YAML");
}

#[test]
fn test_cli_run_prints_json_report() {
    let output = run_service(&["run"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Run should succeed: {stderr}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: serde_json::Value =
        serde_json::from_str(&stdout).expect("Run output should be JSON");
    assert_eq!(report["registered"].as_array().map(Vec::len), Some(4));
    assert_eq!(report["removed"], serde_json::json!([2]));
    assert_eq!(report["remaining"].as_array().map(Vec::len), Some(3));
    assert_eq!(report["lookup"]["make"], "Toyota");
}

#[test]
fn test_cli_run_rejects_vehicles_outside_coverage() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(
        &temp_dir,
        r"
services:
  transunion:
    min_year: 2022
",
    );

    let output = run_service(&["--config", &config, "run"]);

    assert!(!output.status.success(), "Run should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("vehicle rejected"), "Should explain: {stderr}");
}
