//! End-to-end tests for the formwork binary
//!
//! Gated behind the `integration` feature flag. Run with:
//!
//! ```sh
//! cargo test -p formwork-cli --features integration
//! ```

#![cfg(feature = "integration")]

use std::process::Command;

use tempfile::TempDir;

/// Runs the binary with an isolated project config directory.
fn formwork(args: &[&str], project_dir: &TempDir) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_formwork"))
        .args(args)
        .env("FORMWORK_PROJECT_CONFIG_DIR", project_dir.path())
        .env("XDG_CONFIG_HOME", project_dir.path().join("xdg"))
        .output()
        .expect("Failed to run formwork")
}

#[test]
fn formwork_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    let output = formwork(&["--help"], &dir);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tui"));
    assert!(stdout.contains("rules"));
    assert!(stdout.contains("config"));
}

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();
    let output = formwork(&["config", "show"], &dir);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[ui]"));
    assert!(stdout.contains("start_panel = \"home\""));
    assert!(stdout.contains("success_rate = 0.85"));
}

#[test]
fn project_config_changes_shown_values() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[submission]\ndelay_ms = 42\n",
    )
    .unwrap();

    let output = formwork(&["config", "show"], &dir);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("delay_ms = 42"));
}

#[test]
fn rules_for_admin_with_grant() {
    let dir = TempDir::new().unwrap();
    let output = formwork(&["rules", "--role", "Admin", "--grant", "EXPORT_DATA"], &dir);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let export = stdout
        .lines()
        .find(|l| l.contains("EXPORT_DATA"))
        .expect("EXPORT_DATA row");
    assert!(export.contains("yes"));
}

#[test]
fn unknown_role_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = formwork(&["rules", "--role", "Owner"], &dir);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Owner"));
}

#[test]
fn broken_rule_table_fails_at_startup() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[[permissions]]\nkey = \"BASE_ACCESS\"\nlabel = \"x\"\nmodes = { admin = \"required\" }\n",
    )
    .unwrap();

    let output = formwork(&["config", "show"], &dir);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load configuration"));
}
