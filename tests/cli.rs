#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn grafctl_cmd() -> Command {
    let mut cmd = Command::new(cargo_bin("grafctl"));
    for var in ["GRAFANA_URL", "GRAFANA_API_KEY", "GRAFANA_PATH", "GRAFANA_HEADERS"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn no_command_prints_usage_and_fails() {
    grafctl_cmd()
        .assert()
        .failure()
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn help_flag_succeeds() {
    grafctl_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("push"));
}

#[test]
fn help_command() {
    grafctl_cmd()
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("OPTIONS"));

    grafctl_cmd()
        .args(["help", "get"])
        .assert()
        .success()
        .stdout(predicate::str::contains("retrieves dashboards"));

    grafctl_cmd()
        .args(["help", "bogus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn command_help_flag() {
    grafctl_cmd()
        .args(["list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn unknown_command_fails() {
    grafctl_cmd()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown command"));
}

#[test]
fn get_without_dashboards_is_unsupported() {
    grafctl_cmd()
        .args(["--url", "http://127.0.0.1:1", "get"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not implemented"));
}

#[test]
fn bad_list_format_is_rejected() {
    grafctl_cmd()
        .args(["list", "--format", "table"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn invalid_url_is_a_config_error() {
    grafctl_cmd()
        .args(["--url", "not a url", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config"));
}

#[test]
fn invalid_url_from_environment() {
    grafctl_cmd()
        .env("GRAFANA_URL", "not a url")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config"));
}

#[test]
fn push_requires_db_directory() {
    let temp = TempDir::new().unwrap();
    grafctl_cmd()
        .args(["--url", "http://127.0.0.1:1", "--path"])
        .arg(temp.path())
        .arg("push")
        .assert()
        .failure();
}

#[test]
fn push_with_empty_db_directory_does_nothing() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("db")).unwrap();
    grafctl_cmd()
        .args(["--url", "http://127.0.0.1:1", "push", "--path"])
        .arg(temp.path())
        .assert()
        .success();
}

#[test]
fn unreachable_service_fails() {
    grafctl_cmd()
        .args(["--url", "http://127.0.0.1:1", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn version_flag() {
    grafctl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn piped_logs_have_no_color_codes() {
    grafctl_cmd()
        .args(["-v", "--url", "http://127.0.0.1:1", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("request"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}
