// crates/generate_unit/tests/generate_unit_integration.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Builds the binary command with a clean environment pointing at `dir`.
fn generate_unit_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("generate_unit").unwrap();
    cmd.env("SYSTEMD_CONFIG_DIR", dir.path()).env_remove("RUST_LOG");
    cmd
}

fn dir_is_empty(dir: &TempDir) -> bool {
    fs::read_dir(dir.path()).unwrap().next().is_none()
}

#[test]
fn test_generate_unit_writes_service_file() {
    let dir = TempDir::new().unwrap();

    generate_unit_cmd(&dir)
        .args([
            "-name", "myapp", "-d", "My app", "-wd", "/srv/myapp", "-cmd",
            "/usr/local/bin/myapp --serve", "-after", "foo bar",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let contents = fs::read_to_string(dir.path().join("myapp.service")).unwrap();
    let expected = "\
[Unit]
Description=My app
Wants=network-online.target
After=network-online.target foo bar

[Service]
User=www-data
Group=www-data
Type=simple
Restart=on-failure
ExecStart=/usr/local/bin/myapp --serve
WorkingDirectory=/srv/myapp

[Install]
WantedBy=multi-user.target
";
    assert_eq!(contents, expected);
}

#[test]
fn test_generate_unit_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let args = ["-name", "myapp", "-cmd", "/usr/bin/myapp"];
    let path = dir.path().join("myapp.service");

    generate_unit_cmd(&dir).args(args).assert().success();
    let first = fs::read(&path).unwrap();
    generate_unit_cmd(&dir).args(args).assert().success();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[cfg(unix)]
#[test]
fn test_generate_unit_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    generate_unit_cmd(&dir)
        .args(["-name", "myapp", "-cmd", "/usr/bin/myapp"])
        .assert()
        .success();

    let mode = fs::metadata(dir.path().join("myapp.service"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_generate_unit_stdout_mode() {
    let dir = TempDir::new().unwrap();

    generate_unit_cmd(&dir)
        .args(["-name", "myapp", "-cmd", "/usr/bin/myapp", "-stdout"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[Unit]\n"))
        .stdout(predicate::str::contains("ExecStart=/usr/bin/myapp\n"))
        .stdout(predicate::str::ends_with("WantedBy=multi-user.target\n\n"));

    assert!(dir_is_empty(&dir));
}

#[test]
fn test_generate_unit_missing_name() {
    let dir = TempDir::new().unwrap();

    generate_unit_cmd(&dir)
        .args(["-cmd", "/usr/bin/myapp", "-stdout"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Argument name is required"));

    assert!(dir_is_empty(&dir));
}

#[test]
fn test_generate_unit_missing_cmd() {
    let dir = TempDir::new().unwrap();

    generate_unit_cmd(&dir)
        .args(["-name", "myapp"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Argument cmd is required"));

    assert!(dir_is_empty(&dir));
}

#[test]
fn test_generate_unit_both_missing_reports_cmd() {
    let dir = TempDir::new().unwrap();

    generate_unit_cmd(&dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Argument cmd is required"))
        .stderr(predicate::str::contains("Argument name is required").not());
}

#[test]
fn test_generate_unit_help_bypasses_validation() {
    let dir = TempDir::new().unwrap();

    generate_unit_cmd(&dir)
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("-systemd-config-dir"))
        .stdout(predicate::str::contains("Name of the daemon"));

    assert!(dir_is_empty(&dir));
}

#[test]
fn test_generate_unit_flag_overrides_env_dir() {
    let env_dir = TempDir::new().unwrap();
    let flag_dir = TempDir::new().unwrap();

    generate_unit_cmd(&env_dir)
        .args(["-name", "myapp", "-cmd", "/usr/bin/myapp", "-systemd-config-dir"])
        .arg(flag_dir.path())
        .assert()
        .success();

    assert!(dir_is_empty(&env_dir));
    assert!(flag_dir.path().join("myapp.service").exists());
}

#[test]
fn test_generate_unit_missing_output_dir_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let assert = generate_unit_cmd(&dir)
        .args(["-name", "myapp", "-cmd", "/usr/bin/myapp", "-systemd-config-dir"])
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to write"))
        .stderr(predicate::str::contains("Caused by").not());

    // The io cause is reported once, on the same line.
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert_eq!(stderr.matches("os error").count(), 1);
    assert_eq!(stderr.lines().count(), 1);
}

#[test]
fn test_generate_unit_unknown_flag_fails() {
    let dir = TempDir::new().unwrap();

    generate_unit_cmd(&dir)
        .args(["-name", "myapp", "-cmd", "/usr/bin/myapp", "-bogus"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Invalid arguments: flag provided but not defined: -bogus",
        ));

    assert!(dir_is_empty(&dir));
}

#[test]
fn test_generate_unit_repeated_flag_last_wins() {
    let dir = TempDir::new().unwrap();

    generate_unit_cmd(&dir)
        .args(["-name", "first", "-cmd", "/usr/bin/myapp", "-name", "second"])
        .assert()
        .success();

    assert!(!dir.path().join("first.service").exists());
    assert!(dir.path().join("second.service").exists());
}

#[test]
fn test_generate_unit_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();

    generate_unit_cmd(&dir)
        .args(["-name", "myapp", "-cmd", "/usr/bin/myapp", "-verbose"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("wrote unit file"));
}
