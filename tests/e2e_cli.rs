//! CLI end-to-end tests
//!
//! Tests for the hlsvault command-line interface.

mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the hlsvault binary
#[allow(deprecated)]
fn hlsvault_cmd() -> Command {
    let mut cmd = Command::cargo_bin("hlsvault").unwrap();
    cmd.env_remove("PORT").env_remove("RUST_LOG");
    cmd
}

/// Write a config pointing both roots into `dir`.
fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let config_file = dir.join("config.toml");
    let vod = dir.join("videos");
    let live = dir.join("live");
    fs::write(
        &config_file,
        format!(
            "[storage]\nvod_root = {:?}\nlive_root = {:?}\n{}",
            vod.to_str().unwrap(),
            live.to_str().unwrap(),
            extra
        ),
    )
    .unwrap();
    config_file
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = hlsvault_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = hlsvault_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("hlsvault"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = hlsvault_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hlsvault"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = hlsvault_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_start_help() {
    let mut cmd = hlsvault_cmd();
    cmd.args(["start", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--host"));
}

#[test]
fn test_cli_start_invalid_port() {
    let mut cmd = hlsvault_cmd();
    cmd.args(["start", "--port", "not-a-port"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_cli_start_rejects_zero_port_flag() {
    let temp = tempdir().unwrap();
    let config_file = write_config(temp.path(), "");

    let mut cmd = hlsvault_cmd();
    cmd.current_dir(temp.path())
        .args([
            "start",
            "--port",
            "0",
            "--config",
            config_file.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("port cannot be 0"));
}

#[test]
fn test_cli_list_rejects_zero_port_env() {
    let temp = tempdir().unwrap();
    let config_file = write_config(temp.path(), "");

    let mut cmd = hlsvault_cmd();
    cmd.current_dir(temp.path())
        .env("PORT", "0")
        .args(["list", "--config", config_file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("port cannot be 0"));
}

#[test]
fn test_cli_check_tools_missing_encoder() {
    let temp = tempdir().unwrap();
    let config_file = write_config(
        temp.path(),
        "[tools]\nffmpeg_path = \"/definitely/not/here/ffmpeg\"\n",
    );

    let mut cmd = hlsvault_cmd();
    cmd.current_dir(temp.path())
        .args(["check-tools", "--config", config_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ ffmpeg"));
}

#[test]
fn test_cli_validate_config() {
    let temp = tempdir().unwrap();
    let config_file = write_config(temp.path(), "[server]\nport = 9090\n");

    let mut cmd = hlsvault_cmd();
    cmd.args(["validate", config_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("9090"));
}

#[test]
fn test_cli_validate_rejects_zero_port() {
    let temp = tempdir().unwrap();
    let config_file = write_config(temp.path(), "[server]\nport = 0\n");

    let mut cmd = hlsvault_cmd();
    cmd.args(["validate", config_file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("port"));
}

#[test]
fn test_cli_validate_rejects_bad_toml() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("config.toml");
    fs::write(&config_file, "this is not = [valid toml").unwrap();

    let mut cmd = hlsvault_cmd();
    cmd.args(["validate", config_file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_cli_list_assets() {
    let temp = tempdir().unwrap();
    let config_file = write_config(temp.path(), "");
    for name in ["beta", "alpha"] {
        let dir = temp.path().join("videos").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.m3u8"), common::vod_playlist(1)).unwrap();
    }
    fs::create_dir_all(temp.path().join("videos").join("incomplete")).unwrap();

    let mut cmd = hlsvault_cmd();
    cmd.current_dir(temp.path())
        .args(["list", "--config", config_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::eq("alpha\nbeta\n"));
}

#[test]
fn test_cli_list_live_missing_root() {
    let temp = tempdir().unwrap();
    let config_file = write_config(temp.path(), "");

    let mut cmd = hlsvault_cmd();
    cmd.current_dir(temp.path())
        .args(["list", "--live", "--config", config_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_cli_import_nonexistent_file() {
    let temp = tempdir().unwrap();
    let config_file = write_config(temp.path(), "");

    let mut cmd = hlsvault_cmd();
    cmd.current_dir(temp.path())
        .args([
            "import",
            "/nonexistent/file.mp4",
            "--config",
            config_file.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[cfg(unix)]
#[test]
fn test_cli_import_with_encoder() {
    let temp = tempdir().unwrap();
    let encoder = common::write_script(temp.path(), "ffmpeg", common::FAKE_ENCODER);
    let config_file = write_config(
        temp.path(),
        &format!("[tools]\nffmpeg_path = {:?}\n", encoder.to_str().unwrap()),
    );
    let input = temp.path().join("Road Trip.mp4");
    fs::write(&input, b"video").unwrap();

    let mut cmd = hlsvault_cmd();
    cmd.current_dir(temp.path())
        .args([
            "import",
            input.to_str().unwrap(),
            "--config",
            config_file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported asset: Road-Trip"))
        .stdout(predicate::str::contains("/api/assets/Road-Trip/stream"));

    assert!(temp
        .path()
        .join("videos/Road-Trip/index.m3u8")
        .exists());
}
