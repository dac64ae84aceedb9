//! Tests for settings load/save through the binary (non-interactive paths only)
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use sysperf::config::{load_settings_from, Settings};

fn run_sysperf(args: &[&str], config_home: &Path) -> (bool, String) {
    let exe = env!("CARGO_BIN_EXE_sysperf");
    let output = Command::new(exe)
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .output()
        .expect("run sysperf");
    let ok = output.status.success();
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    (ok, text)
}

fn settings_path(config_home: &Path) -> PathBuf {
    config_home.join("sysperf").join("config.json")
}

#[test]
fn test_settings_not_written_without_save() {
    let td = tempfile::tempdir().unwrap();
    let (ok, out) = run_sysperf(&["--interval", "800", "--dry-run"], td.path());
    assert!(ok, "{out}");
    assert!(!settings_path(td.path()).exists());
    assert!(out.contains("\"interval_ms\": 800"), "{out}");
}

#[test]
fn test_save_creates_settings_file() {
    let td = tempfile::tempdir().unwrap();
    let (ok, out) = run_sysperf(&["--interval", "800", "--save", "--dry-run"], td.path());
    assert!(ok, "{out}");
    let saved = load_settings_from(&settings_path(td.path()));
    assert_eq!(
        saved,
        Settings {
            interval_ms: 800,
            ..Settings::default()
        }
    );
}

#[test]
fn test_overrides_layer_over_file() {
    let td = tempfile::tempdir().unwrap();
    let path = settings_path(td.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{ "interval_ms": 2000, "capacity": 30 }"#).unwrap();

    let (ok, out) = run_sysperf(&["--capacity", "60", "--dry-run"], td.path());
    assert!(ok, "{out}");
    assert!(out.contains("\"interval_ms\": 2000"), "{out}");
    assert!(out.contains("\"capacity\": 60"), "{out}");
    // file untouched without --save
    let data = fs::read_to_string(&path).unwrap();
    assert!(data.contains("30"));
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let td = tempfile::tempdir().unwrap();
    let path = settings_path(td.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ interval_ms: ").unwrap();

    let (ok, out) = run_sysperf(&["--dry-run"], td.path());
    assert!(ok, "{out}");
    assert!(out.contains("\"interval_ms\": 1500"), "{out}");
    assert!(out.contains("ignoring malformed"), "{out}");
}
