use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn hero(config_dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hero"))
        .env("HERO_CONFIG_DIR", config_dir)
        .env_remove("HERO_CONFIG")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run hero")
}

#[test]
fn config_where_reports_override_directory() {
    let root = TempDir::new().unwrap();

    let output = hero(root.path(), &["config", "where"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let expected = root.path().join("hero.toml");
    assert!(stdout.contains(&expected.display().to_string()));
    assert!(stdout.contains("exists: false"));
}

#[test]
fn config_show_merges_file_and_flags() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join("hero.toml"),
        "[window]\ntitle = \"From file\"\nwidth = 900\n\n[gpu]\npower = \"high\"\n",
    )
    .unwrap();

    let output = hero(root.path(), &["--size", "640x480", "config", "show"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("title = \"From file\""));
    assert!(stdout.contains("width = 640"));
    assert!(stdout.contains("height = 480"));
    assert!(stdout.contains("power = \"high\""));
    assert!(stdout.contains("present_mode = \"auto\""));
}

#[test]
fn config_show_without_file_prints_defaults() {
    let root = TempDir::new().unwrap();

    let output = hero(root.path(), &["config", "show"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("width = 1280"));
    assert!(stdout.contains("transparent = true"));
}

#[test]
fn missing_explicit_config_fails() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("absent.toml");

    let output = hero(
        root.path(),
        &["config", "show", "--config", missing.to_str().unwrap()],
    );
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("absent.toml"));
}

#[test]
fn invalid_config_is_rejected() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("hero.toml"), "[window]\nwidht = 10\n").unwrap();

    let output = hero(root.path(), &["config", "show"]);
    assert!(!output.status.success());
}
