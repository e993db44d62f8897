#![cfg(unix)]

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_cargo-relocate");

fn run_cli(base: &TempDir, caller: &TempDir, args: &[&str]) -> Output {
    Command::new(BIN)
        .arg("--base-dir")
        .arg(base.path())
        .args(args)
        .current_dir(caller.path())
        .output()
        .unwrap()
}

fn write_script(base: &TempDir, body: &str) {
    fs::write(base.path().join("cargo.sh"), body).unwrap();
}

#[test]
fn success_exits_zero_and_copies() {
    let base = TempDir::new().unwrap();
    let caller = TempDir::new().unwrap();
    write_script(
        &base,
        "echo building \"$@\"\nmkdir -p release && printf bin > release/app.bin\n",
    );

    let out = run_cli(&base, &caller, &["--release", "--rename", "app.bin", "out"]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read_to_string(caller.path().join("out")).unwrap(), "bin");
    // Build output passes through untouched.
    assert_eq!(String::from_utf8_lossy(&out.stdout), "building build --release\n");
}

#[test]
fn build_exit_code_is_propagated() {
    let base = TempDir::new().unwrap();
    let caller = TempDir::new().unwrap();
    write_script(&base, "echo broken >&2\nexit 2\n");

    let out = run_cli(&base, &caller, &["app"]);

    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("broken"));
    assert!(stderr.contains("error[build.failed]"));
    assert!(!caller.path().join("app").exists());
}

#[test]
fn trailing_rename_is_a_usage_error() {
    let base = TempDir::new().unwrap();
    let caller = TempDir::new().unwrap();
    write_script(&base, "touch ran\n");

    let out = run_cli(&base, &caller, &["--release", "--rename"]);

    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error[validation.missing_argument]"));
    assert!(!base.path().join("ran").exists());
}

#[test]
fn missing_artifact_reports_both_paths() {
    let base = TempDir::new().unwrap();
    let caller = TempDir::new().unwrap();
    write_script(&base, "true\n");

    let out = run_cli(&base, &caller, &["app"]);

    assert_eq!(out.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error[relocate.source_missing]"));
    assert!(stderr.contains("source: "));
    assert!(stderr.contains("debug/app"));
    assert!(stderr.contains("destination: "));
}

#[test]
fn json_summary_is_printed_after_build_output() {
    let base = TempDir::new().unwrap();
    let caller = TempDir::new().unwrap();
    write_script(&base, "true\n");

    let out = Command::new(BIN)
        .arg("--base-dir")
        .arg(base.path())
        .arg("--json")
        .arg("--locked")
        .current_dir(caller.path())
        .output()
        .unwrap();

    assert!(out.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["success"], true);
    assert_eq!(summary["data"]["mode"], "debug");
    assert!(summary["data"].get("relocation").is_none());
}

#[test]
fn custom_build_script_is_used() {
    let base = TempDir::new().unwrap();
    let caller = TempDir::new().unwrap();
    let script = caller.path().join("driver.sh");
    fs::write(&script, "[ \"$1\" = build ] && touch driver-ran\n").unwrap();

    let out = Command::new(BIN)
        .arg("--base-dir")
        .arg(base.path())
        .arg("--build-script")
        .arg(&script)
        .current_dir(caller.path())
        .output()
        .unwrap();

    assert!(out.status.success());
    assert!(base.path().join("driver-ran").exists());
}

#[test]
fn leading_help_and_version_reach_the_build() {
    for flag in ["--version", "--help", "-h", "-V"] {
        let base = TempDir::new().unwrap();
        let caller = TempDir::new().unwrap();
        write_script(&base, "printf '%s\\n' \"$@\" > invoked.txt\n");

        let out = run_cli(&base, &caller, &[flag, "--release"]);

        assert!(out.status.success(), "flag: {}", flag);
        assert!(out.stdout.is_empty(), "flag: {}", flag);
        let invoked = fs::read_to_string(base.path().join("invoked.txt")).unwrap();
        assert_eq!(invoked, format!("build\n{}\n--release\n", flag));
    }
}

#[test]
fn wrapper_version_is_long_only() {
    let out = Command::new(BIN).arg("--wrapper-version").output().unwrap();

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("cargo-relocate "));
}

#[test]
fn absolute_rename_fails_before_building() {
    let base = TempDir::new().unwrap();
    let caller = TempDir::new().unwrap();
    write_script(&base, "touch ran\n");

    let out = run_cli(&base, &caller, &["--rename", "/etc/hostname", "out"]);

    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error[validation.invalid_argument]"));
    assert!(!base.path().join("ran").exists());
    assert!(!caller.path().join("out").exists());
}
