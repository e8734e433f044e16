//! End-to-end tests for the qa-hook executable.
//!
//! Each test spawns the binary with a cleared environment holding only the
//! package metadata it needs, then checks the exit status and output.

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

fn hook(args: &[&str], env: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qa-hook"))
        .env_clear()
        .args(args)
        .envs(env.iter().copied())
        .output()
        .expect("failed to spawn qa-hook")
}

fn code(output: &Output) -> i32 {
    output.status.code().expect("qa-hook killed by signal")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn config_file(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

fn complete_package() -> Vec<(&'static str, &'static str)> {
    vec![
        ("REPOSITORY_ID", "sabayonlinux.org"),
        ("PKG_ATOM", "app-misc/foo-1.0"),
        ("PKG_CATEGORY", "app-misc"),
        ("PKG_NAME", "foo"),
        ("PKG_VERSION", "1.0"),
        ("PKG_SLOT", "0"),
        ("PKG_LICENSE", "GPL-2"),
        ("PKG_MD5", "d41d8cd98f00b204e9800998ecf8427e"),
        ("PKG_KEYWORDS", "amd64 ~x86"),
        ("PKG_DATE", "1262304000"),
        ("PKG_DEPS", ">=sys-libs/zlib-1.2.3\n!app-misc/foo-legacy"),
        ("PKG_NEEDED_LIBS", "libz.so.1|2\nlibc.so.6|2"),
        ("PKG_PROVIDED_LIBS", "libfoo.so.1|/usr/lib64/libfoo.so.1|2"),
    ]
}

// =========================================================================
// Exit codes
// =========================================================================

#[test]
fn test_empty_environment_passes() {
    let output = hook(&[], &[]);
    assert_eq!(code(&output), 0);
    assert!(stdout(&output).contains("Result: PASS"));
}

#[test]
fn test_name_and_version_only_passes() {
    let output = hook(&[], &[("PKG_NAME", "foo"), ("PKG_VERSION", "1.0")]);
    assert_eq!(code(&output), 0);

    let out = stdout(&output);
    assert!(out.contains("PKG_NAME: foo"));
    assert!(out.contains("PKG_VERSION: 1.0"));
}

#[test]
fn test_complete_package_passes() {
    let output = hook(&[], &complete_package());
    assert_eq!(code(&output), 0, "{}", stdout(&output));
}

#[test]
fn test_warning_exits_one() {
    let output = hook(&[], &[("PKG_KEYWORDS", "amd64 ~")]);
    assert_eq!(code(&output), 1);
    assert!(stdout(&output).contains("[WARNING] keywords"));
}

#[test]
fn test_critical_exits_two() {
    let output = hook(&[], &[("PKG_MD5", "not-a-digest")]);
    assert_eq!(code(&output), 2);
    assert!(stdout(&output).contains("[ERROR] md5-format"));
}

#[test]
fn test_repeated_runs_agree() {
    let env = [("PKG_DEPS", ">=dev-libs/openssl")];
    let first = hook(&[], &env);
    let second = hook(&[], &env);

    assert_eq!(code(&first), 2);
    assert_eq!(code(&first), code(&second));
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_non_ascii_dependency_is_critical() {
    let output = hook(&[], &[("PKG_DEPS", ">=dév-libs/föo-1.0")]);
    assert_eq!(code(&output), 2);
    assert!(stdout(&output).contains("[ERROR] dependency-syntax"));
}

#[test]
fn test_download_uri_without_slashes_is_critical() {
    let output = hook(&[], &[("PKG_DOWNLOAD", "file:/etc/passwd")]);
    assert_eq!(code(&output), 2);
    assert!(stdout(&output).contains("download-path"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_unwritable_report_is_critical() {
    let full = std::fs::File::create("/dev/full").unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_qa-hook"))
        .env_clear()
        .env("PKG_NAME", "foo")
        .stdout(Stdio::from(full))
        .output()
        .expect("failed to spawn qa-hook");

    assert_eq!(code(&output), 2);
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to write report"));
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn test_empty_license_warning_policy() {
    let file = config_file(
        "required_fields: [PKG_LICENSE]\nrules:\n  required-fields:\n    severity: warning\n",
    );
    let config = file.path().to_str().unwrap();

    let output = hook(&[], &[("QA_HOOK_CONFIG", config), ("PKG_LICENSE", "")]);
    assert_eq!(code(&output), 1);
    assert!(stdout(&output).contains("PKG_LICENSE"));
}

#[test]
fn test_empty_license_error_policy() {
    let file = config_file("required_fields: [PKG_LICENSE]\n");
    let config = file.path().to_str().unwrap();

    let output = hook(&["--config", config], &[("PKG_NAME", "foo")]);
    assert_eq!(code(&output), 2);
    assert!(String::from_utf8_lossy(&output.stderr).contains("PKG_LICENSE"));
}

#[test]
fn test_unbounded_date_tolerance_passes() {
    let file = config_file("future_date_tolerance_hours: 4294967295\n");
    let config = file.path().to_str().unwrap();

    let output = hook(
        &["--config", config],
        &[("PKG_NAME", "foo"), ("PKG_DATE", "1262304000")],
    );
    assert_eq!(code(&output), 0, "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("Result: PASS"));
}

#[test]
fn test_missing_config_is_critical() {
    let output = hook(&["--config", "/nonexistent/qa-hook.yaml"], &[]);
    assert_eq!(code(&output), 2);
    assert!(String::from_utf8_lossy(&output.stderr).contains("configuration error"));
}

#[test]
fn test_invalid_config_is_critical() {
    let file = config_file("rules:\n  no-such-rule: {}\n");
    let output = hook(&["-c", file.path().to_str().unwrap()], &[]);
    assert_eq!(code(&output), 2);
}

// =========================================================================
// Arguments and output
// =========================================================================

#[test]
fn test_unknown_argument_is_critical() {
    let output = hook(&["--bogus"], &[]);
    assert_eq!(code(&output), 2);
}

#[test]
fn test_help_exits_zero() {
    let output = hook(&["--help"], &[]);
    assert_eq!(code(&output), 0);
    assert!(stdout(&output).contains("--config"));
}

#[test]
fn test_list_rules() {
    let output = hook(&["--list-rules"], &[("PKG_MD5", "bad")]);
    assert_eq!(code(&output), 0);

    let out = stdout(&output);
    assert!(out.contains("md5-format"));
    assert!(out.contains("build-date"));
}

#[test]
fn test_json_report() {
    let output = hook(
        &["--format", "json"],
        &[("PKG_NAME", "foo"), ("PKG_MD5", "bad")],
    );
    assert_eq!(code(&output), 2);

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["metadata"]["PKG_NAME"], "foo");
    assert_eq!(value["result"], "ERROR");
    assert_eq!(value["exit_code"], 2);
}

#[test]
fn test_quiet_hides_metadata() {
    let output = hook(&["-q"], &[("PKG_NAME", "foo")]);
    assert_eq!(code(&output), 0);
    assert_eq!(stdout(&output), "Result: PASS\n");
}
