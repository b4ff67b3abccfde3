//! CLI integration tests
//!
//! Run the built `nodediff` binary against the store crate's YAML fixtures.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("nodediff-store")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run(temp_dir: &TempDir, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_nodediff-cli");
    Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn compare_args(extra: &[&str]) -> Vec<String> {
    let mut args = vec![
        "compare".to_string(),
        "--before".to_string(),
        fixture("before.yaml").display().to_string(),
        "--after".to_string(),
        fixture("after.yaml").display().to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    args
}

fn run_compare(temp_dir: &TempDir, extra: &[&str]) -> Output {
    let args = compare_args(extra);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    run(temp_dir, &args)
}

#[test]
fn test_compare_prints_summary_and_writes_default_report() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_compare(&temp_dir, &[]);

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Quality score: 60.0%"));
    assert!(stdout.contains("Detailed report saved to: comparison_report.json"));

    let report = std::fs::read_to_string(temp_dir.path().join("comparison_report.json")).unwrap();
    let report: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(report["stats"]["total_before"], 6);
    assert_eq!(report["stats"]["missing"][0], "retired");
    assert_eq!(report["field_diffs"]["flow"], 1);
}

#[test]
fn test_compare_writes_report_to_custom_path() {
    let temp_dir = TempDir::new().unwrap();
    let report_path = temp_dir.path().join("out").join("report.json");

    let output = run_compare(&temp_dir, &["--report", report_path.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(report_path.exists());
    assert!(!temp_dir.path().join("comparison_report.json").exists());
}

#[test]
fn test_no_report_skips_persistence() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_compare(&temp_dir, &["--no-report"]);

    assert!(output.status.success());
    assert!(!temp_dir.path().join("comparison_report.json").exists());
}

#[test]
fn test_fail_on_issues_exits_with_two() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_compare(&temp_dir, &["--no-report", "--fail-on-issues"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_fail_on_issues_without_issues_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    let same = fixture("after.yaml").display().to_string();

    let output = run(
        &temp_dir,
        &[
            "compare",
            "--before",
            &same,
            "--after",
            &same,
            "--no-report",
            "--fail-on-issues",
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("All differences are legitimate; nothing to fix."));
}

#[test]
fn test_redact_hides_credentials() {
    let temp_dir = TempDir::new().unwrap();

    let plain = run_compare(&temp_dir, &["--no-report"]);
    let redacted = run_compare(&temp_dir, &["--no-report", "--redact"]);

    assert!(String::from_utf8_lossy(&plain.stdout).contains("secret-one"));
    let stdout = String::from_utf8_lossy(&redacted.stdout);
    assert!(!stdout.contains("secret-one"));
    assert!(stdout.contains("***REDACTED***"));
}

#[test]
fn test_max_type_examples_limits_listing() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_compare(&temp_dir, &["--no-report", "--max-type-examples", "1"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("All differences by node type"));
    assert!(stdout.contains("examples (up to 1):"));
}

#[test]
fn test_missing_input_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(
        &temp_dir,
        &["compare", "--before", "nope.yaml", "--after", "nope.yaml"],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: [ERR_NOT_FOUND]"));
}

#[test]
fn test_normalize_prints_canonical_records() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture("before.yaml").display().to_string();

    let output = run(
        &temp_dir,
        &["normalize", "--input", &input, "--name", "hk-vless"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["flow"], "xtls-rprx-vision-udp443");
    assert_eq!(record["type"], "vless");
}
