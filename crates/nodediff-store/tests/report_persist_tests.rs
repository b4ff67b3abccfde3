//! Report persistence tests: load fixtures, compare, write, read back.

use nodediff_core::compare::{compare, ComparisonResult};
use nodediff_store::loader::load_node_set;
use nodediff_store::report::write_report;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_result() -> ComparisonResult {
    let before = load_node_set(&fixture("before.yaml")).unwrap();
    let after = load_node_set(&fixture("after.yaml")).unwrap();
    compare(&before, &after)
}

#[test]
fn test_fixture_comparison_classifies_every_diff() {
    let result = fixture_result();

    assert_eq!(result.stats.total_before, 6);
    assert_eq!(result.stats.total_after, 6);
    assert_eq!(result.stats.missing, vec!["retired".to_string()]);
    assert_eq!(result.stats.new, vec!["brand-new".to_string()]);
    assert_eq!(result.stats.common.len(), 5);
    assert_eq!(result.total_legitimate(), 3);
    assert_eq!(result.total_actual(), 2);
    assert_eq!(result.quality_score(), Some(60.0));

    let trojan_fields: Vec<&str> = result.actual_issues["trojan"]
        .iter()
        .map(|e| e.field.as_str())
        .collect();
    assert_eq!(trojan_fields, vec!["password", "port"]);
}

#[test]
fn test_write_report_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("comparison_report.json");
    let result = fixture_result();

    write_report(&path, &result).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let reparsed: ComparisonResult = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed, result);
}

#[test]
fn test_report_is_pretty_printed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("comparison_report.json");

    write_report(&path, &fixture_result()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"stats\""));
    assert!(text.ends_with("}\n"));
}

#[test]
fn test_write_report_overwrites_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("comparison_report.json");
    fs::write(&path, "stale").unwrap();

    write_report(&path, &fixture_result()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("stale"));
}

#[test]
fn test_write_report_into_directory_path_fails() {
    let temp_dir = TempDir::new().unwrap();

    let err = write_report(temp_dir.path(), &fixture_result()).unwrap_err();

    assert_eq!(err.op(), Some("write_report"));
}
