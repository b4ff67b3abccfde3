//! End-to-end comparison scenarios.
//!
//! All tests operate on in-memory node sets built with `json!` (no I/O).

use nodediff_core::compare::{compare, ComparisonResult};
use nodediff_core::model::NodeSet;
use serde_json::{json, Value};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn node_set(proxies: Value) -> NodeSet {
    serde_json::from_value(json!({ "proxies": proxies })).unwrap()
}

fn vless(name: &str, extra: Value) -> Value {
    let mut node = json!({"name": name, "type": "vless", "server": "s", "port": 443});
    if let (Some(obj), Value::Object(extra)) = (node.as_object_mut(), extra) {
        obj.extend(extra);
    }
    node
}

fn legit_fields(result: &ComparisonResult, node_type: &str) -> Vec<String> {
    result
        .legitimate_diffs
        .get(node_type)
        .map(|d| d.iter().map(|e| e.field.clone()).collect())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_flow_suffix_end_to_end() {
    let before = node_set(json!([vless("n1", json!({"flow": "xtls-rprx-vision-udp443"}))]));
    let after = node_set(json!([vless("n1", json!({"flow": "xtls-rprx-vision"}))]));

    let result = compare(&before, &after);

    assert_eq!(result.stats.total_before, 1);
    assert_eq!(result.stats.total_after, 1);
    assert_eq!(result.stats.common, vec!["n1".to_string()]);
    assert!(result.stats.missing.is_empty());
    assert!(result.stats.new.is_empty());
    assert_eq!(legit_fields(&result, "vless"), vec!["flow".to_string()]);
    assert_eq!(result.total_legitimate(), 1);
    assert_eq!(result.total_actual(), 0);
    assert_eq!(result.field_diffs.get("flow"), Some(&1));
    assert_eq!(result.quality_score(), Some(100.0));
}

#[test]
fn test_identical_sets_produce_no_diffs() {
    let nodes = node_set(json!([
        vless("a", json!({"uuid": "u"})),
        {"name": "b", "type": "ss", "cipher": "aes-256-gcm", "password": "p"}
    ]));

    let result = compare(&nodes, &nodes);

    assert_eq!(result.stats.common.len(), 2);
    assert!(result.differences.is_empty());
    assert!(result.field_diffs.is_empty());
    assert_eq!(result.quality_score(), None);
}

#[test]
fn test_missing_and_new_nodes() {
    let before = node_set(json!([vless("kept", json!({})), vless("dropped", json!({}))]));
    let after = node_set(json!([vless("kept", json!({})), vless("added", json!({}))]));

    let result = compare(&before, &after);

    assert_eq!(result.stats.missing, vec!["dropped".to_string()]);
    assert_eq!(result.stats.new, vec!["added".to_string()]);
    assert_eq!(result.stats.common, vec!["kept".to_string()]);
}

#[test]
fn test_duplicate_names_of_different_types_both_match() {
    let before = node_set(json!([
        {"name": "X", "type": "ss", "cipher": "c1", "password": "p"},
        {"name": "X", "type": "trojan", "password": "p"}
    ]));
    let after = node_set(json!([
        {"name": "X", "type": "ss", "cipher": "c2", "password": "p"},
        {"name": "X", "type": "trojan", "password": "p"}
    ]));

    let result = compare(&before, &after);

    assert_eq!(
        result.stats.common,
        vec!["X".to_string(), "X###trojan###1".to_string()]
    );
    assert_eq!(result.duplicates.before.len(), 1);
    assert_eq!(result.duplicates.before[0].count, 2);
    assert_eq!(result.duplicates.after[0].name, "X");

    let ss_issues = &result.actual_issues["ss"];
    assert_eq!(ss_issues.len(), 1);
    assert_eq!(ss_issues[0].field, "cipher");
    assert!(!result.differences.contains_key("trojan"));
}

#[test]
fn test_mixed_legitimate_and_actual_on_one_node() {
    let before = node_set(json!([{
        "name": "m", "type": "vmess", "server": "s", "port": 443,
        "uuid": "u1", "network": "ws", "ws-opts": {"path": "/ws?ed=2048"}
    }]));
    let after = node_set(json!([{
        "name": "m", "type": "vmess", "server": "s", "port": 8443,
        "uuid": "u1", "network": "ws", "ws-opts": {"path": "/ws", "max-early-data": 2048}
    }]));

    let result = compare(&before, &after);

    let node = &result.differences["vmess"][0];
    assert_eq!(node.name, "m");
    assert_eq!(node.node_type, "vmess");
    assert!(node.legitimate.contains_key("ws-opts"));
    assert!(node.issues.contains_key("port"));
    assert_eq!(node.diffs.len(), 2);

    assert_eq!(result.actual_issues["vmess"][0].field, "port");
    assert_eq!(result.actual_issues["vmess"][0].reason, None);
    assert!(result.legitimate_diffs["vmess"][0].reason.is_some());

    let type_issues = &result.type_issues["vmess"];
    assert_eq!(type_issues.len(), 2);
    assert!(type_issues.iter().any(|e| e.field == "port" && !e.is_legitimate && e.reason.is_empty()));
    assert!(type_issues.iter().any(|e| e.field == "ws-opts" && e.is_legitimate && !e.reason.is_empty()));
    assert_eq!(result.quality_score(), Some(50.0));
}

#[test]
fn test_port_type_drift_is_an_issue() {
    let before = node_set(json!([{"name": "p", "type": "ss", "port": "443"}]));
    let after = node_set(json!([{"name": "p", "type": "ss", "port": 443}]));

    let result = compare(&before, &after);

    let issue = &result.actual_issues["ss"][0];
    assert_eq!(issue.before, json!("443"));
    assert_eq!(issue.after, json!(443));
}

#[test]
fn test_reality_servername_moved_into_reality_opts_is_no_diff() {
    let before = node_set(json!([vless(
        "r",
        json!({
            "tls": true,
            "servername": "sni.example.com",
            "reality-opts": {"public-key": "pk", "short-id": "ab"}
        })
    )]));
    let after = node_set(json!([vless(
        "r",
        json!({
            "tls": true,
            "reality-opts": {"public-key": "pk", "short-id": "ab", "servername": "sni.example.com"}
        })
    )]));

    let result = compare(&before, &after);

    assert_eq!(result.stats.common, vec!["r".to_string()]);
    assert!(result.differences.is_empty());
    assert_eq!(result.quality_score(), None);
}

#[test]
fn test_reality_inner_servername_wins_over_top_level() {
    let before = node_set(json!([vless(
        "r",
        json!({
            "tls": true,
            "servername": "outer.example.com",
            "reality-opts": {"public-key": "pk", "servername": "inner.example.com"}
        })
    )]));
    let after = node_set(json!([vless(
        "r",
        json!({
            "tls": true,
            "reality-opts": {"public-key": "pk", "servername": "outer.example.com"}
        })
    )]));

    let result = compare(&before, &after);

    let issue = &result.actual_issues["vless"][0];
    assert_eq!(issue.field, "reality-opts");
    assert_eq!(issue.before["servername"], json!("inner.example.com"));
    assert_eq!(issue.after["servername"], json!("outer.example.com"));
}

#[test]
fn test_unknown_type_compares_base_fields_only() {
    let before = node_set(json!([{"name": "w", "type": "wireguard", "server": "a", "private-key": "k1"}]));
    let after = node_set(json!([{"name": "w", "type": "wireguard", "server": "a", "private-key": "k2"}]));

    let result = compare(&before, &after);

    assert!(result.differences.is_empty());
}

#[test]
fn test_type_change_groups_under_before_type() {
    let before = node_set(json!([{"name": "t", "type": "vmess", "uuid": "u"}]));
    let after = node_set(json!([{"name": "t", "type": "vless", "uuid": "u"}]));

    let result = compare(&before, &after);

    assert!(result.differences.contains_key("vmess"));
    assert!(result.field_diffs.contains_key("type"));
    assert!(result.field_diffs.contains_key("alterId"));
}

#[test]
fn test_result_survives_json_round_trip() {
    let before = node_set(json!([vless("n1", json!({"client-fingerprint": ""}))]));
    let after = node_set(json!([vless("n1", json!({"client-fingerprint": "chrome"}))]));

    let result = compare(&before, &after);
    let text = serde_json::to_string(&result).unwrap();
    let reparsed: ComparisonResult = serde_json::from_str(&text).unwrap();

    assert_eq!(reparsed, result);
}

#[test]
fn test_persisted_shape_has_report_keys() {
    let before = node_set(json!([vless("n1", json!({"flow": "xtls-rprx-vision-udp443"}))]));
    let after = node_set(json!([vless("n1", json!({"flow": "xtls-rprx-vision"}))]));

    let value = serde_json::to_value(compare(&before, &after)).unwrap();

    for key in ["stats", "differences", "field_diffs", "type_issues", "legitimate_diffs", "actual_issues"] {
        assert!(value.get(key).is_some(), "missing report key {}", key);
    }
    assert_eq!(value["stats"]["total_before"], json!(1));
    assert_eq!(value["differences"]["vless"][0]["type"], json!("vless"));
    assert!(value["legitimate_diffs"]["vless"][0]["reason"].is_string());
}

#[test]
fn test_key_partition_has_no_overlap() {
    let before = node_set(json!([vless("a", json!({})), vless("b", json!({})), vless("a", json!({}))]));
    let after = node_set(json!([vless("b", json!({})), vless("c", json!({}))]));

    let result = compare(&before, &after);

    let missing: BTreeSet<_> = result.stats.missing.iter().collect();
    let new: BTreeSet<_> = result.stats.new.iter().collect();
    let common: BTreeSet<_> = result.stats.common.iter().collect();
    assert!(missing.is_disjoint(&new));
    assert!(missing.is_disjoint(&common));
    assert!(new.is_disjoint(&common));
    assert_eq!(missing.len() + new.len() + common.len(), 4);
}
