//! Loader tests against YAML fixtures on disk.

use nodediff_core::errors::ExErrorKind;
use nodediff_store::loader::load_node_set;
use serde_json::json;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_before_fixture() {
    let set = load_node_set(&fixture("before.yaml")).unwrap();

    assert_eq!(set.len(), 6);
    let names: Vec<String> = set.iter().map(|n| n.name()).collect();
    assert_eq!(
        names,
        vec!["hk-vless", "jp-vmess", "us-trojan", "dup", "dup", "retired"]
    );
}

#[test]
fn test_verbatim_str_tag_is_loaded_as_string() {
    let set = load_node_set(&fixture("before.yaml")).unwrap();

    let trojan = set.iter().find(|n| n.name() == "us-trojan").unwrap();
    assert_eq!(trojan.get("port"), Some(&json!("443")));
}

#[test]
fn test_nested_maps_survive_conversion() {
    let set = load_node_set(&fixture("before.yaml")).unwrap();

    let vmess = set.iter().find(|n| n.name() == "jp-vmess").unwrap();
    assert_eq!(
        vmess.get("ws-opts"),
        Some(&json!({"path": "/ray?ed=2048", "headers": {}}))
    );
}

#[test]
fn test_missing_file_is_not_found() {
    let err = load_node_set(&fixture("does_not_exist.yaml")).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("load_node_set"));
}

#[test]
fn test_sequence_root_is_rejected() {
    let err = load_node_set(&fixture("not_a_mapping.yaml")).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidDocument);
    assert!(err.path().unwrap().ends_with("not_a_mapping.yaml"));
}

#[test]
fn test_non_mapping_proxy_entry_is_rejected() {
    let err = load_node_set(&fixture("bad_proxy_entry.yaml")).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidDocument);
    assert_eq!(err.code(), "ERR_INVALID_DOCUMENT");
}
