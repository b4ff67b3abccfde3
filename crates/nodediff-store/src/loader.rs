//! Node-set loader
//!
//! Parses a YAML proxy configuration and extracts its `proxies` sequence.
//! Values pass through serde_yaml's document model and are converted to
//! `serde_json::Value`, the representation the comparison engine works on.

#![allow(clippy::result_large_err)]

use crate::errors::{read_error, yaml_error, Result};
use nodediff_core::errors::{ExError, NodeDiffError};
use nodediff_core::model::{NodeRecord, NodeSet};
use nodediff_core::{log_op_end, log_op_error, log_op_start};
use serde_json::{Map, Number, Value};
use serde_yaml::value::TaggedValue;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Label used in errors when parsing text that did not come from a file
const INLINE_LABEL: &str = "<inline>";

const PROXIES_KEY: &str = "proxies";

const VERBATIM_STR_TAG: &str = "!<str>";

/// Load a node set from a YAML file
///
/// # Errors
///
/// `NotFound`/`Io` when the file cannot be read, `InvalidInput` when it is
/// not YAML, `InvalidDocument` when it is not a `proxies` document.
pub fn load_node_set(path: &Path) -> Result<NodeSet> {
    log_op_start!("load_node_set", path = %path.display());
    let start = std::time::Instant::now();

    let loaded = fs::read_to_string(path)
        .map_err(|e| read_error(path, e))
        .and_then(|content| parse_with_label(&content, &path.display().to_string()));

    match loaded {
        Ok(set) => {
            log_op_end!(
                "load_node_set",
                duration_ms = start.elapsed().as_millis() as u64,
                nodes = set.len()
            );
            Ok(set)
        }
        Err(err) => {
            log_op_error!(
                "load_node_set",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

/// Parse a node set from YAML text
///
/// # Errors
///
/// Same as [`load_node_set`] minus the I/O failures.
pub fn parse_node_set_str(content: &str) -> Result<NodeSet> {
    parse_with_label(content, INLINE_LABEL)
}

/// Rewrite the verbatim `!<str>` tag some exporters emit to the core `!!str`
fn normalize_str_tags(content: &str) -> Cow<'_, str> {
    if content.contains(VERBATIM_STR_TAG) {
        Cow::Owned(content.replace(VERBATIM_STR_TAG, "!!str"))
    } else {
        Cow::Borrowed(content)
    }
}

fn parse_with_label(content: &str, label: &str) -> Result<NodeSet> {
    let document: serde_yaml::Value = serde_yaml::from_str(&normalize_str_tags(content))
        .map_err(|e| yaml_error(label, e))?;

    let root = match yaml_to_json(document) {
        Value::Object(root) => root,
        _ => {
            return Err(NodeDiffError::RootNotMapping {
                path: label.to_string(),
            }
            .into())
        }
    };

    let proxies = match root.get(PROXIES_KEY) {
        // No proxies at all is an empty set
        None | Some(Value::Null) => return Ok(NodeSet::default()),
        Some(Value::Array(proxies)) => proxies,
        Some(_) => {
            return Err(NodeDiffError::ProxiesNotSequence {
                path: label.to_string(),
            }
            .into())
        }
    };

    let records = proxies
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(fields) => Ok(NodeRecord::new(fields.clone())),
            _ => Err(ExError::from(NodeDiffError::ProxyNotMapping {
                path: label.to_string(),
                index,
            })),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(NodeSet::new(records))
}

/// Whether a YAML tag denotes the string type (`!str`, `!<str>`, `!!str`)
fn is_str_tag(tagged: &TaggedValue) -> bool {
    let tag = tagged.tag.to_string();
    let name = tag
        .trim_start_matches('!')
        .trim_start_matches('<')
        .trim_end_matches('>');
    name == "str" || name.ends_with(":str")
}

/// Render a scalar as text for a `str`-tagged value
fn scalar_text(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::String(String::new()),
        serde_yaml::Value::Bool(b) => Value::String(b.to_string()),
        serde_yaml::Value::Number(n) => Value::String(n.to_string()),
        serde_yaml::Value::String(s) => Value::String(s),
        other => yaml_to_json(other),
    }
}

fn yaml_number(n: serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        // NaN and infinities have no JSON form; keep their YAML spelling
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(n.to_string()))
    }
}

fn mapping_key(key: serde_yaml::Value) -> String {
    match yaml_to_json(key) {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Convert a YAML document value into a JSON value
///
/// `str`-tagged scalars become strings; any other tag is dropped and its
/// inner value kept. Non-string mapping keys are stringified.
pub fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(mapping_key(key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => {
            if is_str_tag(&tagged) {
                scalar_text(tagged.value)
            } else {
                yaml_to_json(tagged.value)
            }
        }
    }
}
