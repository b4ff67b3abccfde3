//! Comparison engine.
//!
//! The core entry point is [`compare`], which matches two node sets by
//! identity key, normalizes and diffs every matched pair, and folds the
//! per-node results into a [`ComparisonResult`].

use crate::classify::classify;
use crate::compare::model::{
    ComparisonResult, DiffEntry, DuplicateName, DuplicateReport, FieldDiff, NodeDiff, NodeStats,
    TypeIssueEntry,
};
use crate::log_op_end;
use crate::log_op_start;
use crate::model::{NodeRecord, NodeSet};
use crate::normalize::normalize;
use nodediff_core_types::schema::{SIDE_AFTER, SIDE_BEFORE};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Separator inside synthetic identity keys
const KEY_SEPARATOR: &str = "###";

/// Operation name shared by every `compare` log event
const OP: &str = "compare_nodes";

/// Duplicate names listed per side in the warning summary
const DUPLICATE_WARN_LIMIT: usize = 5;

/// Identity-keyed view of one node set
#[derive(Debug, Clone)]
pub struct NodeIndex<'a> {
    pub entries: BTreeMap<String, &'a NodeRecord>,
    pub duplicates: Vec<DuplicateName>,
}

fn synthetic_key(name: &str, type_label: &str, occurrence: usize) -> String {
    format!(
        "{name}{sep}{type_label}{sep}{occurrence}",
        sep = KEY_SEPARATOR
    )
}

/// Build the identity-key index for one set.
///
/// The first node with a given name is keyed by the bare name; later ones
/// get `name###type###n`. If that key is somehow taken already (a node
/// literally named like a synthetic key), `n` keeps increasing until the key
/// is free, so keys are always unique within the set.
pub fn index_nodes(set: &NodeSet) -> NodeIndex<'_> {
    let mut entries: BTreeMap<String, &NodeRecord> = BTreeMap::new();
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();

    for node in set.iter() {
        let name = node.name();
        let counter = seen.entry(name.clone()).or_insert(0);
        let mut occurrence = *counter;
        *counter += 1;

        let mut key = if occurrence == 0 {
            name.clone()
        } else {
            synthetic_key(&name, &node.type_label(), occurrence)
        };
        while entries.contains_key(&key) {
            occurrence += 1;
            key = synthetic_key(&name, &node.type_label(), occurrence);
        }
        entries.insert(key, node);
    }

    let duplicates = seen
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, count)| DuplicateName { name, count })
        .collect();

    NodeIndex {
        entries,
        duplicates,
    }
}

fn warn_duplicates(side: &str, duplicates: &[DuplicateName]) {
    if duplicates.is_empty() {
        return;
    }
    tracing::warn!(
        op = OP,
        side,
        count = duplicates.len(),
        "duplicate node names found"
    );
    for dup in duplicates.iter().take(DUPLICATE_WARN_LIMIT) {
        tracing::warn!(
            op = OP,
            side,
            name = %dup.name,
            occurrences = dup.count,
            "duplicate node name"
        );
    }
}

/// Structural equality where numbers compare by value, so `443` and `443.0`
/// are the same port.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => x.as_f64() == y.as_f64(),
            },
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|other| values_equal(v, other)))
        }
        _ => a == b,
    }
}

/// Diff one matched pair of raw records under the given identity key.
pub fn diff_pair(key: &str, before: &NodeRecord, after: &NodeRecord) -> NodeDiff {
    let before = normalize(before);
    let after = normalize(after);
    let protocol = before.protocol_type();
    let before_fields = before.to_field_map();
    let after_fields = after.to_field_map();

    let mut node_diff = NodeDiff {
        name: key.to_string(),
        node_type: before.type_label(),
        ..NodeDiff::default()
    };

    let all_fields: BTreeSet<&String> = before_fields.keys().chain(after_fields.keys()).collect();
    for field in all_fields {
        let before_val = before_fields.get(field).unwrap_or(&Value::Null);
        let after_val = after_fields.get(field).unwrap_or(&Value::Null);
        if values_equal(before_val, after_val) {
            continue;
        }

        let verdict = classify(field, before_val, after_val, &protocol);
        tracing::debug!(
            op = OP,
            node_key = key,
            node_type = %protocol,
            field = field.as_str(),
            legitimate = verdict.legitimate,
            "field differs"
        );

        let diff = FieldDiff {
            before: before_val.clone(),
            after: after_val.clone(),
            reason: verdict.legitimate.then_some(verdict.reason),
        };
        if diff.reason.is_some() {
            node_diff.legitimate.insert(field.clone(), diff.clone());
        } else {
            node_diff.issues.insert(field.clone(), diff.clone());
        }
        node_diff.diffs.insert(field.clone(), diff);
    }

    node_diff
}

/// Aggregation state threaded through the per-node fold
#[derive(Debug, Default)]
struct Accumulator {
    common: Vec<String>,
    differences: BTreeMap<String, Vec<NodeDiff>>,
    field_diffs: BTreeMap<String, usize>,
    type_issues: BTreeMap<String, Vec<TypeIssueEntry>>,
    legitimate_diffs: BTreeMap<String, Vec<DiffEntry>>,
    actual_issues: BTreeMap<String, Vec<DiffEntry>>,
}

impl Accumulator {
    fn absorb(mut self, node_diff: NodeDiff) -> Self {
        self.common.push(node_diff.name.clone());
        if node_diff.is_empty() {
            return self;
        }
        let node_type = node_diff.node_type.clone();

        for (field, diff) in &node_diff.diffs {
            *self.field_diffs.entry(field.clone()).or_insert(0) += 1;

            let entry = DiffEntry {
                name: node_diff.name.clone(),
                field: field.clone(),
                before: diff.before.clone(),
                after: diff.after.clone(),
                reason: diff.reason.clone(),
            };
            let target = if diff.reason.is_some() {
                &mut self.legitimate_diffs
            } else {
                &mut self.actual_issues
            };
            target.entry(node_type.clone()).or_default().push(entry);

            self.type_issues
                .entry(node_type.clone())
                .or_default()
                .push(TypeIssueEntry {
                    name: node_diff.name.clone(),
                    field: field.clone(),
                    before: diff.before.clone(),
                    after: diff.after.clone(),
                    is_legitimate: diff.reason.is_some(),
                    reason: diff.reason.clone().unwrap_or_default(),
                });
        }

        self.differences.entry(node_type).or_default().push(node_diff);
        self
    }
}

/// Compare a before and an after node set.
///
/// Infallible and free of side effects apart from logging: duplicate names
/// are reported as warnings and disambiguated with synthetic keys. Identical
/// inputs always produce identical results.
pub fn compare(before: &NodeSet, after: &NodeSet) -> ComparisonResult {
    log_op_start!(
        OP,
        total_before = before.len(),
        total_after = after.len()
    );
    let start = std::time::Instant::now();

    let before_index = index_nodes(before);
    let after_index = index_nodes(after);
    warn_duplicates(SIDE_BEFORE, &before_index.duplicates);
    warn_duplicates(SIDE_AFTER, &after_index.duplicates);

    let missing: Vec<String> = before_index
        .entries
        .keys()
        .filter(|k| !after_index.entries.contains_key(*k))
        .cloned()
        .collect();
    let new: Vec<String> = after_index
        .entries
        .keys()
        .filter(|k| !before_index.entries.contains_key(*k))
        .cloned()
        .collect();

    let acc = before_index
        .entries
        .iter()
        .filter_map(|(key, b)| after_index.entries.get(key).map(|a| (key, *b, *a)))
        .fold(Accumulator::default(), |acc, (key, b, a)| {
            acc.absorb(diff_pair(key, b, a))
        });

    let result = ComparisonResult {
        stats: NodeStats {
            total_before: before.len(),
            total_after: after.len(),
            missing,
            new,
            common: acc.common,
        },
        duplicates: DuplicateReport {
            before: before_index.duplicates,
            after: after_index.duplicates,
        },
        differences: acc.differences,
        field_diffs: acc.field_diffs,
        type_issues: acc.type_issues,
        legitimate_diffs: acc.legitimate_diffs,
        actual_issues: acc.actual_issues,
    };

    log_op_end!(
        OP,
        duration_ms = start.elapsed().as_millis() as u64,
        common = result.stats.common.len(),
        legitimate = result.total_legitimate(),
        actual = result.total_actual()
    );

    result
}
