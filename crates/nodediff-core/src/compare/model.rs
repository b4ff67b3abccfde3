//! Comparison output types.
//!
//! The serialized form of [`ComparisonResult`] is the persisted JSON report,
//! so field names here are the report schema. Collections use `BTreeMap` and
//! sorted `Vec`s for deterministic serialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Node counts and the identity-key partition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeStats {
    pub total_before: usize,
    pub total_after: usize,
    /// Keys only in the before set
    pub missing: Vec<String>,
    /// Keys only in the after set
    pub new: Vec<String>,
    /// Keys in both sets
    pub common: Vec<String>,
}

/// A node name occurring more than once within one set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DuplicateName {
    pub name: String,
    pub count: usize,
}

/// Duplicate names per side (warning-level, never an error)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DuplicateReport {
    pub before: Vec<DuplicateName>,
    pub after: Vec<DuplicateName>,
}

/// Before/after values of one differing field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDiff {
    pub before: Value,
    pub after: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// All differences found on one matched node
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeDiff {
    /// Identity key
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    /// Every differing field
    pub diffs: BTreeMap<String, FieldDiff>,
    /// Subset judged legitimate; each carries a reason
    pub legitimate: BTreeMap<String, FieldDiff>,
    /// Subset judged an actual issue
    pub issues: BTreeMap<String, FieldDiff>,
}

impl NodeDiff {
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }
}

/// A per-field diff entry grouped under its protocol type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffEntry {
    pub name: String,
    pub field: String,
    pub before: Value,
    pub after: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Every diff entry with its verdict, grouped by type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeIssueEntry {
    pub name: String,
    pub field: String,
    pub before: Value,
    pub after: Value,
    pub is_legitimate: bool,
    pub reason: String,
}

/// The engine's sole output
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ComparisonResult {
    pub stats: NodeStats,
    pub duplicates: DuplicateReport,
    /// Nodes with at least one differing field, by type
    pub differences: BTreeMap<String, Vec<NodeDiff>>,
    /// Field name → number of nodes where it differs
    pub field_diffs: BTreeMap<String, usize>,
    pub type_issues: BTreeMap<String, Vec<TypeIssueEntry>>,
    pub legitimate_diffs: BTreeMap<String, Vec<DiffEntry>>,
    pub actual_issues: BTreeMap<String, Vec<DiffEntry>>,
}

impl ComparisonResult {
    /// Total number of differing fields across all nodes
    pub fn total_diffs(&self) -> usize {
        self.field_diffs.values().sum()
    }

    pub fn total_legitimate(&self) -> usize {
        self.legitimate_diffs.values().map(Vec::len).sum()
    }

    pub fn total_actual(&self) -> usize {
        self.actual_issues.values().map(Vec::len).sum()
    }

    pub fn has_actual_issues(&self) -> bool {
        self.total_actual() > 0
    }

    /// Share of differences that are legitimate, in percent
    ///
    /// `None` when there are no differences at all.
    pub fn quality_score(&self) -> Option<f64> {
        let total = self.total_diffs();
        (total > 0).then(|| self.total_legitimate() as f64 / total as f64 * 100.0)
    }
}
