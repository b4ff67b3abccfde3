//! Difference classifier.
//!
//! Decides whether a before → after value change on one canonical field is a
//! known-legitimate equivalence under mihomo semantics or an actual issue.
//!
//! Rules are an ordered strategy list ([`DEFAULT_RULES`]); the first rule
//! that returns a reason wins. No rule may panic on malformed values: a rule
//! whose structural preconditions are not met simply does not match.

pub mod rules;

use crate::model::ProtocolType;
use serde_json::Value;

pub use rules::{EarlyDataFromPath, EmptyWsHeaders, EnhancementAddition, VlessFlowSuffix};

/// One differing field handed to the rules
#[derive(Debug, Clone, Copy)]
pub struct FieldChange<'a> {
    pub field: &'a str,
    pub before: &'a Value,
    pub after: &'a Value,
    pub protocol: &'a ProtocolType,
}

/// A single legitimacy rule
pub trait LegitimacyRule: Sync {
    /// Stable rule name for logs
    fn name(&self) -> &'static str;

    /// Return a non-empty justification when the change is legitimate
    fn judge(&self, change: &FieldChange<'_>) -> Option<String>;
}

/// Rules in priority order
pub static DEFAULT_RULES: &[&dyn LegitimacyRule] = &[
    &EmptyWsHeaders,
    &VlessFlowSuffix,
    &EnhancementAddition,
    &EarlyDataFromPath,
];

/// Classifier verdict
///
/// Either `legitimate == true` with a non-empty reason, or
/// `legitimate == false` with an empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub legitimate: bool,
    pub reason: String,
}

impl Classification {
    pub fn legitimate(reason: impl Into<String>) -> Self {
        Self {
            legitimate: true,
            reason: reason.into(),
        }
    }

    pub fn issue() -> Self {
        Self {
            legitimate: false,
            reason: String::new(),
        }
    }
}

/// Run a change through an explicit rule list
pub fn classify_with(rules: &[&dyn LegitimacyRule], change: &FieldChange<'_>) -> Classification {
    for rule in rules {
        if let Some(reason) = rule.judge(change).filter(|r| !r.is_empty()) {
            tracing::trace!(rule = rule.name(), field = change.field, "rule matched");
            return Classification::legitimate(reason);
        }
    }
    Classification::issue()
}

/// Classify one differing field with the default rules.
///
/// Callers only invoke this when `before != after`.
pub fn classify(
    field: &str,
    before: &Value,
    after: &Value,
    protocol: &ProtocolType,
) -> Classification {
    classify_with(
        DEFAULT_RULES,
        &FieldChange {
            field,
            before,
            after,
            protocol,
        },
    )
}
