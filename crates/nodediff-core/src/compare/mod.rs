//! Node-set comparator.
//!
//! ## Entry point
//!
//! ```
//! use nodediff_core::compare::compare;
//! use nodediff_core::model::NodeSet;
//!
//! let before: NodeSet = serde_json::from_str(r#"{"proxies": []}"#).unwrap();
//! let after = before.clone();
//! let result = compare(&before, &after);
//! assert_eq!(result.total_diffs(), 0);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical results, including
//!   ordering of every list in the output.
//! - **Key partition**: `missing`, `new` and `common` partition the union of
//!   identity keys with no overlap.
//! - **No silent equivalences**: absence versus an explicit default is a
//!   difference unless a classifier rule says otherwise.

pub mod engine;
pub mod model;

pub use engine::{compare, diff_pair, index_nodes, NodeIndex};
pub use model::{
    ComparisonResult, DiffEntry, DuplicateName, DuplicateReport, FieldDiff, NodeDiff, NodeStats,
    TypeIssueEntry,
};
