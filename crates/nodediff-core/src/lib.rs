//! nodediff core - proxy node conversion auditing engine
//!
//! Compares a before and an after snapshot of a proxy configuration and
//! classifies every field-level difference as a legitimate transformation
//! (equivalent under mihomo semantics) or an actual issue.
//!
//! - [`normalize`]: raw node record → per-protocol canonical record
//! - [`classify`]: before → after value change → legitimate or not, with reason
//! - [`compare`]: identity-key matching and aggregation into a
//!   [`ComparisonResult`]
//! - [`report`]: human-readable summary of a result

pub mod classify;
pub mod compare;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod normalize;
pub mod report;

// Used by the exported logging macros
#[doc(hidden)]
pub use nodediff_core_types;

pub use classify::{classify, Classification};
pub use compare::{compare, ComparisonResult};
pub use errors::{ExError, ExErrorKind, NodeDiffError, Result};
pub use model::{CanonicalRecord, NodeRecord, NodeSet, ProtocolType};
pub use normalize::normalize;
