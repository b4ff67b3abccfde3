//! nodediff store - node-set loading and report persistence
//!
//! Provides:
//! - YAML node-set loader with `!str` tag normalization
//! - Atomic JSON persistence of comparison reports

pub mod errors;
pub mod loader;
pub mod report;

// Re-export key entry points
pub use errors::Result;
pub use loader::{load_node_set, parse_node_set_str};
pub use report::write_report;
