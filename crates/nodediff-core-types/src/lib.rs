//! Core types shared across nodediff facilities
//!
//! This crate provides foundational types used by both the logging facility
//! and the report renderer:
//!
//! - **Schema constants**: canonical field keys and event names
//! - **Sensitive data**: `Sensitive<T>` marker for credential redaction

pub mod schema;
pub mod sensitive;

pub use sensitive::{is_secret_field, Sensitive, SECRET_FIELDS};
