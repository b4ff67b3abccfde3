//! Canonical schema constants for structured logging
//!
//! Field keys read back by log consumers (the test capture layer among
//! them) and the values the macros and the engine write under them.

// Canonical field keys for structured logging
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_SIDE: &str = "side";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Node set sides
pub const SIDE_BEFORE: &str = "before";
pub const SIDE_AFTER: &str = "after";
