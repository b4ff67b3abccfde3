//! Error handling for nodediff-store
//!
//! Wraps nodediff-core ExError with store-specific helpers

use nodediff_core::errors::{ExError, ExErrorKind, NodeDiffError};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an error for a node-set file that could not be read
///
/// A missing file maps to `NotFound`, everything else to `Io`.
pub fn read_error(path: &Path, err: std::io::Error) -> ExError {
    let kind = if err.kind() == std::io::ErrorKind::NotFound {
        ExErrorKind::NotFound
    } else {
        ExErrorKind::Io
    };
    let domain = NodeDiffError::UnreadableInput {
        path: path.display().to_string(),
        reason: err.to_string(),
    };
    ExError::new(kind)
        .with_op("load_node_set")
        .with_path(path.display().to_string())
        .with_message(domain.to_string())
}

/// Create an error for text that is not valid YAML
pub fn yaml_error(label: &str, err: serde_yaml::Error) -> ExError {
    NodeDiffError::MalformedYaml {
        path: label.to_string(),
        reason: err.to_string(),
    }
    .into()
}

/// Create a report serialization error
pub fn serialization_error(err: serde_json::Error) -> ExError {
    NodeDiffError::ReportSerialization {
        reason: err.to_string(),
    }
    .into()
}

/// Create a report write error
pub fn write_error(path: &Path, err: std::io::Error) -> ExError {
    NodeDiffError::ReportWrite {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
    .into()
}
