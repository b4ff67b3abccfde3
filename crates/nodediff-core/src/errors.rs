use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that scripts wrapping the CLI can
/// match on. The comparison engine itself never fails; these kinds cover the
/// loading and persistence surfaces around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    /// A node-set document parsed but its top-level shape is wrong
    InvalidDocument,
    NotFound,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidDocument => "ERR_INVALID_DOCUMENT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a stable kind plus optional context about the operation and the
/// file involved.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain failures raised around the comparison engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeDiffError {
    /// A node-set file could not be read
    #[error("Cannot read node set {path}: {reason}")]
    UnreadableInput { path: String, reason: String },

    /// The document is not valid YAML
    #[error("Node set {path} is not valid YAML: {reason}")]
    MalformedYaml { path: String, reason: String },

    /// The document root is not a mapping
    #[error("Node set {path} must be a mapping at the top level")]
    RootNotMapping { path: String },

    /// `proxies` is present but is not a sequence
    #[error("Node set {path}: `proxies` must be a sequence")]
    ProxiesNotSequence { path: String },

    /// A `proxies` entry is not a mapping
    #[error("Node set {path}: proxy entry #{index} is not a mapping")]
    ProxyNotMapping { path: String, index: usize },

    /// The comparison result could not be serialized
    #[error("Cannot serialize comparison report: {reason}")]
    ReportSerialization { reason: String },

    /// The comparison report could not be written
    #[error("Cannot write comparison report {path}: {reason}")]
    ReportWrite { path: String, reason: String },
}

impl From<NodeDiffError> for ExError {
    fn from(err: NodeDiffError) -> Self {
        let message = err.to_string();
        let (kind, op, path) = match err {
            NodeDiffError::UnreadableInput { path, .. } => {
                (ExErrorKind::Io, "load_node_set", Some(path))
            }
            NodeDiffError::MalformedYaml { path, .. } => {
                (ExErrorKind::InvalidInput, "load_node_set", Some(path))
            }
            NodeDiffError::RootNotMapping { path }
            | NodeDiffError::ProxiesNotSequence { path }
            | NodeDiffError::ProxyNotMapping { path, .. } => {
                (ExErrorKind::InvalidDocument, "load_node_set", Some(path))
            }
            NodeDiffError::ReportSerialization { .. } => {
                (ExErrorKind::Serialization, "write_report", None)
            }
            NodeDiffError::ReportWrite { path, .. } => (ExErrorKind::Io, "write_report", Some(path)),
        };
        let mut ex = ExError::new(kind).with_op(op).with_message(message);
        if let Some(path) = path {
            ex = ex.with_path(path);
        }
        ex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_stable() {
        assert_eq!(ExErrorKind::InvalidInput.code(), "ERR_INVALID_INPUT");
        assert_eq!(ExErrorKind::InvalidDocument.code(), "ERR_INVALID_DOCUMENT");
        assert_eq!(ExErrorKind::Io.code(), "ERR_IO");
    }

    #[test]
    fn test_display_includes_op_message_and_path() {
        let err = ExError::new(ExErrorKind::Io)
            .with_op("load_node_set")
            .with_path("before.yaml")
            .with_message("boom");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_IO]"));
        assert!(text.contains("load_node_set"));
        assert!(text.contains("boom"));
        assert!(text.contains("before.yaml"));
    }

    #[test]
    fn test_node_diff_error_maps_to_kind() {
        let ex: ExError = NodeDiffError::ProxiesNotSequence {
            path: "after.yaml".to_string(),
        }
        .into();
        assert_eq!(ex.kind(), ExErrorKind::InvalidDocument);
        assert_eq!(ex.op(), Some("load_node_set"));
        assert_eq!(ex.path(), Some("after.yaml"));
        assert!(ex.message().contains("proxies"));
    }

    #[test]
    fn test_report_serialization_has_no_path() {
        let ex: ExError = NodeDiffError::ReportSerialization {
            reason: "bad".to_string(),
        }
        .into();
        assert_eq!(ex.kind(), ExErrorKind::Serialization);
        assert!(ex.path().is_none());
    }
}
