//! Credential redaction for rendered reports
//!
//! Proxy node records carry passwords, UUIDs and auth strings. The
//! `Sensitive<T>` wrapper keeps those values out of printed reports and logs
//! unless a caller explicitly exposes them.

use serde::{Serialize, Serializer};
use std::fmt;

/// Placeholder printed in place of a redacted value
pub const REDACTED: &str = "***REDACTED***";

/// Node fields whose values are credentials
pub const SECRET_FIELDS: &[&str] = &[
    "password",
    "uuid",
    "auth",
    "username",
    "protocol-param",
    "obfs-param",
];

/// Check whether a node field holds a credential
pub fn is_secret_field(field: &str) -> bool {
    SECRET_FIELDS.contains(&field)
}

/// Wrapper for credential values that redacts itself in Debug, Display and
/// serialized output
///
/// # Example
///
/// ```
/// use nodediff_core_types::Sensitive;
///
/// let password = Sensitive::new("hunter2");
/// assert_eq!(format!("{}", password), "***REDACTED***");
/// assert_eq!(password.expose(), &"hunter2");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying value
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> Serialize for Sensitive<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_redacts_debug_and_display() {
        let uuid = Sensitive::new("b831381d-6324-4d53-ad4f-8cda48b30811".to_string());
        assert_eq!(format!("{:?}", uuid), REDACTED);
        assert_eq!(format!("{}", uuid), REDACTED);
    }

    #[test]
    fn test_sensitive_redacts_serialized_form() {
        let password = Sensitive::new(42);
        let json = serde_json::to_string(&password).unwrap();
        assert_eq!(json, format!("\"{}\"", REDACTED));
    }

    #[test]
    fn test_sensitive_expose_and_into_inner() {
        let auth = Sensitive::new("token".to_string());
        assert_eq!(auth.expose(), "token");
        assert_eq!(auth.clone().into_inner(), "token");
    }

    #[test]
    fn test_secret_fields() {
        assert!(is_secret_field("password"));
        assert!(is_secret_field("uuid"));
        assert!(!is_secret_field("server"));
        assert!(!is_secret_field("ws-opts"));
    }
}
