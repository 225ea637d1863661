//! Redacting wrapper for sensitive string values.
//!
//! API tokens pass through node parameters, debug logs, and serialized
//! execution records. [`SecretString`] keeps the raw value out of all of
//! them: only [`expose()`](SecretString::expose) hands it back, at the one
//! place that builds the Authorization header.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A string value that must not leak through logs or serialized output.
///
/// - `Debug` and `Display` print `[REDACTED]` (empty stays empty)
/// - `Serialize` always emits an empty string
/// - `Deserialize` accepts a plain string, so credentials stored by the
///   host round-trip without a custom format
#[derive(Clone, Default)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a sensitive value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the underlying value. Only call where the secret is actually
    /// consumed (building the bearer header).
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the wrapped value is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "\"\"")
        } else {
            write!(f, "\"[REDACTED]\"")
        }
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            write!(f, "[REDACTED]")
        }
    }
}

impl Serialize for SecretString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Never emit the actual value.
        serializer.serialize_str("")
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecretString)
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        SecretString(s.to_owned())
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_redacted() {
        let s = SecretString::new("tok-123");
        assert_eq!(format!("{s:?}"), "\"[REDACTED]\"");
    }

    #[test]
    fn empty_debug_is_empty_quotes() {
        assert_eq!(format!("{:?}", SecretString::default()), "\"\"");
    }

    #[test]
    fn display_is_redacted() {
        let s = SecretString::new("tok-123");
        assert_eq!(s.to_string(), "[REDACTED]");
    }

    #[test]
    fn expose_returns_value() {
        let s = SecretString::new("tok-123");
        assert_eq!(s.expose(), "tok-123");
    }

    #[test]
    fn serialize_never_emits_value() {
        let s = SecretString::new("tok-123");
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"\"");
    }

    #[test]
    fn deserialize_plain_string() {
        let s: SecretString = serde_json::from_str("\"tok-123\"").unwrap();
        assert_eq!(s.expose(), "tok-123");
    }
}
