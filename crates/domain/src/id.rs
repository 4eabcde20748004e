//! Record identifiers.
//!
//! Identifiers are compared as text: the persisted file may carry them as
//! JSON strings or numbers, while request paths always carry strings.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a record inside a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl Default for RecordId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl RecordId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self::default()
    }

    /// Read an identifier out of a stored field.
    ///
    /// Strings are taken verbatim and numbers by their decimal rendering.
    /// Any other JSON value (including `null`) carries no identifier.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// Whether a stored field holds this identifier.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match value {
            Value::String(s) => *s == self.0,
            Value::Number(n) => n.to_string() == self.0,
            _ => false,
        }
    }

    /// Borrow the textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<RecordId> for Value {
    fn from(id: RecordId) -> Self {
        Value::String(id.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
