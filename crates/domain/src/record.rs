//! Record: one stored item, an open set of key/value fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::id::RecordId;

/// A stored item. No schema is enforced: extra or missing fields are kept
/// as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Identifier carried by `key`, if any.
    #[must_use]
    pub fn id(&self, key: &str) -> Option<RecordId> {
        self.0.get(key).and_then(RecordId::from_value)
    }

    /// Whether the identifier field `key` holds `id`.
    #[must_use]
    pub fn has_id(&self, key: &str, id: &RecordId) -> bool {
        self.0.get(key).is_some_and(|value| id.matches(value))
    }

    /// Return the identifier stored under `key`, generating and storing a
    /// fresh one when the field is absent or unusable.
    pub fn resolve_id(&mut self, key: &str) -> RecordId {
        if let Some(id) = self.id(key) {
            return id;
        }
        let id = RecordId::generate();
        self.set_id(key, &id);
        id
    }

    /// Store `id` under `key`, replacing whatever the field held.
    pub fn set_id(&mut self, key: &str, id: &RecordId) {
        self.0.insert(key.to_string(), id.clone().into());
    }

    /// Shallow merge: every field of `patch` overwrites the field of the
    /// same name, all other fields are kept.
    pub fn merge(&mut self, patch: Record) {
        for (field, value) in patch.0 {
            self.0.insert(field, value);
        }
    }

    /// Whitelist update: copy exactly `fields` from `patch`.
    ///
    /// A whitelisted field missing from `patch` is removed from `self`.
    /// Fields outside the whitelist are untouched on both sides.
    pub fn assign(&mut self, patch: &Record, fields: &[&str]) {
        for field in fields {
            match patch.0.get(*field) {
                Some(value) => {
                    self.0.insert((*field).to_string(), value.clone());
                }
                None => {
                    self.0.remove(*field);
                }
            }
        }
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Value> for Record {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ValidationError::NotAnObject),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.0)
    }
}
