//! Data set: the generic datastore: a flat `id → record` map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{NotFoundError, ValidationError};
use crate::id::RecordId;
use crate::record::Record;

/// Field carrying the identifier inside a generic record.
pub const ID_FIELD: &str = "id";

/// Kind label used in not-found messages.
const KIND: &str = "Data";

/// The whole generic datastore, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct DataSet {
    entries: Vec<(RecordId, Record)>,
}

impl DataSet {
    /// Create an empty data set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the data set holds no record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a record by key.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Record`] when no record is stored under `id`.
    pub fn get(&self, id: &RecordId) -> Result<&Record, NotFoundError> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, record)| record)
            .ok_or_else(|| not_found(id))
    }

    /// Store `record` under its `id` field, generating one when absent.
    ///
    /// An existing record with the same key is overwritten in place.
    pub fn insert(&mut self, mut record: Record) -> Record {
        let id = record.resolve_id(ID_FIELD);
        match self.entries.iter_mut().find(|(key, _)| *key == id) {
            Some((_, slot)) => *slot = record.clone(),
            None => self.entries.push((id, record.clone())),
        }
        record
    }

    /// Store `record` under `id`, which also becomes its `id` field.
    ///
    /// An existing record with the same key is overwritten in place.
    pub fn insert_at(&mut self, id: &RecordId, mut record: Record) -> Record {
        record.set_id(ID_FIELD, id);
        self.insert(record)
    }

    /// Swap the record stored under `id` for `record`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Record`] when no record is stored under `id`.
    pub fn replace(&mut self, id: &RecordId, record: Record) -> Result<Record, NotFoundError> {
        let slot = self.get_mut(id)?;
        *slot = record;
        Ok(slot.clone())
    }

    /// Shallow-merge `patch` into the record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Record`] when no record is stored under `id`.
    pub fn patch(&mut self, id: &RecordId, patch: Record) -> Result<Record, NotFoundError> {
        let slot = self.get_mut(id)?;
        slot.merge(patch);
        Ok(slot.clone())
    }

    /// Remove the record stored under `id` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Record`] when no record is stored under `id`.
    pub fn remove(&mut self, id: &RecordId) -> Result<Record, NotFoundError> {
        let index = self
            .entries
            .iter()
            .position(|(key, _)| key == id)
            .ok_or_else(|| not_found(id))?;
        Ok(self.entries.remove(index).1)
    }

    fn get_mut(&mut self, id: &RecordId) -> Result<&mut Record, NotFoundError> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key == id)
            .map(|(_, record)| record)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: &RecordId) -> NotFoundError {
    NotFoundError::Record {
        kind: KIND,
        id: id.to_string(),
    }
}

impl TryFrom<Map<String, Value>> for DataSet {
    type Error = ValidationError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let entries = map
            .into_iter()
            .map(|(key, value)| Record::try_from(value).map(|record| (RecordId::from(key), record)))
            .collect::<Result<_, _>>()?;
        Ok(Self { entries })
    }
}

impl From<DataSet> for Map<String, Value> {
    fn from(set: DataSet) -> Self {
        set.entries
            .into_iter()
            .map(|(key, record)| (key.as_str().to_string(), Value::from(record)))
            .collect()
    }
}
