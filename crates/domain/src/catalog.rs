//! Catalog: the typed datastore: named lists of records.
//!
//! Persisted as a JSON object whose keys are collection names
//! (`categories`, `customers`, `products`, …) and whose values are lists of
//! records. Lookups are linear scans in insertion order and the first
//! matching record wins.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::CollectionKind;
use crate::error::NotFoundError;
use crate::id::RecordId;
use crate::record::Record;

/// The whole typed datastore.
///
/// Collections outside [`CollectionKind`] are kept so they survive a
/// rewrite of the file. Collections keep the order they had in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Catalog {
    collections: Vec<(String, Vec<Record>)>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records of a collection, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Collection`] when the catalog has no such
    /// collection.
    pub fn list(&self, kind: CollectionKind) -> Result<&[Record], NotFoundError> {
        self.collections
            .iter()
            .find(|(name, _)| name == kind.name())
            .map(|(_, records)| records.as_slice())
            .ok_or(NotFoundError::Collection { name: kind.name() })
    }

    /// First record whose primary key matches `id`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the collection or the record is absent.
    pub fn find(&self, kind: CollectionKind, id: &RecordId) -> Result<&Record, NotFoundError> {
        self.list(kind)?
            .iter()
            .find(|record| record.has_id(kind.primary_key(), id))
            .ok_or_else(|| record_not_found(kind, id))
    }

    /// Append `record` to its collection, creating the collection if needed.
    ///
    /// The primary key is generated when the payload carries none. Returns
    /// the record as stored.
    pub fn create(&mut self, kind: CollectionKind, mut record: Record) -> Record {
        record.resolve_id(kind.primary_key());
        match self.records_mut(kind) {
            Ok(records) => records.push(record.clone()),
            Err(_) => self
                .collections
                .push((kind.name().to_string(), vec![record.clone()])),
        }
        record
    }

    /// Whitelist update of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the collection or the record is absent.
    pub fn replace(
        &mut self,
        kind: CollectionKind,
        id: &RecordId,
        patch: &Record,
    ) -> Result<Record, NotFoundError> {
        let record = self.find_mut(kind, id)?;
        record.assign(patch, kind.replace_fields());
        Ok(record.clone())
    }

    /// Shallow-merge `patch` into an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the collection or the record is absent.
    pub fn patch(
        &mut self,
        kind: CollectionKind,
        id: &RecordId,
        patch: Record,
    ) -> Result<Record, NotFoundError> {
        let record = self.find_mut(kind, id)?;
        record.merge(patch);
        Ok(record.clone())
    }

    /// Remove the first record matching `id` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the collection or the record is absent.
    pub fn remove(&mut self, kind: CollectionKind, id: &RecordId) -> Result<Record, NotFoundError> {
        let records = self.records_mut(kind)?;
        let index = records
            .iter()
            .position(|record| record.has_id(kind.primary_key(), id))
            .ok_or_else(|| record_not_found(kind, id))?;
        Ok(records.remove(index))
    }

    fn find_mut(
        &mut self,
        kind: CollectionKind,
        id: &RecordId,
    ) -> Result<&mut Record, NotFoundError> {
        self.records_mut(kind)?
            .iter_mut()
            .find(|record| record.has_id(kind.primary_key(), id))
            .ok_or_else(|| record_not_found(kind, id))
    }

    fn records_mut(&mut self, kind: CollectionKind) -> Result<&mut Vec<Record>, NotFoundError> {
        self.collections
            .iter_mut()
            .find(|(name, _)| name == kind.name())
            .map(|(_, records)| records)
            .ok_or(NotFoundError::Collection { name: kind.name() })
    }
}

impl TryFrom<Map<String, Value>> for Catalog {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let collections = map
            .into_iter()
            .map(|(name, value)| serde_json::from_value(value).map(|records| (name, records)))
            .collect::<Result<_, _>>()?;
        Ok(Self { collections })
    }
}

impl From<Catalog> for Map<String, Value> {
    fn from(catalog: Catalog) -> Self {
        catalog
            .collections
            .into_iter()
            .map(|(name, records)| {
                let records = records.into_iter().map(Value::from).collect();
                (name, Value::Array(records))
            })
            .collect()
    }
}

fn record_not_found(kind: CollectionKind, id: &RecordId) -> NotFoundError {
    NotFoundError::Record {
        kind: kind.label(),
        id: id.to_string(),
    }
}
