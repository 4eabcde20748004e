//! Catalog service: use-cases for the typed collections.

use mockstore_domain::catalog::Catalog;
use mockstore_domain::collection::CollectionKind;
use mockstore_domain::error::MockStoreError;
use mockstore_domain::id::RecordId;
use mockstore_domain::record::Record;

use crate::mirror::Mirror;
use crate::ports::SnapshotStore;

/// Application service for category, customer and product records.
pub struct CatalogService<P> {
    mirror: Mirror<Catalog, P>,
}

impl<P> CatalogService<P>
where
    P: SnapshotStore<Catalog> + Send + Sync,
{
    /// Load the catalog through `store` and keep it mirrored in memory.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the catalog cannot be loaded.
    pub async fn open(store: P) -> Result<Self, MockStoreError> {
        let mirror = Mirror::open(store).await?;
        Ok(Self { mirror })
    }

    /// List every record of a collection.
    ///
    /// # Errors
    ///
    /// Returns [`MockStoreError::NotFound`] when the collection is absent.
    pub async fn list(&self, kind: CollectionKind) -> Result<Vec<Record>, MockStoreError> {
        tracing::debug!(collection = %kind, "listing records");
        let records = self
            .mirror
            .read(|catalog| catalog.list(kind).map(<[Record]>::to_vec))
            .await?;
        Ok(records)
    }

    /// Find one record by primary key.
    ///
    /// # Errors
    ///
    /// Returns [`MockStoreError::NotFound`] when the collection or the record
    /// is absent.
    pub async fn find(
        &self,
        kind: CollectionKind,
        id: &RecordId,
    ) -> Result<Record, MockStoreError> {
        tracing::debug!(collection = %kind, %id, "finding record");
        let record = self
            .mirror
            .read(|catalog| catalog.find(kind, id).cloned())
            .await?;
        Ok(record)
    }

    /// Append a record, generating its primary key when absent.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the catalog cannot be persisted.
    pub async fn create(
        &self,
        kind: CollectionKind,
        record: Record,
    ) -> Result<Record, MockStoreError> {
        let created = self
            .mirror
            .write(|catalog| Ok(catalog.create(kind, record)))
            .await?;
        tracing::info!(collection = %kind, id = ?created.id(kind.primary_key()), "record created");
        Ok(created)
    }

    /// Whitelist update of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`MockStoreError::NotFound`] when the record is absent, or a
    /// storage error when the catalog cannot be persisted.
    pub async fn replace(
        &self,
        kind: CollectionKind,
        id: &RecordId,
        patch: &Record,
    ) -> Result<Record, MockStoreError> {
        let updated = self
            .mirror
            .write(|catalog| Ok(catalog.replace(kind, id, patch)?))
            .await?;
        tracing::info!(collection = %kind, %id, "record replaced");
        Ok(updated)
    }

    /// Shallow-merge arbitrary fields into an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`MockStoreError::NotFound`] when the record is absent, or a
    /// storage error when the catalog cannot be persisted.
    pub async fn patch(
        &self,
        kind: CollectionKind,
        id: &RecordId,
        patch: Record,
    ) -> Result<Record, MockStoreError> {
        let updated = self
            .mirror
            .write(|catalog| Ok(catalog.patch(kind, id, patch)?))
            .await?;
        tracing::info!(collection = %kind, %id, "record patched");
        Ok(updated)
    }

    /// Remove a record and return it.
    ///
    /// # Errors
    ///
    /// Returns [`MockStoreError::NotFound`] when the record is absent, or a
    /// storage error when the catalog cannot be persisted.
    pub async fn delete(
        &self,
        kind: CollectionKind,
        id: &RecordId,
    ) -> Result<Record, MockStoreError> {
        let removed = self
            .mirror
            .write(|catalog| Ok(catalog.remove(kind, id)?))
            .await?;
        tracing::info!(collection = %kind, %id, "record deleted");
        Ok(removed)
    }
}
