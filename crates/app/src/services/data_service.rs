//! Data service: use-cases for the generic `id → record` store.

use mockstore_domain::dataset::{DataSet, ID_FIELD};
use mockstore_domain::error::MockStoreError;
use mockstore_domain::id::RecordId;
use mockstore_domain::record::Record;

use crate::mirror::Mirror;
use crate::ports::SnapshotStore;

/// Application service for generic records.
pub struct DataService<P> {
    mirror: Mirror<DataSet, P>,
}

impl<P> DataService<P>
where
    P: SnapshotStore<DataSet> + Send + Sync,
{
    /// Load the data set through `store` and keep it mirrored in memory.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the data set cannot be loaded.
    pub async fn open(store: P) -> Result<Self, MockStoreError> {
        let mirror = Mirror::open(store).await?;
        Ok(Self { mirror })
    }

    /// Look up a record by key.
    ///
    /// # Errors
    ///
    /// Returns [`MockStoreError::NotFound`] when nothing is stored under `id`.
    pub async fn get(&self, id: &RecordId) -> Result<Record, MockStoreError> {
        tracing::debug!(%id, "getting data");
        let record = self.mirror.read(|set| set.get(id).cloned()).await?;
        Ok(record)
    }

    /// Store a record under its `id` field, generating one when absent.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the data set cannot be persisted.
    pub async fn create(&self, record: Record) -> Result<Record, MockStoreError> {
        let created = self.mirror.write(|set| Ok(set.insert(record))).await?;
        tracing::info!(id = ?created.id(ID_FIELD), "data created");
        Ok(created)
    }

    /// Store a record under `id`, ignoring any `id` field of the payload.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the data set cannot be persisted.
    pub async fn create_at(
        &self,
        id: &RecordId,
        record: Record,
    ) -> Result<Record, MockStoreError> {
        let created = self
            .mirror
            .write(|set| Ok(set.insert_at(id, record)))
            .await?;
        tracing::info!(%id, "data created");
        Ok(created)
    }

    /// Replace an existing record in full.
    ///
    /// # Errors
    ///
    /// Returns [`MockStoreError::NotFound`] when nothing is stored under `id`,
    /// or a storage error when the data set cannot be persisted.
    pub async fn replace(&self, id: &RecordId, record: Record) -> Result<Record, MockStoreError> {
        let replaced = self
            .mirror
            .write(|set| Ok(set.replace(id, record)?))
            .await?;
        tracing::info!(%id, "data replaced");
        Ok(replaced)
    }

    /// Shallow-merge fields into an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`MockStoreError::NotFound`] when nothing is stored under `id`,
    /// or a storage error when the data set cannot be persisted.
    pub async fn patch(&self, id: &RecordId, patch: Record) -> Result<Record, MockStoreError> {
        let patched = self
            .mirror
            .write(|set| Ok(set.patch(id, patch)?))
            .await?;
        tracing::info!(%id, "data patched");
        Ok(patched)
    }

    /// Remove a record and return it.
    ///
    /// # Errors
    ///
    /// Returns [`MockStoreError::NotFound`] when nothing is stored under `id`,
    /// or a storage error when the data set cannot be persisted.
    pub async fn delete(&self, id: &RecordId) -> Result<Record, MockStoreError> {
        let removed = self.mirror.write(|set| Ok(set.remove(id)?)).await?;
        tracing::info!(%id, "data deleted");
        Ok(removed)
    }
}
