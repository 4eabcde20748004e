//! JSON file implementation of [`SnapshotStore`].

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use mockstore_app::ports::SnapshotStore;
use mockstore_domain::error::MockStoreError;

use crate::error::StorageError;

/// Configuration for the JSON file storage adapter.
pub struct Config {
    /// Location of the datastore file (e.g. `db.json`).
    pub path: PathBuf,
}

impl Config {
    /// Build a [`JsonFileStore`] from this configuration.
    #[must_use]
    pub fn build(self) -> JsonFileStore {
        JsonFileStore::new(self.path)
    }
}

/// Datastore persisted as a single pretty-printed JSON file.
///
/// A missing or blank file loads as an empty datastore. Every save rewrites
/// the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl<S> SnapshotStore<S> for JsonFileStore
where
    S: Serialize + DeserializeOwned + Default + Send + Sync,
{
    async fn load(&self) -> Result<S, MockStoreError> {
        let snapshot = read_snapshot(&self.path).await?;
        Ok(snapshot)
    }

    async fn save(&self, snapshot: &S) -> Result<(), MockStoreError> {
        let bytes = encode(&self.path, snapshot)?;
        write_atomically(&self.path, &bytes).await?;
        tracing::debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            "datastore file rewritten"
        );
        Ok(())
    }
}

async fn read_snapshot<S>(path: &Path) -> Result<S, StorageError>
where
    S: DeserializeOwned + Default,
{
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "datastore file missing, starting empty");
            return Ok(S::default());
        }
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(S::default());
    }
    serde_json::from_slice(&bytes).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn encode<S: Serialize>(path: &Path, snapshot: &S) -> Result<Vec<u8>, StorageError> {
    let mut bytes = serde_json::to_vec_pretty(snapshot).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write `bytes` to `<path>.tmp`, then rename it over `path`, so a crash
/// mid-write never leaves a truncated datastore behind.
async fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let io_error = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    tokio::fs::write(&tmp, bytes).await.map_err(io_error)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_error)?;
    Ok(())
}
