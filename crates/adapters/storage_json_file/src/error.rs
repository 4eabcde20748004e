//! Storage-specific error type wrapping file and JSON errors.

use std::path::PathBuf;

use mockstore_domain::error::MockStoreError;

/// Errors originating from the JSON file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading, writing or renaming the file failed.
    #[error("i/o error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a valid datastore, or the datastore could not
    /// be serialized.
    #[error("JSON error on {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StorageError> for MockStoreError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
