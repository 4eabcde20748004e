//! Snapshot port: whole-datastore persistence.

use std::future::Future;

use mockstore_domain::error::MockStoreError;

/// Loads and saves an entire datastore of type `S` at once.
///
/// There is no incremental write: every `save` replaces what was persisted
/// before.
pub trait SnapshotStore<S> {
    /// Read the persisted datastore, or an empty one when nothing is stored yet.
    fn load(&self) -> impl Future<Output = Result<S, MockStoreError>> + Send;

    /// Overwrite the persisted datastore with `snapshot`.
    fn save(&self, snapshot: &S) -> impl Future<Output = Result<(), MockStoreError>> + Send;
}
