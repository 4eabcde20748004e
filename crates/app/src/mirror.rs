//! In-memory mirror of a persisted datastore.
//!
//! The mirror is the only owner of the datastore for the lifetime of the
//! process. Reads see the last committed state. Writes run on a working
//! copy, persist it through the [`SnapshotStore`] port while the lock is
//! held, and only then commit it, so the mirror and the persisted copy never
//! diverge and two writes never overlap on disk.

use std::future::Future;

use tokio::sync::Mutex;

use mockstore_domain::error::MockStoreError;

use crate::ports::SnapshotStore;

/// Single-writer owner of a datastore `S` persisted through `P`.
pub struct Mirror<S, P> {
    state: Mutex<S>,
    store: P,
}

impl<S, P> Mirror<S, P>
where
    S: Clone + Send + Sync,
    P: SnapshotStore<S> + Send + Sync,
{
    /// Load the datastore once from `store`.
    ///
    /// # Errors
    ///
    /// Returns the storage error raised by the port when loading fails.
    pub async fn open(store: P) -> Result<Self, MockStoreError> {
        let state = store.load().await?;
        Ok(Self {
            state: Mutex::new(state),
            store,
        })
    }

    /// Run `f` against the committed state.
    pub fn read<T, F>(&self, f: F) -> impl Future<Output = T> + Send
    where
        F: FnOnce(&S) -> T + Send,
        T: Send,
    {
        async move {
            let guard = self.state.lock().await;
            f(&guard)
        }
    }

    /// Apply `f` to a working copy, persist it, then commit it.
    ///
    /// Nothing is persisted or committed when `f` fails.
    ///
    /// # Errors
    ///
    /// Returns the error of `f`, or the storage error raised while saving.
    /// In both cases the committed state is left untouched.
    pub fn write<T, F>(&self, f: F) -> impl Future<Output = Result<T, MockStoreError>> + Send
    where
        F: FnOnce(&mut S) -> Result<T, MockStoreError> + Send,
        T: Send,
    {
        async move {
            let mut guard = self.state.lock().await;
            let mut working = guard.clone();
            let output = f(&mut working)?;
            self.store.save(&working).await?;
            *guard = working;
            tracing::debug!("datastore persisted");
            Ok(output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex as StdMutex;

    use mockstore_domain::error::ValidationError;

    struct InMemoryStore {
        initial: Vec<u32>,
        saved: Arc<StdMutex<Vec<Vec<u32>>>>,
        fail: bool,
    }

    impl InMemoryStore {
        fn new(initial: Vec<u32>) -> Self {
            Self {
                initial,
                saved: Arc::default(),
                fail: false,
            }
        }

        fn failing(initial: Vec<u32>) -> Self {
            Self {
                fail: true,
                ..Self::new(initial)
            }
        }
    }

    impl SnapshotStore<Vec<u32>> for InMemoryStore {
        fn load(&self) -> impl Future<Output = Result<Vec<u32>, MockStoreError>> + Send {
            let initial = self.initial.clone();
            async move { Ok(initial) }
        }

        fn save(
            &self,
            snapshot: &Vec<u32>,
        ) -> impl Future<Output = Result<(), MockStoreError>> + Send {
            let result = if self.fail {
                Err(MockStoreError::Storage("disk full".into()))
            } else {
                self.saved.lock().unwrap().push(snapshot.clone());
                Ok(())
            };
            async move { result }
        }
    }

    #[tokio::test]
    async fn should_read_loaded_state() {
        let mirror = Mirror::open(InMemoryStore::new(vec![1, 2])).await.unwrap();
        let len = mirror.read(Vec::len).await;
        assert_eq!(len, 2);
    }

    #[tokio::test]
    async fn should_persist_then_commit_on_write() {
        let store = InMemoryStore::new(vec![1]);
        let saved = Arc::clone(&store.saved);
        let mirror = Mirror::open(store).await.unwrap();

        let len = mirror
            .write(|state| {
                state.push(2);
                Ok(state.len())
            })
            .await
            .unwrap();

        assert_eq!(len, 2);
        assert_eq!(mirror.read(Clone::clone).await, vec![1, 2]);
        assert_eq!(*saved.lock().unwrap(), vec![vec![1, 2]]);
    }

    #[tokio::test]
    async fn should_leave_state_untouched_when_save_fails() {
        let mirror = Mirror::open(InMemoryStore::failing(vec![1])).await.unwrap();

        let result = mirror
            .write(|state| {
                state.push(2);
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(MockStoreError::Storage(_))));
        assert_eq!(mirror.read(Clone::clone).await, vec![1]);
    }

    #[tokio::test]
    async fn should_skip_save_when_mutation_fails() {
        let store = InMemoryStore::new(vec![1]);
        let saved = Arc::clone(&store.saved);
        let mirror = Mirror::open(store).await.unwrap();

        let result: Result<(), _> = mirror
            .write(|state| {
                state.clear();
                Err(ValidationError::NotAnObject.into())
            })
            .await;

        assert!(result.is_err());
        assert!(saved.lock().unwrap().is_empty());
        assert_eq!(mirror.read(Clone::clone).await, vec![1]);
    }

    #[tokio::test]
    async fn should_serialize_concurrent_writes() {
        let store = InMemoryStore::new(Vec::new());
        let saved = Arc::clone(&store.saved);
        let mirror = Arc::new(Mirror::open(store).await.unwrap());

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let mirror = Arc::clone(&mirror);
                tokio::spawn(async move {
                    mirror
                        .write(|state| {
                            state.push(n);
                            Ok(())
                        })
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let state = mirror.read(Clone::clone).await;
        assert_eq!(state.len(), 8);
        let saved = saved.lock().unwrap();
        assert_eq!(saved.len(), 8);
        assert_eq!(saved.last(), Some(&state));
    }
}
