//! Router fixtures shared by the handler tests.

use std::future::Future;
use std::sync::Mutex;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use mockstore_app::ports::SnapshotStore;
use mockstore_app::services::catalog_service::CatalogService;
use mockstore_app::services::data_service::DataService;
use mockstore_domain::error::MockStoreError;

use crate::router::{self, Options};
use crate::state::AppState;

/// Snapshot store keeping the last saved snapshot in memory.
#[derive(Default)]
pub(crate) struct MemoryStore<S> {
    saved: Mutex<Option<S>>,
    fail: bool,
}

impl<S> SnapshotStore<S> for MemoryStore<S>
where
    S: Clone + Default + Send + Sync,
{
    fn load(&self) -> impl Future<Output = Result<S, MockStoreError>> + Send {
        let snapshot = self.saved.lock().unwrap().clone().unwrap_or_default();
        async { Ok(snapshot) }
    }

    fn save(&self, snapshot: &S) -> impl Future<Output = Result<(), MockStoreError>> + Send {
        let result = if self.fail {
            Err(MockStoreError::Storage("no space left on device".into()))
        } else {
            *self.saved.lock().unwrap() = Some(snapshot.clone());
            Ok(())
        };
        async { result }
    }
}

pub(crate) struct TestApp {
    router: Router,
}

impl TestApp {
    pub(crate) async fn new() -> Self {
        Self::build(false, &Options::default()).await
    }

    pub(crate) async fn with_options(options: Options) -> Self {
        Self::build(false, &options).await
    }

    /// Every write fails to persist.
    pub(crate) async fn failing() -> Self {
        Self::build(true, &Options::default()).await
    }

    async fn build(fail: bool, options: &Options) -> Self {
        let catalog_store = MemoryStore {
            fail,
            ..MemoryStore::default()
        };
        let data_store = MemoryStore {
            fail,
            ..MemoryStore::default()
        };
        let state = AppState::new(
            CatalogService::open(catalog_store).await.unwrap(),
            DataService::open(data_store).await.unwrap(),
        );
        Self {
            router: router::build(state, options),
        }
    }

    pub(crate) fn router(&self) -> Router {
        self.router.clone()
    }

    pub(crate) async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub(crate) async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
