//! Axum router assembly.

use axum::Router;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use mockstore_app::ports::SnapshotStore;
use mockstore_domain::catalog::Catalog;
use mockstore_domain::dataset::DataSet;

use crate::error::error_response;
use crate::state::AppState;

/// Router-level switches.
#[derive(Debug, Clone)]
pub struct Options {
    /// Emit wildcard CORS headers and answer preflight requests.
    pub cors: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { cors: true }
    }
}

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and answers anything else with
/// `501 Not Implemented`. Includes a [`TraceLayer`] that logs each HTTP
/// request/response, headers included, at the `DEBUG` level.
pub fn build<CS, DS>(state: AppState<CS, DS>, options: &Options) -> Router
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .fallback(not_implemented)
        .method_not_allowed_fallback(not_implemented);

    let router = if options.cors {
        router.layer(cors_layer())
    } else {
        router
    };

    router
        .layer(
            TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().include_headers(true)),
        )
        .with_state(state)
}

/// Wildcard origin, methods and headers. Preflight requests are answered
/// by the layer itself with an empty `200`.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn not_implemented() -> Response {
    error_response(StatusCode::NOT_IMPLEMENTED, "Not implemented")
}
