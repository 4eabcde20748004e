//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod catalog;
#[allow(clippy::missing_errors_doc)]
pub mod data;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::routing::{get, post};
use serde_json::Value;

use mockstore_app::ports::SnapshotStore;
use mockstore_domain::catalog::Catalog;
use mockstore_domain::collection::CollectionKind;
use mockstore_domain::dataset::DataSet;
use mockstore_domain::id::RecordId;
use mockstore_domain::record::Record;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` sub-router.
///
/// Generic records live under `/data`, typed collections under
/// `/v1/{collection}`.
pub fn routes<CS, DS>() -> Router<AppState<CS, DS>>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    let router = Router::new()
        // Generic data
        .route("/data", post(data::create::<CS, DS>))
        .route(
            "/data/{id}",
            get(data::get::<CS, DS>)
                .post(data::create_at::<CS, DS>)
                .put(data::replace::<CS, DS>)
                .patch(data::patch::<CS, DS>)
                .delete(data::delete::<CS, DS>),
        );

    // Catalog
    CollectionKind::ALL.into_iter().fold(router, |router, kind| {
        router.nest(&format!("/v1/{}", kind.segment()), catalog::routes(kind))
    })
}

/// Turn a decoded request body into a [`Record`], rejecting anything that is
/// not a JSON object.
fn record_from(payload: Result<Json<Value>, JsonRejection>) -> Result<Record, ApiError> {
    let Json(value) = payload?;
    Ok(Record::try_from(value)?)
}

/// Decode the `{id}` path parameter.
fn record_id(path: Result<Path<String>, PathRejection>) -> Result<RecordId, ApiError> {
    let Path(id) = path?;
    Ok(RecordId::from(id))
}
