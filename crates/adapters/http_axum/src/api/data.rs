//! JSON REST handlers for generic records.
//!
//! Records are returned raw, without an envelope.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use mockstore_app::ports::SnapshotStore;
use mockstore_domain::catalog::Catalog;
use mockstore_domain::dataset::DataSet;
use mockstore_domain::record::Record;

use super::{record_from, record_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the get, update and delete endpoints.
pub enum RecordResponse {
    Ok(Json<Record>),
}

impl IntoResponse for RecordResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Record>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/data/:id`
pub async fn get<CS, DS>(
    State(state): State<AppState<CS, DS>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<RecordResponse, ApiError>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    let id = record_id(path)?;
    let record = state.data_service.get(&id).await?;
    Ok(RecordResponse::Ok(Json(record)))
}

/// `POST /api/data`
pub async fn create<CS, DS>(
    State(state): State<AppState<CS, DS>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    let record = record_from(payload)?;
    let created = state.data_service.create(record).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `POST /api/data/:id`
pub async fn create_at<CS, DS>(
    State(state): State<AppState<CS, DS>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    let id = record_id(path)?;
    let record = record_from(payload)?;
    let created = state.data_service.create_at(&id, record).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/data/:id`
pub async fn replace<CS, DS>(
    State(state): State<AppState<CS, DS>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<RecordResponse, ApiError>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    let id = record_id(path)?;
    let record = record_from(payload)?;
    let replaced = state.data_service.replace(&id, record).await?;
    Ok(RecordResponse::Ok(Json(replaced)))
}

/// `PATCH /api/data/:id`
pub async fn patch<CS, DS>(
    State(state): State<AppState<CS, DS>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<RecordResponse, ApiError>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    let id = record_id(path)?;
    let patch = record_from(payload)?;
    let patched = state.data_service.patch(&id, patch).await?;
    Ok(RecordResponse::Ok(Json(patched)))
}

/// `DELETE /api/data/:id`
pub async fn delete<CS, DS>(
    State(state): State<AppState<CS, DS>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<RecordResponse, ApiError>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    let id = record_id(path)?;
    let removed = state.data_service.delete(&id).await?;
    Ok(RecordResponse::Ok(Json(removed)))
}
