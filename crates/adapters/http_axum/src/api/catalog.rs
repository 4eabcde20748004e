//! JSON REST handlers for the typed collections.
//!
//! Every collection gets the same five actions under `/api/v1/{segment}`;
//! successful payloads are wrapped as `{"result": …}`.

use axum::Json;
use axum::Router;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use serde::Serialize;
use serde_json::Value;

use mockstore_app::ports::SnapshotStore;
use mockstore_domain::catalog::Catalog;
use mockstore_domain::collection::CollectionKind;
use mockstore_domain::dataset::DataSet;
use mockstore_domain::record::Record;

use super::{record_from, record_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Success envelope.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub result: T,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Envelope<Vec<Record>>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the find, create, update and delete endpoints.
pub enum RecordResponse {
    Ok(Json<Envelope<Record>>),
}

impl RecordResponse {
    fn ok(record: Record) -> Self {
        Self::Ok(Json(Envelope { result: record }))
    }
}

impl IntoResponse for RecordResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Build the sub-router of one collection.
///
/// The collection is bound into each handler so the lookup action can carry
/// its own name (`findCategory`, `findProduct`, …).
pub fn routes<CS, DS>(kind: CollectionKind) -> Router<AppState<CS, DS>>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/list",
            get(move |State(state): State<AppState<CS, DS>>| list(state, kind)),
        )
        .route(
            &format!("/{}/{{id}}", kind.find_action()),
            get(
                move |State(state): State<AppState<CS, DS>>,
                      path: Result<Path<String>, PathRejection>| find(state, kind, path),
            ),
        )
        .route(
            "/create",
            post(
                move |State(state): State<AppState<CS, DS>>,
                      payload: Result<Json<Value>, JsonRejection>| {
                    create(state, kind, payload)
                },
            ),
        )
        .route(
            "/update/{id}",
            put(
                move |State(state): State<AppState<CS, DS>>,
                      path: Result<Path<String>, PathRejection>,
                      payload: Result<Json<Value>, JsonRejection>| {
                    replace(state, kind, path, payload)
                },
            )
            .patch(
                move |State(state): State<AppState<CS, DS>>,
                      path: Result<Path<String>, PathRejection>,
                      payload: Result<Json<Value>, JsonRejection>| {
                    patch(state, kind, path, payload)
                },
            ),
        )
        .route(
            "/delete/{id}",
            delete(
                move |State(state): State<AppState<CS, DS>>,
                      path: Result<Path<String>, PathRejection>| remove(state, kind, path),
            ),
        )
}

/// `GET /api/v1/{collection}/list`
pub async fn list<CS, DS>(
    state: AppState<CS, DS>,
    kind: CollectionKind,
) -> Result<ListResponse, ApiError>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    let records = state.catalog_service.list(kind).await?;
    Ok(ListResponse::Ok(Json(Envelope { result: records })))
}

/// `GET /api/v1/{collection}/find{Label}/:id`
pub async fn find<CS, DS>(
    state: AppState<CS, DS>,
    kind: CollectionKind,
    path: Result<Path<String>, PathRejection>,
) -> Result<RecordResponse, ApiError>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    let id = record_id(path)?;
    let record = state.catalog_service.find(kind, &id).await?;
    Ok(RecordResponse::ok(record))
}

/// `POST /api/v1/{collection}/create`
pub async fn create<CS, DS>(
    state: AppState<CS, DS>,
    kind: CollectionKind,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<RecordResponse, ApiError>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    let record = record_from(payload)?;
    let created = state.catalog_service.create(kind, record).await?;
    Ok(RecordResponse::ok(created))
}

/// `PUT /api/v1/{collection}/update/:id`: whitelist update.
pub async fn replace<CS, DS>(
    state: AppState<CS, DS>,
    kind: CollectionKind,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<RecordResponse, ApiError>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    let id = record_id(path)?;
    let patch = record_from(payload)?;
    let updated = state.catalog_service.replace(kind, &id, &patch).await?;
    Ok(RecordResponse::ok(updated))
}

/// `PATCH /api/v1/{collection}/update/:id`: shallow merge.
pub async fn patch<CS, DS>(
    state: AppState<CS, DS>,
    kind: CollectionKind,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<RecordResponse, ApiError>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    let id = record_id(path)?;
    let patch = record_from(payload)?;
    let updated = state.catalog_service.patch(kind, &id, patch).await?;
    Ok(RecordResponse::ok(updated))
}

/// `DELETE /api/v1/{collection}/delete/:id`
pub async fn remove<CS, DS>(
    state: AppState<CS, DS>,
    kind: CollectionKind,
    path: Result<Path<String>, PathRejection>,
) -> Result<RecordResponse, ApiError>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    let id = record_id(path)?;
    let removed = state.catalog_service.delete(kind, &id).await?;
    Ok(RecordResponse::ok(removed))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{TestApp, body_json};

    #[tokio::test]
    async fn should_create_then_find_category() {
        let app = TestApp::new().await;

        let resp = app
            .send(
                "POST",
                "/api/v1/category/create",
                Some(json!({"nameCategory": "Drinks"})),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["result"]["nameCategory"], "Drinks");
        let id = body["result"]["idCategory"].as_str().unwrap().to_string();

        let resp = app
            .send("GET", &format!("/api/v1/category/findCategory/{id}"), None)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, body);
    }

    #[tokio::test]
    async fn should_list_records_in_insertion_order() {
        let app = TestApp::new().await;
        for name in ["Ada", "Grace", "Linus"] {
            app.send(
                "POST",
                "/api/v1/customer/create",
                Some(json!({"nameCustomer": name})),
            )
            .await;
        }

        let resp = app.send("GET", "/api/v1/customer/list", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let names: Vec<&str> = body["result"]
            .as_array()
            .unwrap()
            .iter()
            .map(|record| record["nameCustomer"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Ada", "Grace", "Linus"]);
    }

    #[tokio::test]
    async fn should_return_not_found_when_collection_absent() {
        let app = TestApp::new().await;

        let resp = app.send("GET", "/api/v1/product/list", None).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(resp).await,
            json!({"error": "Collection products not found"})
        );
    }

    #[tokio::test]
    async fn should_return_labelled_not_found_for_missing_record() {
        let app = TestApp::new().await;
        app.send(
            "POST",
            "/api/v1/product/create",
            Some(json!({"idProduct": "p-1"})),
        )
        .await;

        let resp = app
            .send("GET", "/api/v1/product/findProduct/p-2", None)
            .await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await, json!({"error": "Product not found"}));
    }

    #[tokio::test]
    async fn should_copy_only_whitelisted_fields_on_put() {
        let app = TestApp::new().await;
        app.send(
            "POST",
            "/api/v1/category/create",
            Some(json!({
                "idCategory": "c-1",
                "nameCategory": "Drinks",
                "descriptionCategory": "Cold",
                "tag": "x"
            })),
        )
        .await;

        let resp = app
            .send(
                "PUT",
                "/api/v1/category/update/c-1",
                Some(json!({"nameCategory": "Beverages", "tag": "y", "rank": 1})),
            )
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            json!({"result": {"idCategory": "c-1", "nameCategory": "Beverages", "tag": "x"}})
        );
    }

    #[tokio::test]
    async fn should_merge_arbitrary_fields_on_patch() {
        let app = TestApp::new().await;
        app.send(
            "POST",
            "/api/v1/category/create",
            Some(json!({"idCategory": "c-1", "nameCategory": "Drinks"})),
        )
        .await;

        let resp = app
            .send(
                "PATCH",
                "/api/v1/category/update/c-1",
                Some(json!({"tag": "new"})),
            )
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            json!({"result": {"idCategory": "c-1", "nameCategory": "Drinks", "tag": "new"}})
        );
    }

    #[tokio::test]
    async fn should_return_removed_record_then_not_found_on_delete() {
        let app = TestApp::new().await;
        app.send(
            "POST",
            "/api/v1/customer/create",
            Some(json!({"idCustomer": 7, "nameCustomer": "Ada"})),
        )
        .await;

        let resp = app.send("DELETE", "/api/v1/customer/delete/7", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            json!({"result": {"idCustomer": 7, "nameCustomer": "Ada"}})
        );

        let resp = app.send("DELETE", "/api/v1/customer/delete/7", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await, json!({"error": "Customer not found"}));
    }

    #[tokio::test]
    async fn should_answer_undecodable_path_id_with_json_error() {
        let app = TestApp::new().await;

        let resp = app
            .send("GET", "/api/v1/product/findProduct/%FF", None)
            .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("malformed request path: ")
        );
    }

    #[tokio::test]
    async fn should_not_route_find_action_of_another_collection() {
        let app = TestApp::new().await;

        let resp = app
            .send("GET", "/api/v1/category/findProduct/1", None)
            .await;

        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
    }
}
