//! Data Object Service routes.
//!
//! Canonical paths follow the DOS v1 schema (`dataobjects`, `databundles`);
//! `objects` and `bundles` are accepted as aliases.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use dos_dss_core::{
    DataBundleResponse, DataObjectResponse, DosService, ListDataBundlesResponse, PageRequest,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: DosService,
    pub base_path: String,
}

#[derive(Debug, Deserialize)]
pub struct ListBundlesQuery {
    pub page_size: Option<u32>,
    pub page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BundleQuery {
    pub version: Option<String>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let dos = Router::new()
        .route("/dataobjects", get(list_data_objects))
        .route("/dataobjects/:data_object_id", get(get_data_object))
        .route("/databundles", get(list_data_bundles))
        .route("/databundles/:data_bundle_id", get(get_data_bundle))
        .route("/objects", get(list_data_objects))
        .route("/objects/:data_object_id", get(get_data_object))
        .route("/bundles", get(list_data_bundles))
        .route("/bundles/:data_bundle_id", get(get_data_bundle));

    let app = Router::new().route("/", get(index));
    let app = match state.base_path.as_str() {
        "" | "/" => app.merge(dos),
        base_path => app.nest(base_path, dos),
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<h1>Welcome to the DOS proxy, send requests to {}/</h1>",
        state.base_path
    ))
}

async fn get_data_object(
    State(state): State<AppState>,
    Path(data_object_id): Path<String>,
) -> Result<Json<DataObjectResponse>, ApiError> {
    let data_object = state.service.get_data_object(&data_object_id).await?;
    Ok(Json(DataObjectResponse { data_object }))
}

/// Listing objects is not supported by the storage API.
async fn list_data_objects() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

async fn list_data_bundles(
    State(state): State<AppState>,
    query: Result<Query<ListBundlesQuery>, QueryRejection>,
) -> Result<Json<ListDataBundlesResponse>, ApiError> {
    let Query(query) = query?;
    let page_size = match query.page_size {
        Some(0) => {
            return Err(ApiError::BadRequest(
                "page_size must be a positive integer".to_string(),
            ))
        }
        Some(size) => size,
        None => state.service.default_page_size(),
    };
    let page = PageRequest::new(page_size, query.page_token);
    let response = state.service.list_data_bundles(&page).await?;
    Ok(Json(response))
}

async fn get_data_bundle(
    State(state): State<AppState>,
    Path(data_bundle_id): Path<String>,
    query: Result<Query<BundleQuery>, QueryRejection>,
) -> Result<Json<DataBundleResponse>, ApiError> {
    let Query(query) = query?;
    let data_bundle = state
        .service
        .get_data_bundle(&data_bundle_id, query.version.as_deref())
        .await?;
    Ok(Json(DataBundleResponse { data_bundle }))
}
