use super::cache::ResourceCache;
use super::protocol::*;
use super::query::{lookup, top_n};
use crate::error::CounterError;

use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

/// Resource used when a request does not name one.
#[derive(Debug, Clone)]
pub struct DefaultResource(pub String);

/// Builds the counter API router around a shared cache.
pub fn routes(cache: Arc<ResourceCache>, default_resource: DefaultResource) -> Router {
    Router::new()
        .route(ENDPOINT_SEARCH, post(handle_search))
        .route(ENDPOINT_TOP, get(handle_top))
        .layer(Extension(cache))
        .layer(Extension(default_resource))
}

pub async fn handle_search(
    Extension(cache): Extension<Arc<ResourceCache>>,
    Extension(default_resource): Extension<DefaultResource>,
    Json(req): Json<SearchRequest>,
) -> Response {
    let resource = req.resource_name.unwrap_or(default_resource.0);
    tracing::debug!("Search {:?} in {}", req.search_text, resource);

    match cache.get_or_build(&resource).await {
        Ok(index) => {
            let counts = lookup(&index, &req.search_text);
            (StatusCode::OK, Json(SearchResponse { counts })).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn handle_top(
    Path(count): Path<i64>,
    Query(params): Query<TopParams>,
    Extension(cache): Extension<Arc<ResourceCache>>,
    Extension(default_resource): Extension<DefaultResource>,
) -> Response {
    let resource = params.resource_name.unwrap_or(default_resource.0);
    tracing::debug!("Top {} in {}", count, resource);

    match cache.get_or_build(&resource).await {
        Ok(index) => {
            let body = encode_csv(&top_n(&index, count));
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, CSV_CONTENT_TYPE)],
                body,
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

fn error_response(err: CounterError) -> Response {
    let status = match &err {
        CounterError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
        CounterError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
        CounterError::ResourceUnreadable { .. } | CounterError::IndexBuild { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if err.is_client_error() {
        tracing::warn!("Rejected query for {}: {}", err.resource(), err);
    } else {
        tracing::error!("Query for {} failed: {}", err.resource(), err);
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
