use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;

use super::group::Group;
use super::types::GroupStatsSnapshot;
use crate::peers::protocol::{ENDPOINT_API, ENDPOINT_API_STATS};

#[derive(Debug, Deserialize)]
pub struct ApiParams {
    #[serde(default)]
    pub key: String,
}

/// Front-end read path: `GET /api?key=K` returns the raw value bytes.
pub async fn handle_api_get(
    Extension(group): Extension<Arc<Group>>,
    Query(params): Query<ApiParams>,
) -> Response {
    match group.get(&params.key).await {
        Ok(view) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            view.byte_slice(),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("API get for '{}' failed: {}", params.key, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub async fn handle_api_stats(
    Extension(group): Extension<Arc<Group>>,
) -> (StatusCode, Json<GroupStatsSnapshot>) {
    (StatusCode::OK, Json(group.stats()))
}

/// Router for the front-end API server bound to a single group.
pub fn api_router(group: Arc<Group>) -> Router {
    Router::new()
        .route(ENDPOINT_API, get(handle_api_get))
        .route(ENDPOINT_API_STATS, get(handle_api_stats))
        .layer(Extension(group))
}
