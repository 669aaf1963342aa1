use axum::{
    Router,
    extract::{Extension, Path},
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;

use super::protocol::{ENDPOINT_PEER_GET, ENDPOINT_PEER_NO_KEY, encode_response};
use crate::group::registry::GroupRegistry;
use crate::group::types::CacheError;

/// Serves `GET /_distrcache/{group}/{key}` for other nodes.
pub async fn handle_peer_get(
    Extension(registry): Extension<Arc<GroupRegistry>>,
    Path((group_name, key)): Path<(String, String)>,
) -> Response {
    tracing::debug!("Peer request: group={} key={}", group_name, key);

    let Some(group) = registry.get_group(&group_name) else {
        let err = CacheError::GroupNotFound(group_name);
        tracing::warn!("{}", err);
        return (StatusCode::NOT_FOUND, err.to_string()).into_response();
    };
    group.record_server_request();

    let view = match group.get(&key).await {
        Ok(view) => view,
        Err(e) => {
            tracing::error!("Failed to get {}/{}: {}", group_name, key, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    match encode_response(view.byte_slice()) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode response: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("encode response: {}", e),
            )
                .into_response()
        }
    }
}

/// Anything that is not `/{group}/{key}` under the peer prefix.
pub async fn handle_malformed_path(uri: Uri) -> Response {
    tracing::warn!("Malformed peer request: {}", uri.path());
    (
        StatusCode::BAD_REQUEST,
        format!("expected {{group}}/{{key}}, got {}", uri.path()),
    )
        .into_response()
}

/// Router serving peer fetches for every group in `registry`.
pub fn peer_router(registry: Arc<GroupRegistry>) -> Router {
    Router::new()
        .route(ENDPOINT_PEER_GET, get(handle_peer_get))
        .route(ENDPOINT_PEER_NO_KEY, get(handle_malformed_path))
        .fallback(handle_malformed_path)
        .layer(Extension(registry))
}
