//! Peer Network Protocol
//!
//! Endpoint paths and the payload exchanged between cache nodes.
//!
//! A peer fetch is `GET {peer}{DEFAULT_BASE_PATH}{group}/{key}` with both path
//! segments percent-encoded. A successful response carries a bincode-encoded
//! [`GetResponse`] with content type `application/octet-stream`.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Prefix under which every node serves peer fetches.
pub const DEFAULT_BASE_PATH: &str = "/_distrcache/";
/// Axum route for peer fetches. Keys may contain `/`.
pub const ENDPOINT_PEER_GET: &str = "/_distrcache/:group/*key";
/// A peer path naming a group but no key. Rejected with 400.
pub const ENDPOINT_PEER_NO_KEY: &str = "/_distrcache/:group/";
/// Front-end read endpoint (`?key=`).
pub const ENDPOINT_API: &str = "/api";
/// Front-end statistics endpoint.
pub const ENDPOINT_API_STATS: &str = "/api/stats";

/// Virtual replicas per peer on the hash ring.
pub const DEFAULT_REPLICAS: usize = 50;

// --- Data Transfer Objects ---

/// Body of a successful peer fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetResponse {
    pub value: Vec<u8>,
}

pub fn encode_response(value: Vec<u8>) -> bincode::Result<Vec<u8>> {
    bincode::serialize(&GetResponse { value })
}

pub fn decode_response(body: &[u8]) -> bincode::Result<GetResponse> {
    bincode::deserialize(body)
}
