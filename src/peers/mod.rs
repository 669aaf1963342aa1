//! Peer Module
//!
//! Everything needed to delegate a miss to the peer that owns the key.
//!
//! ## Capabilities
//! - **`PeerPicker`**: resolves a key to the remote peer owning it, or `None`
//!   when the key belongs to this process (or no peers are configured).
//! - **`PeerGetter`**: fetches `(group, key)` from one remote peer.
//!
//! ## Submodules
//! - **`pool`**: `HttpPool`, the ring-backed `PeerPicker` used by cache nodes.
//! - **`client`**: `HttpGetter`, a `PeerGetter` speaking the HTTP transport.
//! - **`handlers`**: Axum handlers serving peer fetches from a `GroupRegistry`.
//! - **`protocol`**: Endpoint paths and wire DTOs.

pub mod client;
pub mod handlers;
pub mod pool;
pub mod protocol;


use async_trait::async_trait;
use std::sync::Arc;

use crate::group::types::CacheError;

/// Fetches a value from the peer that owns it.
#[async_trait]
pub trait PeerGetter: Send + Sync {
    async fn get(&self, group: &str, key: &str) -> Result<Vec<u8>, CacheError>;
}

/// Chooses the peer responsible for a key.
///
/// Must be deterministic for a fixed membership and must never return the
/// local process.
pub trait PeerPicker: Send + Sync {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>>;
}
