use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

use crate::cache::CacheStats;

/// Errors surfaced by cache groups and their collaborators.
///
/// `Clone` so a single loader outcome can be handed to every caller that was
/// waiting on the same in-flight load.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The loader's own error, passed through untouched.
    #[error("{0}")]
    Upstream(Arc<anyhow::Error>),

    /// A peer fetch failed. `Group::get` absorbs these and falls back to the loader.
    #[error("peer transport error: {0}")]
    Transport(String),

    #[error("no such group: {0}")]
    GroupNotFound(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl CacheError {
    /// The loader error behind an `Upstream` failure, for downcasting.
    pub fn upstream(&self) -> Option<&anyhow::Error> {
        match self {
            CacheError::Upstream(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for CacheError {
    fn from(err: anyhow::Error) -> Self {
        CacheError::Upstream(Arc::new(err))
    }
}

/// Live counters for a group, updated with relaxed atomics.
#[derive(Debug, Default)]
pub struct GroupStats {
    pub gets: AtomicU64,
    pub cache_hits: AtomicU64,
    pub peer_loads: AtomicU64,
    pub peer_errors: AtomicU64,
    /// Misses that entered the single-flight layer.
    pub loads: AtomicU64,
    /// Misses that actually ran a load after coalescing.
    pub loads_deduped: AtomicU64,
    pub local_loads: AtomicU64,
    pub local_load_errs: AtomicU64,
    /// Requests received from peers over the transport.
    pub server_requests: AtomicU64,
}

impl GroupStats {
    pub(crate) fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, cache: CacheStats) -> GroupStatsSnapshot {
        GroupStatsSnapshot {
            gets: self.gets.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            peer_loads: self.peer_loads.load(Ordering::Relaxed),
            peer_errors: self.peer_errors.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
            loads_deduped: self.loads_deduped.load(Ordering::Relaxed),
            local_loads: self.local_loads.load(Ordering::Relaxed),
            local_load_errs: self.local_load_errs.load(Ordering::Relaxed),
            server_requests: self.server_requests.load(Ordering::Relaxed),
            cache,
        }
    }
}

/// Serializable copy of [`GroupStats`] plus the main cache's counters.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct GroupStatsSnapshot {
    pub gets: u64,
    pub cache_hits: u64,
    pub peer_loads: u64,
    pub peer_errors: u64,
    pub loads: u64,
    pub loads_deduped: u64,
    pub local_loads: u64,
    pub local_load_errs: u64,
    pub server_requests: u64,
    pub cache: CacheStats,
}
