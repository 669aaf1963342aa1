//! Local Cache Module
//!
//! The bounded, process-local half of the cache.
//!
//! ## Components
//! - **`byteview`**: `ByteView`, the immutable value type every group stores.
//! - **`lru`**: `LruCache`, a byte-budgeted least-recently-used store. Not thread-safe.
//! - **`Cache`** (this file): the `LruCache<ByteView>` behind a single mutex, which is
//!   what a `Group` actually owns.

pub mod byteview;
pub mod lru;

#[cfg(test)]
mod tests;

use parking_lot::Mutex;
use serde::Serialize;

use byteview::ByteView;
use lru::{LruCache, OnEvicted};

/// Point-in-time counters of a [`Cache`].
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub bytes: usize,
    pub max_bytes: usize,
    pub evictions: u64,
}

/// Concurrency-safe wrapper around [`LruCache`].
///
/// One coarse lock guards the whole structure; every operation under it is O(1).
pub struct Cache {
    inner: Mutex<LruCache<ByteView>>,
}

impl Cache {
    pub fn new(cache_bytes: usize) -> Self {
        Self::with_eviction_callback(cache_bytes, None)
    }

    pub fn with_eviction_callback(
        cache_bytes: usize,
        on_evicted: Option<OnEvicted<ByteView>>,
    ) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(cache_bytes, on_evicted)),
        }
    }

    pub fn add(&self, key: &str, value: ByteView) {
        self.inner.lock().add(key, value);
    }

    pub fn get(&self, key: &str) -> Option<ByteView> {
        self.inner.lock().get(key).cloned()
    }

    pub fn stats(&self) -> CacheStats {
        let lru = self.inner.lock();
        CacheStats {
            entries: lru.len(),
            bytes: lru.bytes(),
            max_bytes: lru.max_bytes(),
            evictions: lru.evictions(),
        }
    }
}
