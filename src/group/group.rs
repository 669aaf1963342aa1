use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

use super::getter::Getter;
use super::types::{CacheError, GroupStats, GroupStatsSnapshot};
use crate::cache::byteview::ByteView;
use crate::cache::{Cache, CacheStats};
use crate::peers::{PeerGetter, PeerPicker};
use crate::singleflight::SingleFlight;

/// A named cache namespace: one bounded local store, one loader, and an
/// optional set of peers.
///
/// Lookups go local cache -> owning peer -> loader. Concurrent misses for the
/// same key share a single load.
pub struct Group {
    name: String,
    main_cache: Cache,
    getter: Arc<dyn Getter>,
    peers: RwLock<Option<Arc<dyn PeerPicker>>>,
    loader: SingleFlight<Result<ByteView, CacheError>>,
    stats: GroupStats,
}

impl Group {
    /// Creates a group whose local store holds at most `cache_bytes`
    /// (`0` for unbounded). Most callers go through `GroupRegistry::new_group`.
    pub fn new(name: &str, cache_bytes: usize, getter: Arc<dyn Getter>) -> Self {
        Self {
            name: name.to_string(),
            main_cache: Cache::new(cache_bytes),
            getter,
            peers: RwLock::new(None),
            loader: SingleFlight::new(),
            stats: GroupStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binds the peer picker used on local misses. Rebinding replaces the
    /// previous picker and is logged.
    pub fn register_peers(&self, peers: Arc<dyn PeerPicker>) {
        let mut slot = self.peers.write();
        if slot.is_some() {
            tracing::warn!("Group '{}': peers already registered, replacing", self.name);
        }
        *slot = Some(peers);
    }

    /// Returns the value for `key`, loading it on a miss.
    ///
    /// Peer failures are logged and fall through to the loader; only loader
    /// errors reach the caller.
    pub async fn get(&self, key: &str) -> Result<ByteView, CacheError> {
        GroupStats::incr(&self.stats.gets);

        if key.is_empty() {
            return Err(CacheError::InvalidArgument("key is required".to_string()));
        }

        if let Some(value) = self.main_cache.get(key) {
            GroupStats::incr(&self.stats.cache_hits);
            tracing::debug!("Group '{}': cache hit for {}", self.name, key);
            return Ok(value);
        }

        self.load(key).await
    }

    /// Like [`Group::get`], but gives up after `timeout`.
    ///
    /// An abandoned load keeps no state behind: a concurrent caller waiting on
    /// the same key takes the load over.
    pub async fn get_with_timeout(
        &self,
        key: &str,
        timeout: Duration,
    ) -> Result<ByteView, CacheError> {
        tokio::time::timeout(timeout, self.get(key))
            .await
            .map_err(|_| CacheError::Timeout(timeout))?
    }

    /// Seeds the local store directly, bypassing peers and the loader.
    pub fn add(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }

    pub fn stats(&self) -> GroupStatsSnapshot {
        self.stats.snapshot(self.main_cache.stats())
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.main_cache.stats()
    }

    /// Keys with a load currently in flight.
    pub fn loads_in_flight(&self) -> usize {
        self.loader.in_flight()
    }

    pub(crate) fn record_server_request(&self) {
        GroupStats::incr(&self.stats.server_requests);
    }

    async fn load(&self, key: &str) -> Result<ByteView, CacheError> {
        GroupStats::incr(&self.stats.loads);

        self.loader
            .call(key, || async {
                // A caller that missed just as the previous flight finished
                // finds the value here instead of loading it again.
                if let Some(value) = self.main_cache.get(key) {
                    GroupStats::incr(&self.stats.cache_hits);
                    return Ok(value);
                }
                GroupStats::incr(&self.stats.loads_deduped);

                let picker = self.peers.read().clone();
                if let Some(picker) = picker
                    && let Some(peer) = picker.pick_peer(key)
                {
                    match self.get_from_peer(peer.as_ref(), key).await {
                        Ok(value) => {
                            GroupStats::incr(&self.stats.peer_loads);
                            return Ok(value);
                        }
                        Err(e) => {
                            GroupStats::incr(&self.stats.peer_errors);
                            tracing::warn!(
                                "Group '{}': peer fetch for {} failed, loading locally: {}",
                                self.name,
                                key,
                                e
                            );
                        }
                    }
                }

                self.get_locally(key).await
            })
            .await
    }

    async fn get_from_peer(
        &self,
        peer: &dyn PeerGetter,
        key: &str,
    ) -> Result<ByteView, CacheError> {
        let bytes = peer.get(&self.name, key).await?;
        Ok(ByteView::from(bytes))
    }

    async fn get_locally(&self, key: &str) -> Result<ByteView, CacheError> {
        let bytes = match self.getter.get(key).await {
            Ok(bytes) => bytes,
            Err(e) => {
                GroupStats::incr(&self.stats.local_load_errs);
                return Err(CacheError::from(e));
            }
        };
        GroupStats::incr(&self.stats.local_loads);

        // The loader's buffer is moved in, so nothing outside the cache can
        // still write to it.
        let value = ByteView::from(bytes);
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }
}

impl std::fmt::Debug for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("cache", &self.main_cache.stats())
            .finish()
    }
}
