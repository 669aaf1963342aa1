use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::client::HttpGetter;
use super::protocol::DEFAULT_REPLICAS;
use super::{PeerGetter, PeerPicker};
use crate::consistenthash::HashRing;

const DEFAULT_PEER_TIMEOUT: Duration = Duration::from_secs(2);

struct PoolState {
    ring: HashRing,
    getters: HashMap<String, Arc<HttpGetter>>,
}

/// Ring-backed [`PeerPicker`] for a node speaking the HTTP transport.
///
/// `self_addr` must be spelled exactly as it appears in the peer list passed
/// to [`HttpPool::set`], otherwise the node would route keys to itself.
pub struct HttpPool {
    self_addr: String,
    replicas: usize,
    timeout: Duration,
    client: reqwest::Client,
    state: RwLock<PoolState>,
}

impl HttpPool {
    pub fn new(self_addr: &str) -> Arc<Self> {
        Self::with_options(self_addr, DEFAULT_REPLICAS, DEFAULT_PEER_TIMEOUT)
    }

    pub fn with_options(self_addr: &str, replicas: usize, timeout: Duration) -> Arc<Self> {
        Arc::new(Self {
            self_addr: self_addr.trim_end_matches('/').to_string(),
            replicas,
            timeout,
            client: reqwest::Client::new(),
            state: RwLock::new(PoolState {
                ring: HashRing::new(replicas, None),
                getters: HashMap::new(),
            }),
        })
    }

    pub fn self_addr(&self) -> &str {
        &self.self_addr
    }

    /// Replaces the peer set. The ring and the getters are swapped together.
    pub fn set<I, S>(&self, peers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let peers: Vec<String> = peers
            .into_iter()
            .map(|peer| peer.as_ref().trim_end_matches('/').to_string())
            .collect();

        let mut ring = HashRing::new(self.replicas, None);
        ring.add(&peers);

        let getters = peers
            .iter()
            .map(|peer| {
                let getter = HttpGetter::new(peer, self.client.clone(), self.timeout);
                (peer.clone(), Arc::new(getter))
            })
            .collect();

        *self.state.write() = PoolState { ring, getters };

        tracing::info!("[server {}] peer set updated: {:?}", self.self_addr, peers);
    }

    /// Current peer addresses, self included.
    pub fn peers(&self) -> Vec<String> {
        self.state.read().getters.keys().cloned().collect()
    }
}

impl PeerPicker for HttpPool {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>> {
        let state = self.state.read();
        let peer = state.ring.get(key)?;
        if peer == self.self_addr {
            return None;
        }

        tracing::debug!("[server {}] pick peer {} for {}", self.self_addr, peer, key);
        state
            .getters
            .get(peer)
            .map(|getter| getter.clone() as Arc<dyn PeerGetter>)
    }
}
