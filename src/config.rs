//! Node Configuration
//!
//! Command-line flags, each overridable through an environment variable.

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

use crate::peers::protocol::DEFAULT_REPLICAS;

#[derive(Debug, Clone, Parser)]
#[command(name = "cache-node", about = "Distributed cache node")]
pub struct NodeConfig {
    /// Port of this node's peer (cache) server.
    #[arg(long, env = "CACHE_PORT", default_value_t = 9001)]
    pub port: u16,

    /// Host this node binds to and advertises to peers.
    #[arg(long, env = "CACHE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Peer base URLs (`http://host:port`), comma-separated. This node is added if missing.
    #[arg(long, env = "CACHE_PEERS", value_delimiter = ',')]
    pub peers: Vec<String>,

    /// Also start the front-end API server.
    #[arg(long)]
    pub api: bool,

    /// Bind address of the front-end API server.
    #[arg(long, env = "CACHE_API_ADDR", default_value = "127.0.0.1:9999")]
    pub api_addr: SocketAddr,

    /// Byte budget of the local cache (0 = unbounded).
    #[arg(long, env = "CACHE_BYTES", default_value_t = 2 << 10)]
    pub cache_bytes: usize,

    /// Virtual replicas per peer on the hash ring.
    #[arg(long, env = "CACHE_REPLICAS", default_value_t = DEFAULT_REPLICAS)]
    pub replicas: usize,

    /// Timeout for a single peer fetch, in milliseconds.
    #[arg(long, env = "CACHE_PEER_TIMEOUT_MS", default_value_t = 2000)]
    pub peer_timeout_ms: u64,

    /// Maximum log level (trace, debug, info, warn, error).
    #[arg(long, env = "CACHE_LOG_LEVEL", default_value = "info")]
    pub log_level: tracing::Level,

    /// Seconds between stats reports in the log (0 disables).
    #[arg(long, env = "CACHE_STATS_INTERVAL_SECS", default_value_t = 30)]
    pub stats_interval_secs: u64,
}

impl NodeConfig {
    /// Base URL under which peers reach this node.
    pub fn self_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Normalized peer list, always containing this node exactly once.
    pub fn peer_urls(&self) -> Vec<String> {
        let self_url = self.self_url();
        let mut peers: Vec<String> = self
            .peers
            .iter()
            .map(|peer| peer.trim().trim_end_matches('/').to_string())
            .filter(|peer| !peer.is_empty())
            .collect();
        if !peers.contains(&self_url) {
            peers.push(self_url);
        }
        peers.sort();
        peers.dedup();
        peers
    }

    pub fn peer_timeout(&self) -> Duration {
        Duration::from_millis(self.peer_timeout_ms)
    }

    pub fn stats_interval(&self) -> Option<Duration> {
        (self.stats_interval_secs > 0).then(|| Duration::from_secs(self.stats_interval_secs))
    }
}
