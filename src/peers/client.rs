use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

use super::PeerGetter;
use super::protocol::{DEFAULT_BASE_PATH, decode_response};
use crate::group::types::CacheError;

/// [`PeerGetter`] for one remote node, over HTTP.
///
/// Each fetch is attempted once; failures are reported as
/// `CacheError::Transport` and retrying is left to the caller.
#[derive(Debug, Clone)]
pub struct HttpGetter {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpGetter {
    /// `peer` is the node's base URL, e.g. `http://localhost:9001`.
    pub fn new(peer: &str, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            base_url: format!("{}{}", peer.trim_end_matches('/'), DEFAULT_BASE_PATH),
            client,
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, group: &str, key: &str) -> Result<Url, CacheError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            CacheError::Transport(format!("invalid peer url {}: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                CacheError::Transport(format!("peer url {} cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .push(group)
            .push(key);
        Ok(url)
    }
}

#[async_trait]
impl PeerGetter for HttpGetter {
    async fn get(&self, group: &str, key: &str) -> Result<Vec<u8>, CacheError> {
        let url = self.url_for(group, key)?;

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| CacheError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CacheError::Transport(format!(
                "peer {} returned {}",
                self.base_url,
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CacheError::Transport(format!("read response body: {}", e)))?;

        let decoded = decode_response(&body)
            .map_err(|e| CacheError::Transport(format!("decode response body: {}", e)))?;

        Ok(decoded.value)
    }
}
