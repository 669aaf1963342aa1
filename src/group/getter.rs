//! Loader capability.
//!
//! A `Getter` produces the bytes for a key from the system of record when no
//! cache (local or peer) has them.

use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;

#[async_trait]
pub trait Getter: Send + Sync {
    async fn get(&self, key: &str) -> Result<Vec<u8>>;
}

/// Adapts an async closure into a [`Getter`].
///
/// ```ignore
/// let getter = GetterFn::new(|key: String| async move {
///     db_lookup(&key).await
/// });
/// ```
pub struct GetterFn<F> {
    f: F,
}

impl<F> GetterFn<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> Getter for GetterFn<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<u8>>> + Send + 'static,
{
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        (self.f)(key.to_string()).await
    }
}
