use dashmap::DashMap;
use std::future::Future;
use std::sync::{Arc, Weak};
use tokio::sync::OnceCell;

/// One in-flight call: a single-assignment slot that late joiners await.
type Call<T> = Arc<OnceCell<T>>;

/// Collapses concurrent calls for the same key into one execution.
///
/// While a call for a key is in flight, further callers for that key await its
/// result instead of running their own producer. Once the call completes its
/// record is dropped, so the next call for the key starts a fresh episode.
pub struct SingleFlight<T> {
    calls: DashMap<String, Call<T>>,
}

impl<T: Clone> SingleFlight<T> {
    pub fn new() -> Self {
        Self {
            calls: DashMap::new(),
        }
    }

    /// Runs `producer` for `key` unless a call for `key` is already in flight,
    /// in which case the in-flight result is returned.
    ///
    /// If the running caller is cancelled before finishing, one of the waiters
    /// takes over and runs its own producer. A call abandoned by every caller
    /// leaves no record behind.
    pub async fn call<F, Fut>(&self, key: &str, producer: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let entry = self
            .calls
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()));
        let _guard = CallGuard {
            calls: &self.calls,
            key,
            call: Arc::downgrade(&entry),
        };
        let call = Arc::clone(&entry);
        // Release the shard lock before the producer runs
        drop(entry);

        // `call` is declared after the guard, so it is released first on
        // every exit path, cancellation included
        call.get_or_init(producer).await.clone()
    }

    /// Number of keys with a call currently in flight.
    pub fn in_flight(&self) -> usize {
        self.calls.len()
    }
}

/// Drops the record for `key` once its last caller leaves, whether the call
/// finished or every caller was cancelled mid-flight.
struct CallGuard<'a, T> {
    calls: &'a DashMap<String, Call<T>>,
    key: &'a str,
    call: Weak<OnceCell<T>>,
}

impl<T> Drop for CallGuard<'_, T> {
    fn drop(&mut self) {
        // Unfinished calls stay while another caller still holds the cell
        // and can take over the load.
        self.calls.remove_if(self.key, |_, registered| {
            std::ptr::eq(Arc::as_ptr(registered), self.call.as_ptr())
                && (registered.initialized() || Arc::strong_count(registered) == 1)
        });
    }
}

impl<T: Clone> Default for SingleFlight<T> {
    fn default() -> Self {
        Self::new()
    }
}
