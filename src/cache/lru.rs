//! Byte-bounded LRU store.
//!
//! Recency ordering comes from an unbounded `lru::LruCache`; this type adds
//! the byte budget on top of it. The store is not synchronized:
//! [`super::Cache`] wraps it in a lock.

/// Anything that can report its size in bytes.
pub trait Value {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Called with every evicted entry. Runs while the owning lock is held, so it
/// must not re-enter the store.
pub type OnEvicted<V> = Box<dyn FnMut(&str, &V) + Send>;

pub struct LruCache<V> {
    max_bytes: usize,
    n_bytes: usize,
    inner: ::lru::LruCache<String, V>,
    on_evicted: Option<OnEvicted<V>>,
    evictions: u64,
}

impl<V: Value> LruCache<V> {
    /// Creates a store holding at most `max_bytes` of keys plus values.
    /// `max_bytes == 0` disables eviction.
    pub fn new(max_bytes: usize, on_evicted: Option<OnEvicted<V>>) -> Self {
        Self {
            max_bytes,
            n_bytes: 0,
            inner: ::lru::LruCache::unbounded(),
            on_evicted,
            evictions: 0,
        }
    }

    /// Looks up `key`, marking it as most recently used on a hit.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        self.inner.get(key)
    }

    /// Inserts or replaces `key`, then evicts from the least recently used
    /// end until the byte budget holds again.
    pub fn add(&mut self, key: &str, value: V) {
        let new_len = value.len();
        match self.inner.put(key.to_string(), value) {
            Some(old) => self.n_bytes = self.n_bytes + new_len - old.len(),
            None => self.n_bytes += key.len() + new_len,
        }

        while self.max_bytes != 0 && self.n_bytes > self.max_bytes {
            self.remove_oldest();
        }
    }

    /// Evicts the least recently used entry, if any, and hands it to the
    /// eviction callback before returning.
    pub fn remove_oldest(&mut self) {
        let Some((key, value)) = self.inner.pop_lru() else {
            return;
        };
        self.n_bytes -= key.len() + value.len();
        self.evictions += 1;

        if let Some(callback) = self.on_evicted.as_mut() {
            callback(key.as_str(), &value);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Bytes currently accounted: sum of key and value lengths.
    pub fn bytes(&self) -> usize {
        self.n_bytes
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}
