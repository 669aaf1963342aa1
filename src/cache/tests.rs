//! Local Cache Tests
//!
//! ## Test Scopes
//! - **LruCache**: Byte accounting, eviction order, recency refresh on reads, eviction callback.
//! - **ByteView**: Copy-on-read semantics.
//! - **Cache**: The locked wrapper under concurrent writers.

#[cfg(test)]
mod tests {
    use crate::cache::Cache;
    use crate::cache::byteview::ByteView;
    use crate::cache::lru::{LruCache, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct Text(String);

    impl Value for Text {
        fn len(&self) -> usize {
            self.0.len()
        }
    }

    fn text(s: &str) -> Text {
        Text(s.to_string())
    }

    // ============================================================
    // LRU CACHE TESTS
    // ============================================================

    #[test]
    fn test_get_hit_and_miss() {
        let mut lru = LruCache::new(0, None);
        lru.add("key1", text("1234"));

        assert_eq!(lru.get("key1"), Some(&text("1234")));
        assert!(lru.get("key2").is_none(), "key2 was never added");
    }

    #[test]
    fn test_byte_accounting_on_insert_and_update() {
        let mut lru = LruCache::new(0, None);
        lru.add("k1", text("abc"));
        lru.add("k2", text("de"));
        assert_eq!(lru.bytes(), 2 + 3 + 2 + 2);

        // Overwrite adjusts by the size delta only
        lru.add("k1", text("abcdefg"));
        assert_eq!(lru.bytes(), 2 + 7 + 2 + 2);
        assert_eq!(lru.len(), 2);
    }

    #[test]
    fn test_remove_oldest_when_over_budget() {
        let (k1, k2, k3) = ("key1", "key2", "key3");
        let (v1, v2, v3) = ("value1", "value2", "value");
        let cap = k1.len() + k2.len() + v1.len() + v2.len();
        let mut lru = LruCache::new(cap, None);

        lru.add(k1, text(v1));
        lru.add(k2, text(v2));
        lru.add(k3, text(v3));

        assert!(lru.get(k1).is_none(), "key1 should have been evicted");
        assert!(lru.bytes() <= lru.max_bytes());
        assert_eq!(lru.len(), 2);
        assert_eq!(lru.evictions(), 1);
    }

    #[test]
    fn test_insertion_order_eviction() {
        // Room for exactly two entries of 2 bytes each
        let mut lru = LruCache::new(4, None);
        lru.add("a", text("1"));
        lru.add("b", text("2"));
        lru.add("c", text("3"));

        assert!(lru.get("a").is_none());
        assert!(lru.get("b").is_some());
        assert!(lru.get("c").is_some());
    }

    #[test]
    fn test_read_refreshes_recency() {
        let mut lru = LruCache::new(4, None);
        lru.add("a", text("1"));
        lru.add("b", text("2"));
        assert!(lru.get("a").is_some());
        lru.add("c", text("3"));

        assert!(lru.get("a").is_some(), "a was read, b should go first");
        assert!(lru.get("b").is_none());
        assert!(lru.get("c").is_some());
    }

    #[test]
    fn test_update_refreshes_recency() {
        let mut lru = LruCache::new(4, None);
        lru.add("a", text("1"));
        lru.add("b", text("2"));
        lru.add("a", text("9"));
        lru.add("c", text("3"));

        assert_eq!(lru.get("a"), Some(&text("9")));
        assert!(lru.get("b").is_none());
    }

    #[test]
    fn test_on_evicted_callback() {
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let sink = evicted.clone();
        let mut lru = LruCache::new(
            10,
            Some(Box::new(move |key: &str, _value: &Text| {
                sink.lock().unwrap().push(key.to_string());
            })),
        );

        lru.add("key1", text("123456"));
        lru.add("k2", text("k2"));
        lru.add("k3", text("k3"));
        lru.add("k4", text("k4"));

        assert_eq!(*evicted.lock().unwrap(), vec!["key1", "k2"]);
    }

    #[test]
    fn test_zero_capacity_never_evicts() {
        let mut lru = LruCache::new(0, None);
        for i in 0..1000 {
            lru.add(&format!("key_{}", i), text("some value"));
        }
        assert_eq!(lru.len(), 1000);
        assert_eq!(lru.evictions(), 0);
    }

    #[test]
    fn test_budget_holds_after_every_call() {
        let mut lru = LruCache::new(64, None);
        for i in 0..500 {
            let key = format!("k{}", i % 37);
            let value = "x".repeat(i % 13);
            lru.add(&key, Text(value));
            if i % 3 == 0 {
                lru.get(&format!("k{}", i % 11));
            }

            assert!(lru.bytes() <= 64, "used {} after step {}", lru.bytes(), i);
        }
    }

    #[test]
    fn test_rewritten_keys_keep_latest_two() {
        let mut lru = LruCache::new(4, None);
        for i in 0..100 {
            lru.add(&format!("{}", i % 10), text("v"));
        }
        assert_eq!(lru.len(), 2);
        assert!(lru.get("9").is_some());
        assert!(lru.get("8").is_some());
    }

    #[test]
    fn test_remove_oldest_on_empty_is_noop() {
        let mut lru: LruCache<Text> = LruCache::new(10, None);
        lru.remove_oldest();
        assert!(lru.is_empty());
        assert_eq!(lru.bytes(), 0);
    }

    // ============================================================
    // BYTEVIEW TESTS
    // ============================================================

    #[test]
    fn test_byteview_returns_copies() {
        let view = ByteView::from(b"hello".to_vec());

        let mut copy = view.byte_slice();
        copy[0] = b'j';

        assert_eq!(view.to_string(), "hello");
        assert_eq!(view.len(), 5);
    }

    // ============================================================
    // CACHE WRAPPER TESTS
    // ============================================================

    #[test]
    fn test_cache_concurrent_adds_respect_budget() {
        let cache = Arc::new(Cache::new(256));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for i in 0..200 {
                        let key = format!("t{}_k{}", t, i);
                        cache.add(&key, ByteView::from("0123456789"));
                        let _ = cache.get(&key);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = cache.stats();
        assert!(stats.bytes <= 256);
        assert!(stats.evictions > 0);
        assert!(stats.entries > 0);
    }

    #[test]
    fn test_cache_reports_evicted_keys_to_callback() {
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let sink = evicted.clone();
        let cache = Cache::with_eviction_callback(
            8,
            Some(Box::new(move |key: &str, value: &ByteView| {
                sink.lock().unwrap().push(format!("{}={}", key, value));
            })),
        );

        cache.add("a", ByteView::from("111"));
        cache.add("b", ByteView::from("222"));
        assert!(cache.get("a").is_some());
        cache.add("c", ByteView::from("333"));

        assert_eq!(*evicted.lock().unwrap(), vec!["b=222"]);
        assert_eq!(cache.stats().evictions, 1);
        assert!(cache.get("b").is_none());
    }
}
