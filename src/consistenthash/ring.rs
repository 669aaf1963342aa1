use std::collections::HashMap;
use std::sync::Arc;

/// Hash function used to place identities and keys on the ring.
pub type HashFn = Arc<dyn Fn(&[u8]) -> u32 + Send + Sync>;

/// Consistent hash ring with virtual replicas.
///
/// Each identity occupies `replicas` positions, hashed from `"{i}{identity}"`.
/// A key belongs to the identity owning the first position at or after the
/// key's hash, wrapping around to the smallest position.
#[derive(Clone)]
pub struct HashRing {
    hash: HashFn,
    replicas: usize,
    keys: Vec<u32>,
    hash_map: HashMap<u32, String>,
}

impl HashRing {
    /// Creates an empty ring. `hash` defaults to CRC-32C.
    pub fn new(replicas: usize, hash: Option<HashFn>) -> Self {
        Self {
            hash: hash.unwrap_or_else(|| Arc::new(crc32c::crc32c) as HashFn),
            replicas,
            keys: Vec::new(),
            hash_map: HashMap::new(),
        }
    }

    /// Places every identity on the ring, sorting positions once at the end.
    pub fn add<I, S>(&mut self, identities: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for identity in identities {
            let identity = identity.as_ref();
            for i in 0..self.replicas {
                let hash = (self.hash)(format!("{}{}", i, identity).as_bytes());
                self.keys.push(hash);
                self.hash_map.insert(hash, identity.to_string());
            }
        }
        self.keys.sort_unstable();
    }

    /// Returns the identity owning `key`, or `None` when the ring is empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }

        let hash = (self.hash)(key.as_bytes());
        let idx = self.keys.partition_point(|&position| position < hash);

        self.hash_map
            .get(&self.keys[idx % self.keys.len()])
            .map(String::as_str)
    }

    /// Number of positions on the ring.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl std::fmt::Debug for HashRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashRing")
            .field("replicas", &self.replicas)
            .field("positions", &self.keys.len())
            .finish()
    }
}
