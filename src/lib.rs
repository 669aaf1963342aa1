//! Distributed Cache Library
//!
//! An in-process caching layer shared by a small fleet of peer processes. Each
//! process keeps a bounded local cache; on a miss it asks the peer that owns the
//! key, or falls back to a user-supplied loader. Concurrent misses for the same
//! key inside one process collapse into a single upstream fetch.
//!
//! ## Architecture Modules
//! - **`cache`**: The immutable `ByteView` value type and the byte-bounded LRU store.
//! - **`consistenthash`**: Virtual-replica hash ring mapping keys to peer identities.
//! - **`singleflight`**: Per-key call coalescing (at most one in-flight load per key).
//! - **`group`**: The `Group` orchestrator (local cache -> peer -> loader), the
//!   loader capability, and the `GroupRegistry`.
//! - **`peers`**: Peer capabilities plus their HTTP implementation (ring-backed
//!   pool, client, and server handlers).
//! - **`config`**: Command-line / environment configuration for the node binary.

pub mod cache;
pub mod config;
pub mod consistenthash;
pub mod group;
pub mod peers;
pub mod singleflight;

pub use cache::byteview::ByteView;
pub use group::getter::{Getter, GetterFn};
pub use group::group::Group;
pub use group::registry::GroupRegistry;
pub use group::types::CacheError;
pub use peers::{PeerGetter, PeerPicker};
