//! Consistent Hashing Module
//!
//! Maps keys to peer identities with a virtual-replica hash ring.
//!
//! Adding or removing one peer only remaps the keys that fall between the
//! affected positions and their predecessors, instead of reshuffling every key
//! the way `hash % peer_count` would.

pub mod ring;

pub use ring::{HashFn, HashRing};

#[cfg(test)]
mod tests;
