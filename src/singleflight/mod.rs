//! Single-Flight Module
//!
//! Per-key call coalescing: at most one producer runs per key at a time inside
//! this process, and every concurrent caller for that key shares its result.
//! There is no cross-process coordination.

pub mod group;

pub use group::SingleFlight;
