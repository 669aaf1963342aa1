//! Group Orchestration Module
//!
//! A `Group` ties the pieces together for one cache namespace:
//!
//! 1. **Local cache**: a hit returns immediately.
//! 2. **Single-flight**: concurrent misses for one key collapse into one load.
//! 3. **Peer**: if a `PeerPicker` maps the key to a remote owner, fetch from it.
//!    The result is *not* cached locally; the owner's cache is authoritative.
//! 4. **Loader**: otherwise (or if the peer fails) call the `Getter` and cache the result.
//!
//! ## Submodules
//! - **`group`**: The `Group` orchestrator.
//! - **`getter`**: The loader capability and its closure adapter.
//! - **`registry`**: `GroupRegistry`, the name -> group table shared with request handlers.
//! - **`handlers`**: Front-end HTTP API over one group.
//! - **`types`**: Errors and statistics.

pub mod getter;
pub mod group;
pub mod handlers;
pub mod registry;
pub mod types;
