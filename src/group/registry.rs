//! Group Registry
//!
//! Process-wide lookup table from group name to `Group`. Built once at startup
//! and shared (behind an `Arc`) with every request handler that needs to
//! resolve a group by name.

use dashmap::DashMap;
use std::sync::Arc;

use super::getter::Getter;
use super::group::Group;

pub struct GroupRegistry {
    groups: DashMap<String, Arc<Group>>,
}

impl GroupRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            groups: DashMap::new(),
        })
    }

    /// Creates a group and registers it under `name`.
    ///
    /// Registering an existing name replaces the previous group (last write
    /// wins); the replacement is logged.
    pub fn new_group<G>(&self, name: &str, cache_bytes: usize, getter: G) -> Arc<Group>
    where
        G: Getter + 'static,
    {
        let group = Arc::new(Group::new(name, cache_bytes, Arc::new(getter)));

        if self
            .groups
            .insert(name.to_string(), group.clone())
            .is_some()
        {
            tracing::warn!("Group '{}' was already registered, replacing it", name);
        } else {
            tracing::info!("Registered group '{}' ({} bytes)", name, cache_bytes);
        }

        group
    }

    pub fn get_group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.get(name).map(|entry| entry.value().clone())
    }

    /// Returns the names of all registered groups.
    pub fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for GroupRegistry {
    fn default() -> Self {
        Self {
            groups: DashMap::new(),
        }
    }
}
