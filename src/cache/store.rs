//! Cache Store Module
//!
//! Local cache engine combining a HashMap entry table with the arena-backed
//! recency list. Both `get` and `put` are O(1) regardless of capacity.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use tracing::debug;

use crate::cache::{Position, RecencyList};
use crate::error::{CacheError, Result};

/// Upper bound on the entries reserved up front; larger caches grow on demand
const PREALLOCATE_LIMIT: usize = 1024;

// == LRU Cache ==
/// Fixed-capacity in-process LRU cache.
///
/// Callers sharing one instance across tasks must serialize access
/// (the HTTP layer wraps it in a single mutex).
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Key -> position of its entry in `recency`
    entries: HashMap<K, Position>,
    /// Entries ordered from most to least recently used
    recency: RecencyList<K, V>,
    /// Maximum number of live entries
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone + Display,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Fails with `InvalidConfiguration` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            entries: HashMap::with_capacity(capacity.min(PREALLOCATE_LIMIT) + 1),
            recency: RecencyList::with_capacity(capacity.min(PREALLOCATE_LIMIT) + 1),
            capacity,
        })
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss leaves the cache untouched.
    pub fn get(&mut self, key: &K) -> Result<&V> {
        let position = match self.entries.get(key) {
            Some(position) => *position,
            None => return Err(CacheError::NotFound(key.to_string())),
        };

        let moved = self.recency.move_to_front(position);
        debug_assert!(moved, "entry table holds a stale position");

        self.recency
            .get(position)
            .ok_or_else(|| CacheError::Internal(format!("dangling entry for key {key}")))
    }

    // == Put ==
    /// Inserts or replaces the value for `key` and marks it most recently used.
    ///
    /// Inserting a new key into a full cache evicts exactly one entry,
    /// the least recently used. Updating an existing key never evicts.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(&position) = self.entries.get(&key) {
            if let Some(slot) = self.recency.get_mut(position) {
                *slot = value;
            }
            self.recency.move_to_front(position);
            return;
        }

        let position = self.recency.push_front(key.clone(), value);
        self.entries.insert(key, position);

        if self.entries.len() > self.capacity {
            if let Some((evicted, _)) = self.recency.pop_back() {
                self.entries.remove(&evicted);
                debug!(key = %evicted, "evicted least recently used entry");
            }
        }
    }

    // == Contains ==
    /// Checks for `key` without touching recency.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    // == Keys ==
    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.recency.iter().map(|(key, _)| key)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Capacity ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[cfg(test)]
    pub(crate) fn validate_invariants(&self) {
        self.recency.validate_invariants();
        assert_eq!(self.entries.len(), self.recency.len());
        assert!(self.entries.len() <= self.capacity);
        for (key, position) in &self.entries {
            assert!(self.recency.get(*position).is_some(), "stale position for {key}");
        }
    }
}
