//! Shared Cache Module
//!
//! Approximate LRU on top of a remote store: values live in a field-map
//! (`<ns>:data`) and recency in a separate list (`<ns>:recency`, MRU at the
//! head).
//!
//! Every step below is its own remote command and nothing groups them, so
//! under concurrent clients the recency order can drift from a strictly
//! serialized LRU. Partial failures leave one of two benign orphans:
//! - a recency marker whose field is gone: the next trim pops it and the
//!   HDEL is a no-op;
//! - a field with no marker: never trimmed by recency, bounded only by the
//!   store's own limits.
//!
//! A single client issuing `put` then `get` always reads its own write.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::RecencyStore;
use crate::error::{CacheError, Result};

/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "lru";

// == Shared LRU Cache ==
/// LRU cache whose state lives in a remote [`RecencyStore`].
///
/// Cheap to clone; clones share the store connection.
#[derive(Clone)]
pub struct SharedLruCache {
    store: Arc<dyn RecencyStore>,
    data_key: String,
    recency_key: String,
    capacity: usize,
}

impl SharedLruCache {
    // == Constructor ==
    /// Creates a cache over `store` under `namespace`.
    ///
    /// Fails with `InvalidConfiguration` when `capacity` is zero.
    pub fn new(store: Arc<dyn RecencyStore>, namespace: &str, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            store,
            data_key: format!("{namespace}:data"),
            recency_key: format!("{namespace}:recency"),
            capacity,
        })
    }

    // == Get ==
    /// Returns the value for `key` and bumps it to most recently used.
    pub async fn get(&self, key: &str) -> Result<Value> {
        if !self.store.hexists(&self.data_key, key).await? {
            return Err(CacheError::NotFound(key.to_string()));
        }

        self.touch(key).await?;

        // Another client may have trimmed the key since HEXISTS
        let raw = self
            .store
            .hget(&self.data_key, key)
            .await?
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        serde_json::from_str(&raw).map_err(|err| {
            CacheError::Internal(format!("stored value for {key} is not valid JSON: {err}"))
        })
    }

    // == Put ==
    /// Stores `value` under `key`, bumps it to most recently used, then trims
    /// the recency list back to capacity.
    ///
    /// Returns how many entries were trimmed.
    pub async fn put(&self, key: &str, value: &Value) -> Result<usize> {
        let raw = serde_json::to_string(value)
            .map_err(|err| CacheError::Internal(format!("cannot serialize value: {err}")))?;

        self.store.hset(&self.data_key, key, &raw).await?;
        self.touch(key).await?;

        let trimmed = self.trim().await?;
        if trimmed > 0 {
            debug!(trimmed, "trimmed shared recency list");
        }
        Ok(trimmed)
    }

    // == Ping ==
    /// Checks that the remote store answers.
    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }

    // == Capacity ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Name of the remote field-map holding values.
    pub fn data_key(&self) -> &str {
        &self.data_key
    }

    /// Name of the remote list holding recency markers.
    pub fn recency_key(&self) -> &str {
        &self.recency_key
    }

    /// Drops any stale marker for `key` and pushes a fresh MRU marker.
    async fn touch(&self, key: &str) -> Result<()> {
        self.store.lrem(&self.recency_key, key).await?;
        self.store.lpush(&self.recency_key, key).await?;
        Ok(())
    }

    /// Pops LRU markers and deletes their fields until the list fits.
    async fn trim(&self) -> Result<usize> {
        let mut trimmed = 0;
        while self.store.llen(&self.recency_key).await? > self.capacity {
            let Some(lru_key) = self.store.rpop(&self.recency_key).await? else {
                break;
            };
            if let Err(err) = self.store.hdel(&self.data_key, &lru_key).await {
                warn!(key = %lru_key, error = %err, "marker trimmed but field not deleted");
                return Err(err);
            }
            debug!(key = %lru_key, "evicted least recently used entry");
            trimmed += 1;
        }
        Ok(trimmed)
    }
}
