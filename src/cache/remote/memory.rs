//! In-process recency store.
//!
//! Mirrors the Redis command semantics the shared cache relies on and lets
//! callers make individual commands fail, to exercise partial-failure paths
//! without a server.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::RecencyStore;
use crate::error::{CacheError, Result};

#[derive(Debug, Default)]
struct MemoryState {
    maps: HashMap<String, HashMap<String, String>>,
    lists: HashMap<String, VecDeque<String>>,
    failing: HashSet<&'static str>,
    down: bool,
}

impl MemoryState {
    fn check(&self, command: &'static str) -> Result<()> {
        if self.down {
            return Err(CacheError::BackendUnavailable("store is unreachable".to_string()));
        }
        if self.failing.contains(command) {
            return Err(CacheError::BackendUnavailable(format!("{command} failed")));
        }
        Ok(())
    }
}

// == Memory Store ==
/// Cloneable handle to a shared in-memory field-map/list store.
///
/// Clones see the same data, like several clients of one server.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Fault Injection ==
    /// Makes every command fail with `BackendUnavailable` while `down` is set.
    pub async fn set_down(&self, down: bool) {
        self.state.lock().await.down = down;
    }

    /// Makes one command (e.g. `"HDEL"`) fail until [`Self::heal`] is called.
    pub async fn fail_command(&self, command: &'static str) {
        self.state.lock().await.failing.insert(command);
    }

    /// Clears all injected faults.
    pub async fn heal(&self) {
        let mut state = self.state.lock().await;
        state.failing.clear();
        state.down = false;
    }

    // == Inspection ==
    /// Snapshot of `list` from head to tail.
    pub async fn list(&self, list: &str) -> Vec<String> {
        let state = self.state.lock().await;
        state
            .lists
            .get(list)
            .map(|items| items.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Sorted field names currently set in `map`.
    pub async fn fields(&self, map: &str) -> Vec<String> {
        let state = self.state.lock().await;
        let mut fields: Vec<String> = state
            .maps
            .get(map)
            .map(|fields| fields.keys().cloned().collect())
            .unwrap_or_default();
        fields.sort();
        fields
    }
}

#[async_trait]
impl RecencyStore for MemoryStore {
    async fn hexists(&self, map: &str, field: &str) -> Result<bool> {
        let state = self.state.lock().await;
        state.check("HEXISTS")?;
        Ok(state
            .maps
            .get(map)
            .is_some_and(|fields| fields.contains_key(field)))
    }

    async fn hget(&self, map: &str, field: &str) -> Result<Option<String>> {
        let state = self.state.lock().await;
        state.check("HGET")?;
        Ok(state.maps.get(map).and_then(|fields| fields.get(field).cloned()))
    }

    async fn hset(&self, map: &str, field: &str, value: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.check("HSET")?;
        state
            .maps
            .entry(map.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn hdel(&self, map: &str, field: &str) -> Result<bool> {
        let mut state = self.state.lock().await;
        state.check("HDEL")?;
        Ok(state
            .maps
            .get_mut(map)
            .is_some_and(|fields| fields.remove(field).is_some()))
    }

    async fn lrem(&self, list: &str, member: &str) -> Result<usize> {
        let mut state = self.state.lock().await;
        state.check("LREM")?;
        let Some(items) = state.lists.get_mut(list) else {
            return Ok(0);
        };
        let before = items.len();
        items.retain(|item| item != member);
        Ok(before - items.len())
    }

    async fn lpush(&self, list: &str, member: &str) -> Result<usize> {
        let mut state = self.state.lock().await;
        state.check("LPUSH")?;
        let items = state.lists.entry(list.to_string()).or_default();
        items.push_front(member.to_string());
        Ok(items.len())
    }

    async fn llen(&self, list: &str) -> Result<usize> {
        let state = self.state.lock().await;
        state.check("LLEN")?;
        Ok(state.lists.get(list).map_or(0, VecDeque::len))
    }

    async fn rpop(&self, list: &str) -> Result<Option<String>> {
        let mut state = self.state.lock().await;
        state.check("RPOP")?;
        Ok(state.lists.get_mut(list).and_then(VecDeque::pop_back))
    }

    async fn ping(&self) -> Result<()> {
        self.state.lock().await.check("PING")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_field_map_commands() {
        let store = MemoryStore::new();

        assert!(!store.hexists("m", "a").await.unwrap());
        store.hset("m", "a", "1").await.unwrap();
        assert!(store.hexists("m", "a").await.unwrap());
        assert_eq!(store.hget("m", "a").await.unwrap(), Some("1".to_string()));

        assert!(store.hdel("m", "a").await.unwrap());
        assert!(!store.hdel("m", "a").await.unwrap());
        assert_eq!(store.hget("m", "a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_commands() {
        let store = MemoryStore::new();

        assert_eq!(store.llen("l").await.unwrap(), 0);
        store.lpush("l", "a").await.unwrap();
        store.lpush("l", "b").await.unwrap();
        store.lpush("l", "a").await.unwrap();
        assert_eq!(store.list("l").await, vec!["a", "b", "a"]);

        assert_eq!(store.lrem("l", "a").await.unwrap(), 2);
        assert_eq!(store.llen("l").await.unwrap(), 1);
        assert_eq!(store.rpop("l").await.unwrap(), Some("b".to_string()));
        assert_eq!(store.rpop("l").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fault_injection() {
        let store = MemoryStore::new();

        store.fail_command("HDEL").await;
        assert!(matches!(
            store.hdel("m", "a").await,
            Err(CacheError::BackendUnavailable(_))
        ));
        assert!(store.hset("m", "a", "1").await.is_ok());

        store.set_down(true).await;
        assert!(matches!(
            store.ping().await,
            Err(CacheError::BackendUnavailable(_))
        ));

        store.heal().await;
        assert!(store.ping().await.is_ok());
        assert!(store.hdel("m", "a").await.unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.hset("m", "a", "1").await.unwrap();
        assert!(other.hexists("m", "a").await.unwrap());
    }
}
