//! Redis-backed recency store.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisResult};
use tracing::{info, warn};

use super::RecencyStore;
use crate::error::{CacheError, Result};

// == Redis Store ==
/// Store backed by a Redis server over a multiplexed, auto-reconnecting
/// connection. Every command is bounded by `timeout`.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    timeout: Duration,
}

impl RedisStore {
    // == Connect ==
    /// Opens a connection to `url` and verifies it with PING.
    ///
    /// Fails with `BackendUnavailable` if the server cannot be reached
    /// within `timeout`.
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = tokio::time::timeout(timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| {
                CacheError::BackendUnavailable(format!(
                    "timed out connecting to {url} after {timeout:?}"
                ))
            })??;

        let store = Self { conn, timeout };
        store.ping().await?;
        info!(url, "connected to redis");
        Ok(store)
    }

    /// Runs one command under the per-command timeout.
    async fn run<T>(&self, command: &str, fut: impl Future<Output = RedisResult<T>>) -> Result<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                warn!(command, error = %err, "redis command failed");
                Err(err.into())
            }
            Err(_) => {
                warn!(command, timeout = ?self.timeout, "redis command timed out");
                Err(CacheError::BackendUnavailable(format!(
                    "{command} timed out after {:?}",
                    self.timeout
                )))
            }
        }
    }
}

#[async_trait]
impl RecencyStore for RedisStore {
    async fn hexists(&self, map: &str, field: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        self.run("HEXISTS", conn.hexists(map, field)).await
    }

    async fn hget(&self, map: &str, field: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        self.run("HGET", conn.hget(map, field)).await
    }

    async fn hset(&self, map: &str, field: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        self.run("HSET", conn.hset(map, field, value)).await
    }

    async fn hdel(&self, map: &str, field: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        self.run("HDEL", conn.hdel(map, field)).await
    }

    async fn lrem(&self, list: &str, member: &str) -> Result<usize> {
        let mut conn = self.conn.clone();
        self.run("LREM", conn.lrem(list, 0, member)).await
    }

    async fn lpush(&self, list: &str, member: &str) -> Result<usize> {
        let mut conn = self.conn.clone();
        self.run("LPUSH", conn.lpush(list, member)).await
    }

    async fn llen(&self, list: &str) -> Result<usize> {
        let mut conn = self.conn.clone();
        self.run("LLEN", conn.llen(list)).await
    }

    async fn rpop(&self, list: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        self.run("RPOP", conn.rpop(list, None)).await
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let cmd = redis::cmd("PING");
        let _pong: String = self.run("PING", cmd.query_async(&mut conn)).await?;
        Ok(())
    }
}
