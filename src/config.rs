//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::{validate_capacity, DEFAULT_CAPACITY, DEFAULT_NAMESPACE};
use crate::error::{CacheError, Result};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries each backend holds
    pub capacity: usize,
    /// Redis host for the shared backend
    pub redis_host: String,
    /// Redis port for the shared backend
    pub redis_port: u16,
    /// Prefix for the Redis keys used by the shared backend
    pub redis_namespace: String,
    /// Upper bound on each Redis command, in milliseconds
    pub redis_timeout_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Entries per backend (default: 256, must be > 0)
    /// - `REDIS_HOST` - Redis host (default: localhost)
    /// - `REDIS_PORT` - Redis port (default: 6379)
    /// - `REDIS_NAMESPACE` - Redis key prefix (default: lru)
    /// - `REDIS_TIMEOUT_MS` - Per-command timeout (default: 500)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    ///
    /// A malformed or non-positive `CACHE_CAPACITY` is an error rather than
    /// a silent fallback.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let capacity = match env::var("CACHE_CAPACITY") {
            Ok(raw) => {
                let parsed: i64 = raw.trim().parse().map_err(|_| {
                    CacheError::InvalidConfiguration(format!(
                        "CACHE_CAPACITY must be an integer, got {raw:?}"
                    ))
                })?;
                validate_capacity(parsed)?
            }
            Err(_) => defaults.capacity,
        };

        Ok(Self {
            capacity,
            redis_host: env::var("REDIS_HOST").unwrap_or(defaults.redis_host),
            redis_port: env::var("REDIS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.redis_port),
            redis_namespace: env::var("REDIS_NAMESPACE").unwrap_or(defaults.redis_namespace),
            redis_timeout_ms: env::var("REDIS_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.redis_timeout_ms),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        })
    }

    /// Connection URL for the shared backend.
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.redis_host, self.redis_port)
    }

    /// Per-command timeout for the shared backend.
    pub fn redis_timeout(&self) -> Duration {
        Duration::from_millis(self.redis_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            redis_host: "localhost".to_string(),
            redis_port: 6379,
            redis_namespace: DEFAULT_NAMESPACE.to_string(),
            redis_timeout_ms: 500,
            server_port: 8000,
        }
    }
}
