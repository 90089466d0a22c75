//! Remote Store Module
//!
//! The shared cache talks to its store only through the commands below.
//! Each command is atomic on its own; nothing groups several of them.
//!
//! ```text
//! RecencyStore (async trait)
//!   ├── RedisStore   <- ConnectionManager, finite per-command timeout
//!   └── MemoryStore  <- in-process stand-in with fault injection
//! ```

mod memory;
mod redis_store;

use async_trait::async_trait;

use crate::error::Result;

pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

// == Recency Store ==
/// A field-map plus list store addressed by name, in Redis vocabulary.
///
/// Implementations must report any transport fault or timeout as
/// `CacheError::BackendUnavailable`. A clean "absent" answer is expressed
/// through the return value (`false`, `None`), never as an error.
#[async_trait]
pub trait RecencyStore: Send + Sync {
    /// HEXISTS: whether `field` is set in the field-map `map`.
    async fn hexists(&self, map: &str, field: &str) -> Result<bool>;

    /// HGET: the value stored under `field`, if any.
    async fn hget(&self, map: &str, field: &str) -> Result<Option<String>>;

    /// HSET: stores `value` under `field`, overwriting any previous value.
    async fn hset(&self, map: &str, field: &str, value: &str) -> Result<()>;

    /// HDEL: removes `field`; returns whether it was present.
    async fn hdel(&self, map: &str, field: &str) -> Result<bool>;

    /// LREM with count 0: removes every occurrence of `member` from `list`.
    async fn lrem(&self, list: &str, member: &str) -> Result<usize>;

    /// LPUSH: pushes `member` at the head; returns the new length.
    async fn lpush(&self, list: &str, member: &str) -> Result<usize>;

    /// LLEN: length of `list` (0 when it does not exist).
    async fn llen(&self, list: &str) -> Result<usize>;

    /// RPOP: pops the tail element of `list`, if any.
    async fn rpop(&self, list: &str) -> Result<Option<String>>;

    /// PING: fails with `BackendUnavailable` when the store is unreachable.
    async fn ping(&self) -> Result<()>;
}
