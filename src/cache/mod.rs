//! Cache Module
//!
//! Provides the two interchangeable LRU backends: the in-process
//! [`LruCache`] and the Redis-backed [`SharedLruCache`].

mod entry;
mod recency;
pub mod remote;
mod shared;
mod store;


use crate::error::{CacheError, Result};

// Re-export public types
pub use entry::Position;
pub use recency::RecencyList;
pub use remote::{MemoryStore, RecencyStore, RedisStore};
pub use shared::{SharedLruCache, DEFAULT_NAMESPACE};
pub use store::LruCache;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 256;

// == Capacity Validation ==
/// Converts a raw, possibly signed, capacity into a usable one.
///
/// Zero and negative values fail with `InvalidConfiguration`.
pub fn validate_capacity(raw: i64) -> Result<usize> {
    if raw <= 0 {
        return Err(CacheError::InvalidConfiguration(format!(
            "capacity must be greater than 0, got {raw}"
        )));
    }
    usize::try_from(raw)
        .map_err(|_| CacheError::InvalidConfiguration(format!("capacity {raw} is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_capacity() {
        assert_eq!(validate_capacity(1).unwrap(), 1);
        assert_eq!(validate_capacity(256).unwrap(), 256);
        assert!(matches!(
            validate_capacity(0),
            Err(CacheError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            validate_capacity(-3),
            Err(CacheError::InvalidConfiguration(_))
        ));
    }
}
