//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use serde_json::Value;

use crate::backend::Backend;
use crate::cache::MAX_KEY_LENGTH;

/// Request body for PUT /cache/:key
///
/// The value may be any JSON document.
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// The value to store
    pub value: Value,
}

/// Query string shared by the cache endpoints (`?backend=memory|redis`)
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BackendQuery {
    /// Target backend, `memory` when omitted
    #[serde(default)]
    pub backend: Backend,
}

/// Validates a cache key taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}
