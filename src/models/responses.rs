//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::backend::Backend;

/// Response body for GET /cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for PUT /cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    /// Always "ok"
    pub status: String,
    /// Backend that stored the value
    pub backend: Backend,
    /// The key that was set
    pub key: String,
}

impl PutResponse {
    /// Creates a new PutResponse
    pub fn ok(backend: Backend, key: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            backend,
            key: key.into(),
        }
    }
}

/// Availability of each backend
#[derive(Debug, Clone, Serialize)]
pub struct BackendHealth {
    pub memory: bool,
    pub redis: bool,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Per-backend availability
    pub backends: BackendHealth,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(redis: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            backends: BackendHealth {
                memory: true,
                redis,
            },
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
