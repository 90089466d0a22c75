//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::backend::Backend;
use crate::cache::{LruCache, RedisStore, SharedLruCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, BackendQuery, GetResponse, HealthResponse, PutRequest, PutResponse,
};

/// Application state shared across all handlers.
///
/// The local cache sits behind one mutex so `get` and `put` are serialized.
/// The shared cache is `None` when Redis could not be reached at startup.
#[derive(Clone)]
pub struct AppState {
    /// In-process cache
    pub local: Arc<Mutex<LruCache<String, Value>>>,
    /// Redis-backed cache, if connected
    pub shared: Option<SharedLruCache>,
}

impl AppState {
    /// Creates a new AppState from already constructed backends.
    pub fn new(local: LruCache<String, Value>, shared: Option<SharedLruCache>) -> Self {
        Self {
            local: Arc::new(Mutex::new(local)),
            shared,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// An unreachable Redis leaves the shared backend unavailable instead of
    /// failing startup; an invalid capacity does fail.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let local = LruCache::new(config.capacity)?;

        let url = config.redis_url();
        let shared = match RedisStore::connect(&url, config.redis_timeout()).await {
            Ok(store) => Some(SharedLruCache::new(
                Arc::new(store),
                &config.redis_namespace,
                config.capacity,
            )?),
            Err(err) => {
                warn!(%url, error = %err, "redis backend unavailable");
                None
            }
        };
        info!(
            capacity = config.capacity,
            redis = shared.is_some(),
            "cache backends initialized"
        );

        Ok(Self::new(local, shared))
    }

    /// Returns the shared cache, or `BackendUnavailable` if it never connected.
    pub fn shared(&self) -> Result<&SharedLruCache> {
        self.shared
            .as_ref()
            .ok_or_else(|| CacheError::BackendUnavailable("redis is not connected".to_string()))
    }
}

/// Handler for GET /cache/:key
///
/// Retrieves a value from the selected backend.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<BackendQuery>,
) -> Result<Json<GetResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let value = match query.backend {
        // Lock is exclusive: a hit reorders recency
        Backend::Local => state.local.lock().await.get(&key)?.clone(),
        Backend::Shared => state.shared()?.get(&key).await?,
    };

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for PUT /cache/:key
///
/// Stores a value in the selected backend.
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<BackendQuery>,
    Json(req): Json<PutRequest>,
) -> Result<Json<PutResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    match query.backend {
        Backend::Local => {
            let mut cache = state.local.lock().await;
            cache.put(key.clone(), req.value);
        }
        Backend::Shared => {
            state.shared()?.put(&key, &req.value).await?;
        }
    }

    Ok(Json(PutResponse::ok(query.backend, key)))
}

/// Handler for GET /health
///
/// Reports whether the shared backend currently answers.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let redis = match &state.shared {
        Some(shared) => shared.ping().await.is_ok(),
        None => false,
    };
    Json(HealthResponse::healthy(redis))
}
