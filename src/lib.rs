//! LRU Cache Server - a fixed-capacity key/value cache over HTTP
//!
//! Serves two interchangeable LRU backends: an O(1) in-process cache and an
//! approximate LRU shared through Redis.

pub mod api;
pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use backend::Backend;
pub use config::Config;
pub use error::{CacheError, Result};
