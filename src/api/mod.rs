//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `GET /cache/:key` - Retrieve a value by key
//! - `PUT /cache/:key` - Store a value under a key
//! - `GET /health` - Health check endpoint
//!
//! Both cache endpoints take `?backend=memory|redis` (default `memory`).

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
