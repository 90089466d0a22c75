//! Backend Selection
//!
//! Identifies which of the two cache implementations serves a request.

use std::fmt;

use serde::{Deserialize, Serialize};

// == Backend ==
/// One of the two interchangeable cache implementations.
///
/// Selected per request; picking one never touches the other's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Backend {
    /// In-process [`LruCache`](crate::cache::LruCache)
    #[default]
    #[serde(rename = "memory", alias = "local")]
    Local,
    /// Redis-backed [`SharedLruCache`](crate::cache::SharedLruCache)
    #[serde(rename = "redis", alias = "shared")]
    Shared,
}

impl Backend {
    /// Wire name, as accepted in the `backend` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Local => "memory",
            Backend::Shared => "redis",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
