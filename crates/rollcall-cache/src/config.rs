//! Session cache configuration.
//!
//! This module provides configuration for the session cache backend
//! loaded from environment variables.

use std::env;
use std::time::Duration;

/// Which adapter backs the session cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionBackend {
    Redis,
    Memory,
}

/// Session cache configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `SESSION_BACKEND`: `redis` or `memory` (default: `redis`)
/// - `REDIS_URL`: Redis connection URL (default: `redis://127.0.0.1:6379`)
/// - `CACHE_PREFIX`: Prefix for all cache keys (default: `rollcall`)
/// - `CACHE_OP_TIMEOUT_MS`: Upper bound for a single cache call (default: `500`)
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub backend: SessionBackend,

    /// Redis connection URL.
    pub redis_url: String,

    /// Prefix for all cache keys to avoid collisions.
    pub key_prefix: String,

    /// A cache call that takes longer fails as unavailable.
    pub op_timeout: Duration,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            backend: match env::var("SESSION_BACKEND").as_deref() {
                Ok("memory") => SessionBackend::Memory,
                _ => SessionBackend::Redis,
            },
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            key_prefix: env::var("CACHE_PREFIX").unwrap_or(defaults.key_prefix),
            op_timeout: env::var("CACHE_OP_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.op_timeout),
        }
    }

    /// Build a prefixed cache key.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let key = config.prefixed_key("token:admin:1");
    /// // Returns "rollcall:token:admin:1"
    /// ```
    pub fn prefixed_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.key_prefix, key)
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::Redis,
            redis_url: "redis://127.0.0.1:6379".into(),
            key_prefix: "rollcall".into(),
            op_timeout: Duration::from_millis(500),
        }
    }
}
