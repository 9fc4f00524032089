//! Session cache contract.
//!
//! The session cache records the single token currently valid for each
//! identity and is the only source of truth for revocation: a token whose
//! signature checks out is still rejected unless it equals the cached value.
//!
//! Adapters live in the `rollcall-cache` crate.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::claims::UserType;

/// Error type for session cache operations.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),

    #[error("cache operation timed out")]
    Timeout,

    #[error("cache backend unavailable")]
    Unavailable,
}

/// Key/value store with per-entry TTL and atomic per-key writes.
#[async_trait]
pub trait SessionCache: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Returns the value stored under `key`, `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// Cache key holding the current token for an identity.
pub fn session_key(user_type: UserType, user_id: &str) -> String {
    format!("token:{}:{}", user_type, user_id)
}
