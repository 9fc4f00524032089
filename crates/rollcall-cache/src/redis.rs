//! Redis session cache.
//!
//! Every operation is bounded by the configured timeout; a slow or
//! unreachable Redis surfaces as a [`CacheError`] so callers fail closed.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use rollcall_auth::{CacheError, SessionCache};
use tracing::{debug, error, instrument};

use crate::config::CacheConfig;

/// Redis cache client with connection pooling.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    config: CacheConfig,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("key_prefix", &self.config.key_prefix)
            .field("op_timeout", &self.config.op_timeout)
            .finish_non_exhaustive()
    }
}

impl RedisCache {
    /// Creates a new Redis cache client.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Backend` if the URL is invalid or the first
    /// connection cannot be established within the operation timeout.
    pub async fn new(config: CacheConfig) -> Result<Self, CacheError> {
        let client = Client::open(config.redis_url.as_str()).map_err(backend_error)?;
        let conn = bounded(config.op_timeout, ConnectionManager::new(client)).await?;

        Ok(Self { conn, config })
    }
}

#[async_trait]
impl SessionCache for RedisCache {
    #[instrument(skip(self, value), fields(cache.operation = "SETEX"))]
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let key = self.config.prefixed_key(key);
        let seconds = ttl.as_secs().max(1);

        bounded(
            self.config.op_timeout,
            conn.set_ex::<_, _, ()>(&key, value, seconds),
        )
        .await?;

        debug!(cache.key = %key, cache.ttl_secs = %seconds, "Session stored");
        Ok(())
    }

    #[instrument(skip(self), fields(cache.operation = "GET"))]
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let key = self.config.prefixed_key(key);

        let value = bounded(
            self.config.op_timeout,
            conn.get::<_, Option<String>>(&key),
        )
        .await?;

        debug!(cache.key = %key, cache.hit = value.is_some(), "Session lookup");
        Ok(value)
    }

    #[instrument(skip(self), fields(cache.operation = "DEL"))]
    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let key = self.config.prefixed_key(key);

        bounded(self.config.op_timeout, conn.del::<_, ()>(&key)).await?;

        debug!(cache.key = %key, "Session removed");
        Ok(())
    }
}

/// Awaits a Redis call, failing once `limit` elapses.
async fn bounded<T, F>(limit: Duration, fut: F) -> Result<T, CacheError>
where
    F: Future<Output = Result<T, RedisError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(backend_error),
        Err(_) => {
            error!(timeout_ms = %limit.as_millis(), "Redis operation timed out");
            Err(CacheError::Timeout)
        }
    }
}

fn backend_error(e: RedisError) -> CacheError {
    error!(error = %e, "Redis error");
    CacheError::Backend(e.to_string())
}
