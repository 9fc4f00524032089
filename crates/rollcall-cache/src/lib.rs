//! # Rollcall Cache
//!
//! Session cache adapters implementing [`rollcall_auth::SessionCache`].
//!
//! - [`RedisCache`]: shared Redis backend, the production default
//! - [`MemoryCache`]: process-local map for development and tests
//!
//! [`connect_session_cache`] picks one from a [`CacheConfig`].

pub mod config;
pub mod memory;
pub mod redis;

use std::sync::Arc;

use rollcall_auth::{CacheError, SessionCache};
use tracing::{info, warn};

pub use config::{CacheConfig, SessionBackend};
pub use memory::MemoryCache;
pub use self::redis::RedisCache;

/// Connects the session cache selected by `config`.
///
/// # Errors
///
/// Returns `CacheError` when the Redis backend is selected and unreachable.
pub async fn connect_session_cache(
    config: &CacheConfig,
) -> Result<Arc<dyn SessionCache>, CacheError> {
    match config.backend {
        SessionBackend::Redis => {
            let cache = RedisCache::new(config.clone()).await?;
            info!(redis_url = %config.redis_url, "Redis session cache connected");
            Ok(Arc::new(cache))
        }
        SessionBackend::Memory => {
            warn!("Using in-memory session cache; sessions are lost on restart");
            Ok(Arc::new(MemoryCache::new()))
        }
    }
}
