use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use thiserror::Error;

use crate::config::CacheConfig;

mod memory;
mod redis_store;

pub use memory::MemoryCache;
pub use redis_store::RedisCache;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Key/value store with per-entry expiry used in front of the database.
///
/// `get` distinguishes a miss (`Ok(None)`) from a present value, including
/// an empty one.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    async fn del(&self, keys: &[&str]) -> Result<(), CacheError>;
}

pub fn menu_key(tenant_code: &str) -> String {
    format!("menu:tenant:{tenant_code}")
}

/// Build the configured backend. Redis when `redis_url` is set, otherwise the
/// in-process cache; `None` when caching is turned off.
pub async fn from_config(config: &CacheConfig) -> Result<Option<Arc<dyn Cache>>, CacheError> {
    if !config.enabled {
        return Ok(None);
    }
    match config.redis_url.as_deref() {
        Some(url) => {
            let cache = RedisCache::connect(url).await?;
            tracing::info!("menu cache backed by redis");
            Ok(Some(Arc::new(cache)))
        }
        None => {
            tracing::warn!("REDIS_URL not set, menu cache is local to this process");
            Ok(Some(Arc::new(MemoryCache::new())))
        }
    }
}
