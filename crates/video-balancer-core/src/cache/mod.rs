//! Shared cache backends.
//!
//! The cache holds disposable copies of configuration plus the request
//! counters. Implementations must keep "key absent" (`Ok(None)`) apart from
//! "backend unreachable" (`Err(CacheError::Unavailable)`); the repositories
//! and the strategy take different fallbacks for each.

mod memory;
mod redis;

pub use memory::MemoryCache;
pub use redis::{RedisCache, RedisCacheConfig};

use async_trait::async_trait;
use video_balancer_types::CacheError;

pub type CacheResult<T> = Result<T, CacheError>;

/// Key for the cached global routing settings.
pub const SETTINGS_KEY: &str = "CDN_SETTINGS";

/// Key for a cached origin server record.
pub fn origin_key(name: &str) -> String {
    format!("server: {}", name)
}

#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;
    async fn set(&self, key: &str, value: String) -> CacheResult<()>;
    /// Atomically increment an integer key, creating it at 0 first.
    async fn incr(&self, key: &str) -> CacheResult<i64>;
    async fn del(&self, key: &str) -> CacheResult<()>;
    async fn ping(&self) -> CacheResult<()>;
}
