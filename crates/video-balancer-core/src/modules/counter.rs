//! Shared request counter.
//!
//! Counters live only in the cache. The cache's atomic `INCR` is the sole
//! source of ordering; the application never reads, adds and writes back.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use video_balancer_types::CacheError;

use crate::cache::CacheBackend;

const COUNTER_KEY: &str = "cdn_request_counter";

/// Which counter an increment applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CounterScope {
    Global,
    /// Counter of an origin server that carries its own ratio
    Origin(String),
}

impl CounterScope {
    pub fn key(&self) -> String {
        match self {
            Self::Global => COUNTER_KEY.to_string(),
            Self::Origin(name) => format!("{}:{}", COUNTER_KEY, name),
        }
    }
}

impl fmt::Display for CounterScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Origin(name) => write!(f, "origin:{}", name),
        }
    }
}

#[async_trait]
pub trait RequestCounter: Send + Sync {
    /// Increment and return the new value; errors are never swallowed here.
    async fn increment(&self, scope: &CounterScope) -> Result<u64, CacheError>;
    async fn reset(&self, scope: &CounterScope) -> Result<(), CacheError>;
}

/// Counter backed by the cache's atomic increment.
pub struct CacheRequestCounter {
    cache: Arc<dyn CacheBackend>,
}

impl CacheRequestCounter {
    pub fn new(cache: Arc<dyn CacheBackend>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl RequestCounter for CacheRequestCounter {
    async fn increment(&self, scope: &CounterScope) -> Result<u64, CacheError> {
        let value = self.cache.incr(&scope.key()).await?;
        u64::try_from(value)
            .map_err(|_| CacheError::unavailable(format!("counter {} went negative: {}", scope, value)))
    }

    async fn reset(&self, scope: &CounterScope) -> Result<(), CacheError> {
        self.cache.del(&scope.key()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::testing::FailingCache;

    #[tokio::test]
    async fn test_increment_is_strictly_increasing() {
        let counter = CacheRequestCounter::new(Arc::new(MemoryCache::new()));
        let mut last = 0;
        for _ in 0..10 {
            let value = counter.increment(&CounterScope::Global).await.unwrap();
            assert!(value > last);
            last = value;
        }
        assert_eq!(last, 10);
    }

    #[tokio::test]
    async fn test_scopes_are_independent() {
        let counter = CacheRequestCounter::new(Arc::new(MemoryCache::new()));
        let s1 = CounterScope::Origin("s1".to_string());

        counter.increment(&CounterScope::Global).await.unwrap();
        counter.increment(&CounterScope::Global).await.unwrap();
        assert_eq!(counter.increment(&s1).await.unwrap(), 1);
        assert_eq!(counter.increment(&CounterScope::Global).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_reset_restarts_scope() {
        let counter = CacheRequestCounter::new(Arc::new(MemoryCache::new()));
        let scope = CounterScope::Origin("s2".to_string());
        counter.increment(&scope).await.unwrap();
        counter.increment(&scope).await.unwrap();

        counter.reset(&scope).await.unwrap();
        assert_eq!(counter.increment(&scope).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failure_propagates() {
        let counter = CacheRequestCounter::new(Arc::new(FailingCache));
        assert!(matches!(
            counter.increment(&CounterScope::Global).await,
            Err(CacheError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_keys() {
        assert_eq!(CounterScope::Global.key(), "cdn_request_counter");
        assert_eq!(CounterScope::Origin("s9".to_string()).key(), "cdn_request_counter:s9");
    }
}
