//! In-process cache backend.
//!
//! Only shares state within one process, so it cannot coordinate counters
//! across replicas. Used for single-node runs and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use video_balancer_types::CacheError;

use super::{CacheBackend, CacheResult};

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> CacheResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn incr(&self, key: &str) -> CacheResult<i64> {
        // The entry guard holds the shard lock, so concurrent increments serialize.
        let mut entry = self.entries.entry(key.to_string()).or_insert_with(|| "0".to_string());
        let current: i64 = entry.value().parse().map_err(|_| {
            CacheError::unavailable(format!("value at {} is not an integer", key))
        })?;
        let next = current.saturating_add(1);
        *entry.value_mut() = next.to_string();
        Ok(next)
    }

    async fn del(&self, key: &str) -> CacheResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        Ok(())
    }
}
