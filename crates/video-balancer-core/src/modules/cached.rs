//! Cache-aside repositories.
//!
//! Reads go cache first and fall through to the durable store on a miss or
//! on any cache error. A cache error marks the cache unhealthy for the rest
//! of that call only: the durable result is then returned without write-back.
//! Nothing is remembered between calls.
//!
//! Creates bypass the cache entirely. Updates write the durable store and
//! then write through to the cache; a failing cache write there is returned
//! to the caller.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};
use video_balancer_types::models::OriginServerRecord;
use video_balancer_types::{OriginServer, RepoResult, RepositoryError, RoutingSettings};

use crate::cache::{origin_key, CacheBackend, SETTINGS_KEY};
use crate::modules::repository::{OriginServerRepository, SettingsRepository};

async fn read_through<T, F, Fut>(
    cache: &dyn CacheBackend,
    key: &str,
    load: F,
) -> RepoResult<Option<T>>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = RepoResult<Option<T>>>,
{
    let mut cache_healthy = true;

    match cache.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key, "cache hit");
                return Ok(Some(value));
            },
            Err(e) => warn!(key, error = %e, "Discarding undecodable cache entry"),
        },
        Ok(None) => debug!(key, "cache miss"),
        Err(e) => {
            warn!(key, error = %e, "Cache read failed, falling back to durable store");
            cache_healthy = false;
        },
    }

    let loaded = load().await?;

    if cache_healthy {
        if let Some(value) = &loaded {
            write_back(cache, key, value).await;
        }
    }

    Ok(loaded)
}

// Write-back is an optimisation; failures are logged and dropped.
async fn write_back<T: Serialize>(cache: &dyn CacheBackend, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(key, error = %e, "Could not encode value for cache");
            return;
        },
    };
    if let Err(e) = cache.set(key, raw).await {
        warn!(key, error = %e, "Cache write-back failed");
    }
}

async fn write_through<T: Serialize>(
    cache: &dyn CacheBackend,
    key: &str,
    value: &T,
) -> RepoResult<()> {
    let raw = serde_json::to_string(value)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    cache.set(key, raw).await?;
    Ok(())
}

/// Settings repository with a cache in front of a durable store.
pub struct CachedSettingsRepository {
    persistent: Arc<dyn SettingsRepository>,
    cache: Arc<dyn CacheBackend>,
}

impl CachedSettingsRepository {
    pub fn new(persistent: Arc<dyn SettingsRepository>, cache: Arc<dyn CacheBackend>) -> Self {
        Self { persistent, cache }
    }
}

#[async_trait]
impl SettingsRepository for CachedSettingsRepository {
    async fn create(&self, settings: &RoutingSettings) -> RepoResult<()> {
        self.persistent.create(settings).await
    }

    async fn read(&self) -> RepoResult<Option<RoutingSettings>> {
        read_through(self.cache.as_ref(), SETTINGS_KEY, || self.persistent.read()).await
    }

    async fn update(&self, settings: &RoutingSettings) -> RepoResult<()> {
        self.persistent.update(settings).await?;
        write_through(self.cache.as_ref(), SETTINGS_KEY, settings).await
    }
}

/// Origin repository caching lookups by server name.
pub struct CachedOriginServerRepository {
    persistent: Arc<dyn OriginServerRepository>,
    cache: Arc<dyn CacheBackend>,
}

impl CachedOriginServerRepository {
    pub fn new(
        persistent: Arc<dyn OriginServerRepository>,
        cache: Arc<dyn CacheBackend>,
    ) -> Self {
        Self { persistent, cache }
    }
}

#[async_trait]
impl OriginServerRepository for CachedOriginServerRepository {
    async fn create(&self, server: &OriginServer) -> RepoResult<i64> {
        self.persistent.create(server).await
    }

    async fn read_by_name(&self, name: &str) -> RepoResult<Option<OriginServer>> {
        let key = origin_key(name);
        read_through(self.cache.as_ref(), &key, || self.persistent.read_by_name(name)).await
    }

    async fn read_by_id(&self, id: i64) -> RepoResult<Option<OriginServerRecord>> {
        self.persistent.read_by_id(id).await
    }

    async fn update(&self, id: i64, server: &OriginServer) -> RepoResult<()> {
        let previous = self.persistent.read_by_id(id).await?;
        self.persistent.update(id, server).await?;
        write_through(self.cache.as_ref(), &origin_key(&server.name), server).await?;

        // A rename leaves the old name's entry behind; drop it.
        if let Some(previous) = previous.filter(|p| p.server.name != server.name) {
            self.cache.del(&origin_key(&previous.server.name)).await?;
        }
        Ok(())
    }
}
