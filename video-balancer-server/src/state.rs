//! Application State
//!
//! Composes the cache, the durable stores and the balancer into one shared
//! handle. Backends are passed in explicitly so tests can swap them.

use std::sync::Arc;

use video_balancer_core::cache::CacheBackend;
use video_balancer_core::modules::database::PgPool;
use video_balancer_core::modules::{CachedOriginServerRepository, CachedSettingsRepository};
use video_balancer_core::{
    BalancerService, CacheRequestCounter, NthRequestStrategy, OriginServerRepository,
    SettingsRepository,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub balancer: BalancerService,
    pub settings: Arc<dyn SettingsRepository>,
    pub origins: Arc<dyn OriginServerRepository>,
    pub cache: Arc<dyn CacheBackend>,
    /// `None` when running on the in-memory stores
    pub database: Option<PgPool>,
}

impl AppState {
    /// Wrap the durable stores with the cache and build the balancer on top.
    pub fn new(
        durable_settings: Arc<dyn SettingsRepository>,
        durable_origins: Arc<dyn OriginServerRepository>,
        cache: Arc<dyn CacheBackend>,
        database: Option<PgPool>,
    ) -> Self {
        let settings: Arc<dyn SettingsRepository> =
            Arc::new(CachedSettingsRepository::new(durable_settings, Arc::clone(&cache)));
        let origins: Arc<dyn OriginServerRepository> =
            Arc::new(CachedOriginServerRepository::new(durable_origins, Arc::clone(&cache)));
        let counter = Arc::new(CacheRequestCounter::new(Arc::clone(&cache)));

        let strategy = NthRequestStrategy::new(Arc::clone(&settings), counter)
            .with_origin_overrides(Arc::clone(&origins));

        Self {
            inner: Arc::new(AppStateInner {
                balancer: BalancerService::new(Arc::new(strategy)),
                settings,
                origins,
                cache,
                database,
            }),
        }
    }

    pub fn balancer(&self) -> &BalancerService {
        &self.inner.balancer
    }

    pub fn settings(&self) -> &Arc<dyn SettingsRepository> {
        &self.inner.settings
    }

    pub fn origins(&self) -> &Arc<dyn OriginServerRepository> {
        &self.inner.origins
    }

    pub fn cache(&self) -> &Arc<dyn CacheBackend> {
        &self.inner.cache
    }

    pub fn database(&self) -> Option<&PgPool> {
        self.inner.database.as_ref()
    }
}
