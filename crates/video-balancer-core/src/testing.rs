//! Test doubles for cache and repository backends.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use video_balancer_types::{CacheError, RepoResult, RepositoryError, RoutingSettings};

use crate::cache::{CacheBackend, CacheResult, MemoryCache};
use crate::modules::repository::SettingsRepository;

/// Cache whose backend is always down.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingCache;

fn down() -> CacheError {
    CacheError::unavailable("connection refused")
}

#[async_trait]
impl CacheBackend for FailingCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(down())
    }

    async fn set(&self, _key: &str, _value: String) -> CacheResult<()> {
        Err(down())
    }

    async fn incr(&self, _key: &str) -> CacheResult<i64> {
        Err(down())
    }

    async fn del(&self, _key: &str) -> CacheResult<()> {
        Err(down())
    }

    async fn ping(&self) -> CacheResult<()> {
        Err(down())
    }
}

/// In-memory cache with per-command failure switches.
#[derive(Debug, Default)]
pub struct FlakyCache {
    inner: MemoryCache,
    fail_gets: AtomicBool,
    fail_sets: AtomicBool,
    fail_incr: AtomicBool,
    sets: AtomicUsize,
}

impl FlakyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sets(&self, fail: bool) {
        self.fail_sets.store(fail, Ordering::SeqCst);
    }

    pub fn fail_incr(&self, fail: bool) {
        self.fail_incr.store(fail, Ordering::SeqCst);
    }

    /// Successful `set` calls so far.
    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheBackend for FlakyCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(down());
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> CacheResult<()> {
        if self.fail_sets.load(Ordering::SeqCst) {
            return Err(down());
        }
        self.inner.set(key, value).await?;
        self.sets.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn incr(&self, key: &str) -> CacheResult<i64> {
        if self.fail_incr.load(Ordering::SeqCst) {
            return Err(down());
        }
        self.inner.incr(key).await
    }

    async fn del(&self, key: &str) -> CacheResult<()> {
        self.inner.del(key).await
    }

    async fn ping(&self) -> CacheResult<()> {
        Ok(())
    }
}

/// Settings store that counts reads, optionally failing every call.
#[derive(Debug, Default)]
pub struct CountingSettingsRepository {
    settings: RwLock<Option<RoutingSettings>>,
    reads: AtomicUsize,
    broken: AtomicBool,
}

impl CountingSettingsRepository {
    pub fn new(settings: Option<RoutingSettings>) -> Self {
        Self { settings: RwLock::new(settings), ..Self::default() }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }

    fn check(&self) -> RepoResult<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for CountingSettingsRepository {
    async fn create(&self, settings: &RoutingSettings) -> RepoResult<()> {
        self.check()?;
        *self.settings.write().await = Some(settings.clone());
        Ok(())
    }

    async fn read(&self) -> RepoResult<Option<RoutingSettings>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.settings.read().await.clone())
    }

    async fn update(&self, settings: &RoutingSettings) -> RepoResult<()> {
        self.check()?;
        *self.settings.write().await = Some(settings.clone());
        Ok(())
    }
}
