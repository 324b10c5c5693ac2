//! Redis/Valkey cache backend built on the `fred` client.

use async_trait::async_trait;
use fred::prelude::{Client, ClientLike, Config, KeysInterface, ReconnectPolicy};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};
use video_balancer_types::CacheError;

use super::{CacheBackend, CacheResult};

#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    pub url: String,
    /// Upper bound for every single command, connection waits included
    pub command_timeout: Duration,
}

impl RedisCacheConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), command_timeout: Duration::from_secs(2) }
    }

    pub fn from_host_port(host: &str, port: u16) -> Self {
        Self::new(format!("redis://{}:{}", host, port))
    }
}

/// Cloneable handle around one shared `fred` client.
///
/// Built once at startup and handed to every repository and counter; call
/// [`RedisCache::close`] on shutdown.
#[derive(Clone)]
pub struct RedisCache {
    client: Client,
    command_timeout: Duration,
}

impl RedisCache {
    /// Connect and wait for the first successful connection.
    pub async fn connect(config: &RedisCacheConfig) -> CacheResult<Self> {
        let redis_config = Config::from_url(&config.url).map_err(unavailable)?;
        let policy = ReconnectPolicy::new_exponential(0, 100, 5_000, 2);
        let client = Client::new(redis_config, None, None, Some(policy));
        client.connect();
        tokio::time::timeout(config.command_timeout * 5, client.wait_for_connect())
            .await
            .map_err(|_| CacheError::unavailable(format!("timed out connecting to {}", config.url)))?
            .map_err(unavailable)?;

        info!(url = %config.url, "Redis cache connected");
        Ok(Self { client, command_timeout: config.command_timeout })
    }

    pub async fn close(&self) {
        if let Err(e) = self.client.quit().await {
            debug!(error = %e, "Redis quit failed");
        }
    }

    async fn bounded<T, E, F>(&self, op: &'static str, fut: F) -> CacheResult<T>
    where
        E: std::fmt::Display,
        F: Future<Output = Result<T, E>>,
    {
        match tokio::time::timeout(self.command_timeout, fut).await {
            Ok(result) => result.map_err(unavailable),
            Err(_) => Err(CacheError::unavailable(format!(
                "{} timed out after {:?}",
                op, self.command_timeout
            ))),
        }
    }
}

fn unavailable(err: impl std::fmt::Display) -> CacheError {
    CacheError::unavailable(err.to_string())
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.bounded("GET", self.client.get::<Option<String>, _>(key)).await
    }

    async fn set(&self, key: &str, value: String) -> CacheResult<()> {
        self.bounded("SET", self.client.set::<(), _, _>(key, value, None, None, false)).await
    }

    async fn incr(&self, key: &str) -> CacheResult<i64> {
        self.bounded("INCR", self.client.incr::<i64, _>(key)).await
    }

    async fn del(&self, key: &str) -> CacheResult<()> {
        self.bounded("DEL", self.client.del::<i64, _>(key)).await.map(|_| ())
    }

    async fn ping(&self) -> CacheResult<()> {
        self.bounded("PING", self.client.ping::<String>(None)).await.map(|_| ())
    }
}
