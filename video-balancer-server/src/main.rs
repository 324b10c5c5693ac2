//! Video Balancer Server
//!
//! HTTP daemon that:
//! - Redirects `GET /?video_url=...` to the CDN or back to the origin
//! - Exposes admin endpoints for CDN settings (/cdn) and origin servers (/origin)
//!
//! Access via: http://localhost:8000

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod router;
mod server_utils;
mod state;
#[cfg(test)]
mod test_helpers;

use cli::{CacheKind, Cli};
use state::AppState;
use video_balancer_core::cache::CacheBackend;
use video_balancer_core::modules::{
    database, MemoryOriginServerRepository, MemorySettingsRepository,
    PostgresOriginServerRepository, PostgresSettingsRepository,
};
use video_balancer_core::{MemoryCache, OriginServerRepository, RedisCache, SettingsRepository};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Video balancer starting on {}:{}...", cli.host, cli.port);

    let (cache, redis): (Arc<dyn CacheBackend>, Option<RedisCache>) = match cli.cache {
        CacheKind::Redis => {
            let redis = RedisCache::connect(&cli.redis_config())
                .await
                .context("Failed to connect to Redis")?;
            redis.ping().await.context("Redis did not answer PING")?;
            (Arc::new(redis.clone()), Some(redis))
        },
        CacheKind::Memory => {
            warn!("Using process-local cache, request counters are not shared between replicas");
            (Arc::new(MemoryCache::new()), None)
        },
    };

    let (settings, origins, pool): (
        Arc<dyn SettingsRepository>,
        Arc<dyn OriginServerRepository>,
        _,
    ) = match cli.database_config() {
        Some(config) => {
            let pool = database::connect(&config).await.context("Failed to connect to database")?;
            database::run_migrations(&pool).await.context("Failed to run migrations")?;
            (
                Arc::new(PostgresSettingsRepository::new(pool.clone())),
                Arc::new(PostgresOriginServerRepository::new(pool.clone())),
                Some(pool),
            )
        },
        None => {
            warn!("No database configured, settings and origins are kept in memory");
            (
                Arc::new(MemorySettingsRepository::new()),
                Arc::new(MemoryOriginServerRepository::new()),
                None,
            )
        },
    };

    if cli.seed && database::seed(settings.as_ref(), origins.as_ref()).await? {
        info!("Initial data seeded");
    }

    let state = AppState::new(settings, origins, cache, pool.clone());
    info!("Application state initialized");

    let app = router::build_router(state);

    let ip: std::net::IpAddr = cli
        .host
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", cli.host))?;
    let addr = SocketAddr::new(ip, cli.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    if let Some(redis) = redis {
        redis.close().await;
    }
    if let Some(pool) = pool {
        pool.close().await;
    }
    info!("Server stopped");

    Ok(())
}
