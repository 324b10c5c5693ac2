//! PostgreSQL pool setup, migrations and seed data.

pub use sqlx::postgres::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;
use video_balancer_types::{OriginServer, RepoResult, RepositoryError, RoutingSettings};

use crate::modules::pg_helpers::map_sqlx_err;
use crate::modules::repository::{OriginServerRepository, SettingsRepository};

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    /// Extra connections allowed on top of `pool_size` under load
    pub pool_overflow: u32,
}

impl DatabaseConfig {
    pub fn url_from_parts(
        user: &str,
        password: &str,
        host: &str,
        port: u16,
        database: &str,
    ) -> String {
        format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, database)
    }
}

/// Open the pool and verify the connection with `SELECT 1`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.pool_size.saturating_add(config.pool_overflow).max(1))
        .min_connections(config.pool_size.min(2))
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(300))
        .test_before_acquire(true)
        .connect(&config.url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    info!(
        max_connections = config.pool_size.saturating_add(config.pool_overflow),
        "PostgreSQL pool ready"
    );
    Ok(pool)
}

/// Run the embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> RepoResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|err| RepositoryError::Database(err.to_string()))
}

/// Round-trip a trivial query; used by `/health`.
pub async fn ping(pool: &PgPool) -> RepoResult<()> {
    sqlx::query("SELECT 1").execute(pool).await.map_err(map_sqlx_err)?;
    Ok(())
}

/// Insert one CDN configuration and a few origins, unless settings already exist.
///
/// Returns `true` when data was written.
pub async fn seed(
    settings: &dyn SettingsRepository,
    origins: &dyn OriginServerRepository,
) -> RepoResult<bool> {
    if settings.read().await?.is_some() {
        return Ok(false);
    }

    settings
        .create(&RoutingSettings { host: "cdn.provider.com".to_string(), ratio: 30 })
        .await?;

    for (name, ratio) in [("s1", 20), ("s2", 50), ("s3", 30)] {
        match origins.create(&OriginServer::new(name, Some(ratio))).await {
            Ok(_) | Err(RepositoryError::AlreadyExists(_)) => {},
            Err(e) => return Err(e),
        }
    }

    info!("Seeded initial CDN settings and origin servers");
    Ok(true)
}
