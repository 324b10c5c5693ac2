use clap::{Parser, ValueEnum};
use video_balancer_core::cache::RedisCacheConfig;
use video_balancer_core::modules::database::DatabaseConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheKind {
    /// Shared Redis/Valkey instance (required for multiple replicas)
    Redis,
    /// Process-local cache, counters are not shared
    Memory,
}

#[derive(Debug, Parser)]
#[command(
    name = "video-balancer",
    about = "Video Traffic Balancer - redirects video requests to CDN or origin",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[arg(long, env = "BALANCER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long, env = "BALANCER_PORT", default_value = "8000")]
    pub port: u16,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "BALANCER_CACHE", value_enum, default_value = "redis")]
    pub cache: CacheKind,

    #[arg(long, env = "REDIS_URL", help = "Overrides --redis-host/--redis-port")]
    pub redis_url: Option<String>,

    #[arg(long, env = "REDIS_HOST", default_value = "127.0.0.1")]
    pub redis_host: String,

    #[arg(long, env = "REDIS_PORT", default_value = "6379")]
    pub redis_port: u16,

    #[arg(long, env = "DATABASE_URL", help = "Overrides the DATABASE_* parts")]
    pub database_url: Option<String>,

    #[arg(long, env = "DATABASE_HOST")]
    pub database_host: Option<String>,

    #[arg(long, env = "DATABASE_PORT", default_value = "5432")]
    pub database_port: u16,

    #[arg(long, env = "DATABASE_NAME", default_value = "balancer")]
    pub database_name: String,

    #[arg(long, env = "DATABASE_USER", default_value = "postgres")]
    pub database_user: String,

    #[arg(long, env = "DATABASE_PASSWORD", default_value = "", hide_env_values = true)]
    pub database_password: String,

    #[arg(long, env = "DATABASE_POOL_SIZE", default_value = "100")]
    pub database_pool_size: u32,

    #[arg(long, env = "DATABASE_POOL_OVERFLOW", default_value = "25")]
    pub database_pool_overflow: u32,

    #[arg(long, env = "BALANCER_SEED", help = "Insert demo CDN settings and origins if empty")]
    pub seed: bool,
}

impl Cli {
    pub fn redis_config(&self) -> RedisCacheConfig {
        match &self.redis_url {
            Some(url) => RedisCacheConfig::new(url.clone()),
            None => RedisCacheConfig::from_host_port(&self.redis_host, self.redis_port),
        }
    }

    /// `None` when no database is configured at all.
    pub fn database_config(&self) -> Option<DatabaseConfig> {
        let url = match (&self.database_url, &self.database_host) {
            (Some(url), _) => url.clone(),
            (None, Some(host)) => DatabaseConfig::url_from_parts(
                &self.database_user,
                &self.database_password,
                host,
                self.database_port,
                &self.database_name,
            ),
            (None, None) => return None,
        };
        Some(DatabaseConfig {
            url,
            pool_size: self.database_pool_size,
            pool_overflow: self.database_pool_overflow,
        })
    }
}
