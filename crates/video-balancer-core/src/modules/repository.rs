//! Repository traits for storage abstraction.

use async_trait::async_trait;
use video_balancer_types::models::OriginServerRecord;
use video_balancer_types::{OriginServer, RepoResult, RoutingSettings};

/// Store for the singleton routing configuration.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn create(&self, settings: &RoutingSettings) -> RepoResult<()>;
    async fn read(&self) -> RepoResult<Option<RoutingSettings>>;
    /// Last write wins; there is no optimistic locking on the settings row.
    async fn update(&self, settings: &RoutingSettings) -> RepoResult<()>;
}

/// Store for origin servers and their optional ratio override.
#[async_trait]
pub trait OriginServerRepository: Send + Sync {
    /// Insert a new origin and return its id.
    async fn create(&self, server: &OriginServer) -> RepoResult<i64>;
    async fn read_by_name(&self, name: &str) -> RepoResult<Option<OriginServer>>;
    async fn read_by_id(&self, id: i64) -> RepoResult<Option<OriginServerRecord>>;
    async fn update(&self, id: i64, server: &OriginServer) -> RepoResult<()>;
}
