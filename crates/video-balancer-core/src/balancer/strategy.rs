//! Every-Nth-request balancing strategy.
//!
//! Fallback policy:
//! - URL cannot be mapped to a server identifier: ORIGIN, URL unchanged.
//! - Counter backend unavailable: CDN, since the distribution mechanism
//!   itself is impaired.
//! - Anything else (no settings, durable store errors) propagates.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use video_balancer_types::{BalancerError, RoutingSettings, TargetResource};

use crate::modules::counter::{CounterScope, RequestCounter};
use crate::modules::repository::{OriginServerRepository, SettingsRepository};
use crate::utils::host::{cdn_url_for, parse_origin_url};

#[async_trait]
pub trait BalancingStrategy: Send + Sync {
    async fn get_target_resource(&self, video_url: &str) -> Result<TargetResource, BalancerError>;
}

/// Sends every `ratio`-th request to origin and the rest to the CDN.
pub struct NthRequestStrategy {
    settings: Arc<dyn SettingsRepository>,
    counter: Arc<dyn RequestCounter>,
    origins: Option<Arc<dyn OriginServerRepository>>,
}

impl NthRequestStrategy {
    pub fn new(settings: Arc<dyn SettingsRepository>, counter: Arc<dyn RequestCounter>) -> Self {
        Self { settings, counter, origins: None }
    }

    /// Let origin servers with their own ratio override the global one.
    pub fn with_origin_overrides(mut self, origins: Arc<dyn OriginServerRepository>) -> Self {
        self.origins = Some(origins);
        self
    }

    async fn resolve_ratio(
        &self,
        settings: &RoutingSettings,
        server_name: &str,
    ) -> Result<(u32, CounterScope), BalancerError> {
        if let Some(origins) = &self.origins {
            // A zero override (hand-edited cache entry) means no override.
            let ratio = origins
                .read_by_name(server_name)
                .await?
                .and_then(|s| s.ratio)
                .filter(|ratio| *ratio > 0);
            if let Some(ratio) = ratio {
                return Ok((ratio, CounterScope::Origin(server_name.to_string())));
            }
        }
        Ok((settings.ratio, CounterScope::Global))
    }
}

#[async_trait]
impl BalancingStrategy for NthRequestStrategy {
    async fn get_target_resource(&self, video_url: &str) -> Result<TargetResource, BalancerError> {
        let settings = self.settings.read().await?.ok_or(BalancerError::NotConfigured)?;

        let location = match parse_origin_url(video_url) {
            Ok(location) => location,
            Err(e) => {
                debug!(url = %video_url, error = %e, "Cannot build CDN URL, routing to origin");
                return Ok(TargetResource::origin(video_url));
            },
        };

        let (ratio, scope) = self.resolve_ratio(&settings, &location.server_name).await?;
        // A zero global ratio (hand-edited cache entry) is clamped to 1.
        let ratio = u64::from(ratio.max(1));
        let cdn_target = || TargetResource::cdn(cdn_url_for(&location, &settings.host));

        match self.counter.increment(&scope).await {
            Ok(count) if count % ratio == 0 => {
                debug!(count, ratio, %scope, "Routing request to origin");
                Ok(TargetResource::origin(video_url))
            },
            Ok(count) => {
                debug!(count, ratio, %scope, "Routing request to CDN");
                Ok(cdn_target())
            },
            Err(e) => {
                warn!(error = %e, %scope, "Request counter unavailable, routing to CDN");
                Ok(cdn_target())
            },
        }
    }
}
