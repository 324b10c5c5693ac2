//! Test helpers for video-balancer-server unit tests.

use std::sync::Arc;

use axum_test::TestServer;
use video_balancer_core::cache::CacheBackend;
use video_balancer_core::modules::{MemoryOriginServerRepository, MemorySettingsRepository};
use video_balancer_core::MemoryCache;
use video_balancer_types::RoutingSettings;

use crate::router::build_router;
use crate::state::AppState;

/// `AppState` over in-memory stores and cache, optionally preconfigured.
pub fn test_app_state(settings: Option<RoutingSettings>) -> AppState {
    test_app_state_with_cache(settings, Arc::new(MemoryCache::new()))
}

pub fn test_app_state_with_cache(
    settings: Option<RoutingSettings>,
    cache: Arc<dyn CacheBackend>,
) -> AppState {
    let durable_settings = match settings {
        Some(s) => MemorySettingsRepository::with_settings(s),
        None => MemorySettingsRepository::new(),
    };
    AppState::new(
        Arc::new(durable_settings),
        Arc::new(MemoryOriginServerRepository::new()),
        cache,
        None,
    )
}

#[allow(clippy::expect_used, reason = "test setup")]
pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).expect("failed to start test server")
}
