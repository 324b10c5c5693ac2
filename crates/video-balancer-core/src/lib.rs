//! # Video Balancer Core
//!
//! Routing decision logic for the video traffic balancer.
//!
//! ```text
//! video-balancer-core/src/
//! ├── utils/      # host parser + CDN URL builder (pure)
//! ├── cache/      # CacheBackend trait, fred-backed Redis client, in-memory cache
//! ├── modules/    # repositories (Postgres, in-memory, cache-aside), request counter
//! └── balancer/   # NthRequestStrategy + BalancerService
//! ```
//!
//! Every backend sits behind a trait so the strategy can be composed with
//! real stores in the server and with fakes in tests.

#![allow(
    clippy::significant_drop_tightening,
    reason = "DashMap guards are dropped at end of statement"
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod balancer;
pub mod cache;
pub mod modules;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use balancer::{BalancerService, BalancingStrategy, NthRequestStrategy};
pub use cache::{CacheBackend, MemoryCache, RedisCache};
pub use modules::counter::{CacheRequestCounter, CounterScope, RequestCounter};
pub use modules::repository::{OriginServerRepository, SettingsRepository};
pub use video_balancer_types as types;
