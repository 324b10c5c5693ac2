//! # Video Balancer Types
//!
//! Core models and error definitions for the video traffic balancer.
//!
//! - **`error`** - Typed errors for URL parsing, cache, repositories and balancing
//! - **`models`** - Routing settings, origin servers, redirect targets
//!
//! ## Architecture Role
//!
//! `video-balancer-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!          video-balancer-types (this crate)
//!                        │
//!                        ▼
//!               video-balancer-core
//!                        │
//!                        ▼
//!              video-balancer-server
//! ```

pub mod error;
pub mod models;

pub use error::{BalancerError, CacheError, RepoResult, RepositoryError, UrlError};
pub use models::{OriginServer, OriginServerRecord, ResourceKind, RoutingSettings, TargetResource};
