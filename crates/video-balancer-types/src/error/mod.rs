//! Typed error definitions for the balancer.
//!
//! Each backend gets its own error enum so callers can match on the failure
//! class that drives fallback policy:
//!
//! - [`UrlError`] - the video URL cannot be mapped onto the CDN
//! - [`CacheError`] - the shared cache backend did not answer
//! - [`RepositoryError`] - the durable store failed or rejected a write
//! - [`BalancerError`] - everything that can leave the balancing strategy

mod balancer;
mod cache;
mod repository;
mod url;

pub use balancer::BalancerError;
pub use cache::CacheError;
pub use repository::{RepoResult, RepositoryError};
pub use url::UrlError;
