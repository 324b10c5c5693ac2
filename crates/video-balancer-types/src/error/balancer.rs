//! Balancing errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CacheError, RepositoryError, UrlError};

/// Errors that can leave the balancing strategy.
///
/// URL errors and counter cache failures are normally absorbed into a
/// fallback target by the strategy; they only appear here when raised outside
/// a fallback-eligible path.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum BalancerError {
    /// No routing settings have been created yet
    #[error("CDN settings are not configured")]
    NotConfigured,

    #[error(transparent)]
    Url(#[from] UrlError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl BalancerError {
    /// Check if this error is caused by client input or state rather than a backend.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotConfigured
                | Self::Url(_)
                | Self::Repository(RepositoryError::NotFound(_) | RepositoryError::AlreadyExists(_))
        )
    }

    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NotConfigured | Self::Url(_) => 400,
            Self::Repository(RepositoryError::NotFound(_)) => 404,
            Self::Repository(RepositoryError::AlreadyExists(_)) => 400,
            Self::Cache(_) | Self::Repository(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_codes() {
        assert_eq!(BalancerError::NotConfigured.http_status_code(), 400);
        assert_eq!(
            BalancerError::Url(UrlError::InvalidUrl { url: "nope".to_string() })
                .http_status_code(),
            400
        );
        assert_eq!(
            BalancerError::Repository(RepositoryError::NotFound("origin 7".to_string()))
                .http_status_code(),
            404
        );
        assert_eq!(
            BalancerError::Cache(CacheError::unavailable("down")).http_status_code(),
            500
        );
    }

    #[test]
    fn test_is_client_error() {
        assert!(BalancerError::NotConfigured.is_client_error());
        assert!(BalancerError::Repository(RepositoryError::AlreadyExists("s1".to_string()))
            .is_client_error());
        assert!(!BalancerError::Repository(RepositoryError::Database("x".to_string()))
            .is_client_error());
        assert!(!BalancerError::Cache(CacheError::unavailable("down")).is_client_error());
    }

    #[test]
    fn test_client_errors_map_to_4xx() {
        let errors = [
            BalancerError::NotConfigured,
            BalancerError::Url(UrlError::UnrecognizedHostFormat { host: "h".to_string() }),
            BalancerError::Repository(RepositoryError::NotFound("x".to_string())),
            BalancerError::Repository(RepositoryError::AlreadyExists("x".to_string())),
            BalancerError::Repository(RepositoryError::Serialization("x".to_string())),
            BalancerError::Cache(CacheError::unavailable("down")),
        ];
        for err in errors {
            assert_eq!(err.is_client_error(), err.http_status_code() < 500, "{err}");
        }
    }
}
