//! URL and host-format errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while mapping a video URL onto its origin server.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum UrlError {
    /// The URL does not parse or carries no hostname
    #[error("Could not extract host from URL: {url}")]
    InvalidUrl { url: String },

    /// The hostname does not start with a `s<digits>.` server identifier
    #[error("Unrecognized host format: {host}")]
    UnrecognizedHostFormat { host: String },

    /// The URL holds bytes that cannot be sent back in a `Location` header
    #[error("URL contains characters not allowed in a redirect: {url}")]
    NotRedirectable { url: String },
}
