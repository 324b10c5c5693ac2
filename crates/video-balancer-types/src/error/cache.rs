//! Cache backend errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the shared cache backend.
///
/// A missing key is never an error; backends report it as `Ok(None)`.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum CacheError {
    /// Backend unreachable, timed out or returned a protocol error
    #[error("Cache unavailable: {message}")]
    Unavailable { message: String },
}

impl CacheError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable { message: message.into() }
    }
}
