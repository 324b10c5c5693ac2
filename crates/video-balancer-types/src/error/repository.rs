//! Repository errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CacheError;

pub type RepoResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Record already exists: {0}")]
    AlreadyExists(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Write-through to the cache failed after the durable write committed
    #[error(transparent)]
    Cache(#[from] CacheError),
}
