//! Origin server records with optional per-server ratio override.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Origin server as submitted by the admin API and cached by name.
///
/// `name` is the server identifier extracted from video hostnames (`s12`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OriginServer {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 1, message = "ratio must be at least 1"))]
    #[serde(default)]
    pub ratio: Option<u32>,
}

impl OriginServer {
    pub fn new(name: impl Into<String>, ratio: Option<u32>) -> Self {
        Self { name: name.into(), ratio }
    }
}

/// Durable origin row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginServerRecord {
    pub id: i64,
    #[serde(flatten)]
    pub server: OriginServer,
}
