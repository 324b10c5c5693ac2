//! Per-request redirect decision.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    Cdn,
    Origin,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cdn => "CDN",
            Self::Origin => "ORIGIN",
        }
    }
}

/// Where the client gets redirected. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetResource {
    pub kind: ResourceKind,
    pub url: String,
}

impl TargetResource {
    pub fn cdn(url: impl Into<String>) -> Self {
        Self { kind: ResourceKind::Cdn, url: url.into() }
    }

    pub fn origin(url: impl Into<String>) -> Self {
        Self { kind: ResourceKind::Origin, url: url.into() }
    }
}
