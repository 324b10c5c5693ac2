//! Global CDN routing configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The single active routing configuration.
///
/// `host` is the CDN edge host clients get redirected to; every `ratio`-th
/// request goes to origin instead. A ratio of 1 sends everything to origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RoutingSettings {
    #[validate(length(min = 1, message = "host must not be empty"))]
    pub host: String,
    #[validate(range(min = 1, message = "ratio must be at least 1"))]
    pub ratio: u32,
}

impl RoutingSettings {
    /// Build settings, rejecting an empty host or a zero ratio.
    pub fn new(host: impl Into<String>, ratio: u32) -> Option<Self> {
        let settings = Self { host: host.into(), ratio };
        settings.validate().ok().map(|()| settings)
    }
}
