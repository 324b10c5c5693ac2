//! Domain models.

mod origin;
mod settings;
mod target;

pub use origin::{OriginServer, OriginServerRecord};
pub use settings::RoutingSettings;
pub use target::{ResourceKind, TargetResource};
