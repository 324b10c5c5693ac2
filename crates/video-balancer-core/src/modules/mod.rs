pub mod cached;
pub mod counter;
pub mod database;
pub mod memory;
pub mod origin_pg;
pub mod repository;
pub mod settings_pg;

mod pg_helpers;

pub use cached::{CachedOriginServerRepository, CachedSettingsRepository};
pub use memory::{MemoryOriginServerRepository, MemorySettingsRepository};
pub use origin_pg::PostgresOriginServerRepository;
pub use settings_pg::PostgresSettingsRepository;
