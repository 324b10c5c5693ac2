//! In-process durable stores.
//!
//! Stand in for PostgreSQL when the server runs without a database and in
//! tests. Contents are lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use video_balancer_types::models::OriginServerRecord;
use video_balancer_types::{OriginServer, RepoResult, RepositoryError, RoutingSettings};

use crate::modules::repository::{OriginServerRepository, SettingsRepository};

#[derive(Debug, Default)]
pub struct MemorySettingsRepository {
    settings: RwLock<Option<RoutingSettings>>,
}

impl MemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: RoutingSettings) -> Self {
        Self { settings: RwLock::new(Some(settings)) }
    }
}

#[async_trait]
impl SettingsRepository for MemorySettingsRepository {
    async fn create(&self, settings: &RoutingSettings) -> RepoResult<()> {
        let mut slot = self.settings.write().await;
        if slot.is_some() {
            return Err(RepositoryError::AlreadyExists("cdn settings".to_string()));
        }
        *slot = Some(settings.clone());
        Ok(())
    }

    async fn read(&self) -> RepoResult<Option<RoutingSettings>> {
        Ok(self.settings.read().await.clone())
    }

    async fn update(&self, settings: &RoutingSettings) -> RepoResult<()> {
        let mut slot = self.settings.write().await;
        match slot.as_mut() {
            Some(current) => {
                *current = settings.clone();
                Ok(())
            },
            None => Err(RepositoryError::NotFound("cdn settings".to_string())),
        }
    }
}

#[derive(Debug)]
struct OriginTable {
    servers: HashMap<i64, OriginServer>,
    ids_by_name: HashMap<String, i64>,
    next_id: i64,
}

/// Origin records with unique names.
///
/// The uniqueness check and the write happen under one lock, like the
/// `UNIQUE` constraint on the Postgres table.
#[derive(Debug)]
pub struct MemoryOriginServerRepository {
    table: RwLock<OriginTable>,
}

impl Default for MemoryOriginServerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryOriginServerRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(OriginTable {
                servers: HashMap::new(),
                ids_by_name: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

#[async_trait]
impl OriginServerRepository for MemoryOriginServerRepository {
    async fn create(&self, server: &OriginServer) -> RepoResult<i64> {
        let mut table = self.table.write().await;
        if table.ids_by_name.contains_key(&server.name) {
            return Err(RepositoryError::AlreadyExists(server.name.clone()));
        }
        let id = table.next_id;
        table.next_id += 1;
        table.ids_by_name.insert(server.name.clone(), id);
        table.servers.insert(id, server.clone());
        Ok(id)
    }

    async fn read_by_name(&self, name: &str) -> RepoResult<Option<OriginServer>> {
        let table = self.table.read().await;
        Ok(table.ids_by_name.get(name).and_then(|id| table.servers.get(id)).cloned())
    }

    async fn read_by_id(&self, id: i64) -> RepoResult<Option<OriginServerRecord>> {
        let table = self.table.read().await;
        Ok(table.servers.get(&id).map(|server| OriginServerRecord { id, server: server.clone() }))
    }

    async fn update(&self, id: i64, server: &OriginServer) -> RepoResult<()> {
        let mut table = self.table.write().await;
        if table.ids_by_name.get(&server.name).is_some_and(|owner| *owner != id) {
            return Err(RepositoryError::AlreadyExists(server.name.clone()));
        }
        let previous = match table.servers.get_mut(&id) {
            Some(current) => std::mem::replace(current, server.clone()),
            None => return Err(RepositoryError::NotFound(format!("origin server {}", id))),
        };
        if previous.name != server.name {
            table.ids_by_name.remove(&previous.name);
            table.ids_by_name.insert(server.name.clone(), id);
        }
        Ok(())
    }
}
