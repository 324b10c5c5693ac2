//! PostgreSQL implementation of the settings repository.

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use video_balancer_types::{RepoResult, RepositoryError, RoutingSettings};

use crate::modules::pg_helpers::{map_sqlx_err, ratio_to_db, row_to_settings};
use crate::modules::repository::SettingsRepository;

/// Durable store for the singleton `cdn_settings` row.
pub struct PostgresSettingsRepository {
    pool: PgPool,
}

impl PostgresSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
    async fn create(&self, settings: &RoutingSettings) -> RepoResult<()> {
        sqlx::query(r#"INSERT INTO cdn_settings (host, ratio) VALUES ($1, $2)"#)
            .bind(&settings.host)
            .bind(ratio_to_db(settings.ratio)?)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn read(&self) -> RepoResult<Option<RoutingSettings>> {
        let row: Option<(String, i32)> =
            sqlx::query_as(r#"SELECT host, ratio FROM cdn_settings ORDER BY id LIMIT 1"#)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_err)?;
        row.map(row_to_settings).transpose()
    }

    async fn update(&self, settings: &RoutingSettings) -> RepoResult<()> {
        let result = sqlx::query(r#"UPDATE cdn_settings SET host = $1, ratio = $2"#)
            .bind(&settings.host)
            .bind(ratio_to_db(settings.ratio)?)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound("cdn settings".to_string()));
        }
        Ok(())
    }
}
