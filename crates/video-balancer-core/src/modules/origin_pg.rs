//! PostgreSQL implementation of the origin server repository.

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use video_balancer_types::models::OriginServerRecord;
use video_balancer_types::{OriginServer, RepoResult, RepositoryError};

use crate::modules::pg_helpers::{map_sqlx_err, ratio_from_db, ratio_to_db};
use crate::modules::repository::OriginServerRepository;

pub struct PostgresOriginServerRepository {
    pool: PgPool,
}

impl PostgresOriginServerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_server(name: String, ratio: Option<i32>) -> RepoResult<OriginServer> {
    Ok(OriginServer { name, ratio: ratio.map(ratio_from_db).transpose()? })
}

#[async_trait]
impl OriginServerRepository for PostgresOriginServerRepository {
    async fn create(&self, server: &OriginServer) -> RepoResult<i64> {
        let ratio = server.ratio.map(ratio_to_db).transpose()?;
        let (id,): (i64,) = sqlx::query_as(
            r#"INSERT INTO origin_server (name, ratio) VALUES ($1, $2) RETURNING id"#,
        )
        .bind(&server.name)
        .bind(ratio)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match map_sqlx_err(e) {
            RepositoryError::AlreadyExists(_) => RepositoryError::AlreadyExists(server.name.clone()),
            other => other,
        })?;
        Ok(id)
    }

    async fn read_by_name(&self, name: &str) -> RepoResult<Option<OriginServer>> {
        let row: Option<(String, Option<i32>)> =
            sqlx::query_as(r#"SELECT name, ratio FROM origin_server WHERE name = $1"#)
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_err)?;
        row.map(|(name, ratio)| to_server(name, ratio)).transpose()
    }

    async fn read_by_id(&self, id: i64) -> RepoResult<Option<OriginServerRecord>> {
        let row: Option<(i64, String, Option<i32>)> =
            sqlx::query_as(r#"SELECT id, name, ratio FROM origin_server WHERE id = $1"#)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_err)?;
        row.map(|(id, name, ratio)| Ok(OriginServerRecord { id, server: to_server(name, ratio)? }))
            .transpose()
    }

    async fn update(&self, id: i64, server: &OriginServer) -> RepoResult<()> {
        let ratio = server.ratio.map(ratio_to_db).transpose()?;
        let result = sqlx::query(r#"UPDATE origin_server SET name = $2, ratio = $3 WHERE id = $1"#)
            .bind(id)
            .bind(&server.name)
            .bind(ratio)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("origin server {}", id)));
        }
        Ok(())
    }
}
