//! PostgreSQL implementation of SettingRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crea_core::entities::Setting;
use crea_core::traits::{RepoResult, SettingRepository};

use crate::models::SettingModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgSettingRepository {
    pool: PgPool,
}

impl PgSettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingRepository for PgSettingRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Setting>> {
        let rows = sqlx::query_as::<_, SettingModel>(
            "SELECT key, value, updated_at FROM settings ORDER BY key",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Setting::from).collect())
    }

    #[instrument(skip(self))]
    async fn find(&self, key: &str) -> RepoResult<Option<Setting>> {
        let result = sqlx::query_as::<_, SettingModel>(
            "SELECT key, value, updated_at FROM settings WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Setting::from))
    }

    #[instrument(skip(self, value))]
    async fn upsert(&self, key: &str, value: &serde_json::Value) -> RepoResult<Setting> {
        let row = sqlx::query_as::<_, SettingModel>(
            r"
            INSERT INTO settings (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING key, value, updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Setting::from(row))
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM settings WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
