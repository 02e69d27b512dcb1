//! PostgreSQL implementation of ManualRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crea_core::entities::Manual;
use crea_core::error::DomainError;
use crea_core::traits::{ManualRepository, PageQuery, RepoResult};
use crea_core::value_objects::Snowflake;

use crate::mappers::DocumentColumns;
use crate::models::ManualModel;

use super::error::{ensure_affected, map_db_error};
use super::keyset::Keyset;

const COLUMNS: &str = "id, title, description, category, source_url, file_path, file_name, \
                       file_content_type, file_size, created_by, created_at, updated_at";

#[derive(Clone)]
pub struct PgManualRepository {
    pool: PgPool,
}

impl PgManualRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ManualRepository for PgManualRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Manual>> {
        let sql = format!("SELECT {COLUMNS} FROM manuals WHERE id = $1");
        let result = sqlx::query_as::<_, ManualModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Manual::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, category: Option<&str>, page: PageQuery) -> RepoResult<Vec<Manual>> {
        let keyset = Keyset::newest_first(page);
        let sql = format!(
            r"
            SELECT {COLUMNS} FROM manuals
            WHERE ($1::BIGINT IS NULL OR id < $1)
              AND ($2::BIGINT IS NULL OR id > $2)
              AND ($3::TEXT IS NULL OR category = $3)
            ORDER BY id {order}
            LIMIT $4
            ",
            order = keyset.order()
        );

        let rows = sqlx::query_as::<_, ManualModel>(&sql)
            .bind(keyset.before)
            .bind(keyset.after)
            .bind(category)
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(keyset.finish(rows).into_iter().map(Manual::from).collect())
    }

    #[instrument(skip(self, manual), fields(manual_id = %manual.id))]
    async fn create(&self, manual: &Manual) -> RepoResult<()> {
        let doc = DocumentColumns::new(Some(&manual.source));
        sqlx::query(
            r"
            INSERT INTO manuals (id, title, description, category, source_url, file_path,
                                 file_name, file_content_type, file_size, created_by,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(manual.id.into_inner())
        .bind(&manual.title)
        .bind(&manual.description)
        .bind(&manual.category)
        .bind(doc.source_url)
        .bind(doc.file_path)
        .bind(doc.file_name)
        .bind(doc.file_content_type)
        .bind(doc.file_size)
        .bind(manual.created_by.into_inner())
        .bind(manual.created_at)
        .bind(manual.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, manual), fields(manual_id = %manual.id))]
    async fn update(&self, manual: &Manual) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE manuals
            SET title = $2, description = $3, category = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(manual.id.into_inner())
        .bind(&manual.title)
        .bind(&manual.description)
        .bind(&manual.category)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::ManualNotFound(manual.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM manuals WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::ManualNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgManualRepository>();
    }
}
