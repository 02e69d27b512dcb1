//! PostgreSQL implementation of CircularRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crea_core::entities::Circular;
use crea_core::error::DomainError;
use crea_core::traits::{CircularRepository, PageQuery, RepoResult};
use crea_core::value_objects::Snowflake;

use crate::mappers::DocumentColumns;
use crate::models::CircularModel;

use super::error::{ensure_affected, map_db_error};
use super::keyset::Keyset;

const COLUMNS: &str = "id, title, circular_number, issued_on, category, source_url, file_path, \
                       file_name, file_content_type, file_size, created_by, created_at, updated_at";

/// PostgreSQL implementation of CircularRepository
#[derive(Clone)]
pub struct PgCircularRepository {
    pool: PgPool,
}

impl PgCircularRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CircularRepository for PgCircularRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Circular>> {
        let sql = format!("SELECT {COLUMNS} FROM circulars WHERE id = $1");
        let result = sqlx::query_as::<_, CircularModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Circular::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, category: Option<&str>, page: PageQuery) -> RepoResult<Vec<Circular>> {
        let keyset = Keyset::newest_first(page);
        let sql = format!(
            r"
            SELECT {COLUMNS} FROM circulars
            WHERE ($1::BIGINT IS NULL OR id < $1)
              AND ($2::BIGINT IS NULL OR id > $2)
              AND ($3::TEXT IS NULL OR category = $3)
            ORDER BY id {order}
            LIMIT $4
            ",
            order = keyset.order()
        );

        let rows = sqlx::query_as::<_, CircularModel>(&sql)
            .bind(keyset.before)
            .bind(keyset.after)
            .bind(category)
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(keyset.finish(rows).into_iter().map(Circular::from).collect())
    }

    #[instrument(skip(self, circular), fields(circular_id = %circular.id))]
    async fn create(&self, circular: &Circular) -> RepoResult<()> {
        let doc = DocumentColumns::new(Some(&circular.source));
        sqlx::query(
            r"
            INSERT INTO circulars (id, title, circular_number, issued_on, category, source_url,
                                   file_path, file_name, file_content_type, file_size,
                                   created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(circular.id.into_inner())
        .bind(&circular.title)
        .bind(&circular.circular_number)
        .bind(circular.issued_on)
        .bind(&circular.category)
        .bind(doc.source_url)
        .bind(doc.file_path)
        .bind(doc.file_name)
        .bind(doc.file_content_type)
        .bind(doc.file_size)
        .bind(circular.created_by.into_inner())
        .bind(circular.created_at)
        .bind(circular.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, circular), fields(circular_id = %circular.id))]
    async fn update(&self, circular: &Circular) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE circulars
            SET title = $2, circular_number = $3, issued_on = $4, category = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(circular.id.into_inner())
        .bind(&circular.title)
        .bind(&circular.circular_number)
        .bind(circular.issued_on)
        .bind(&circular.category)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::CircularNotFound(circular.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM circulars WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::CircularNotFound(id))
    }
}
