//! PostgreSQL implementation of CourtCaseRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crea_core::entities::{CourtCase, CourtCaseStatus};
use crea_core::error::DomainError;
use crea_core::traits::{CourtCaseRepository, PageQuery, RepoResult};
use crea_core::value_objects::Snowflake;

use crate::mappers::DocumentColumns;
use crate::models::CourtCaseModel;

use super::error::{ensure_affected, map_db_error};
use super::keyset::Keyset;

const COLUMNS: &str = "id, case_number, title, court, status, next_hearing, description, \
                       source_url, file_path, file_name, file_content_type, file_size, \
                       created_by, created_at, updated_at";

#[derive(Clone)]
pub struct PgCourtCaseRepository {
    pool: PgPool,
}

impl PgCourtCaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourtCaseRepository for PgCourtCaseRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CourtCase>> {
        let sql = format!("SELECT {COLUMNS} FROM court_cases WHERE id = $1");
        let result = sqlx::query_as::<_, CourtCaseModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(CourtCase::from))
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        status: Option<CourtCaseStatus>,
        page: PageQuery,
    ) -> RepoResult<Vec<CourtCase>> {
        let keyset = Keyset::newest_first(page);
        let sql = format!(
            r"
            SELECT {COLUMNS} FROM court_cases
            WHERE ($1::BIGINT IS NULL OR id < $1)
              AND ($2::BIGINT IS NULL OR id > $2)
              AND ($3::TEXT IS NULL OR status = $3)
            ORDER BY id {order}
            LIMIT $4
            ",
            order = keyset.order()
        );

        let rows = sqlx::query_as::<_, CourtCaseModel>(&sql)
            .bind(keyset.before)
            .bind(keyset.after)
            .bind(status.map(CourtCaseStatus::as_str))
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(keyset.finish(rows).into_iter().map(CourtCase::from).collect())
    }

    #[instrument(skip(self, case), fields(case_id = %case.id))]
    async fn create(&self, case: &CourtCase) -> RepoResult<()> {
        let doc = DocumentColumns::new(case.document.as_ref());
        sqlx::query(
            r"
            INSERT INTO court_cases (id, case_number, title, court, status, next_hearing,
                                     description, source_url, file_path, file_name,
                                     file_content_type, file_size, created_by, created_at,
                                     updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ",
        )
        .bind(case.id.into_inner())
        .bind(&case.case_number)
        .bind(&case.title)
        .bind(&case.court)
        .bind(case.status.as_str())
        .bind(case.next_hearing)
        .bind(&case.description)
        .bind(doc.source_url)
        .bind(doc.file_path)
        .bind(doc.file_name)
        .bind(doc.file_content_type)
        .bind(doc.file_size)
        .bind(case.created_by.into_inner())
        .bind(case.created_at)
        .bind(case.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, case), fields(case_id = %case.id))]
    async fn update(&self, case: &CourtCase) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE court_cases
            SET case_number = $2, title = $3, court = $4, status = $5, next_hearing = $6,
                description = $7, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(case.id.into_inner())
        .bind(&case.case_number)
        .bind(&case.title)
        .bind(&case.court)
        .bind(case.status.as_str())
        .bind(case.next_hearing)
        .bind(&case.description)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::CourtCaseNotFound(case.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM court_cases WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::CourtCaseNotFound(id))
    }
}
