//! PostgreSQL implementation of EventRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crea_core::entities::{Event, EventWindow};
use crea_core::error::DomainError;
use crea_core::traits::{EventRepository, PageQuery, RepoResult};
use crea_core::value_objects::Snowflake;

use crate::models::EventModel;

use super::error::{ensure_affected, map_db_error};
use super::keyset::Keyset;

const COLUMNS: &str =
    "id, title, description, location, starts_at, ends_at, image_url, created_by, created_at, updated_at";

/// An event is upcoming until its end (or its start, when it has no end).
fn window_clause(window: EventWindow) -> &'static str {
    match window {
        EventWindow::All => "TRUE",
        EventWindow::Upcoming => "COALESCE(ends_at, starts_at) >= $4",
        EventWindow::Past => "COALESCE(ends_at, starts_at) < $4",
    }
}

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>> {
        let sql = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        let result = sqlx::query_as::<_, EventModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Event::from))
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        window: EventWindow,
        now: DateTime<Utc>,
        page: PageQuery,
    ) -> RepoResult<Vec<Event>> {
        let keyset = Keyset::newest_first(page);
        // $4 is always bound so the placeholder count stays fixed.
        let sql = format!(
            r"
            SELECT {COLUMNS} FROM events
            WHERE ($1::BIGINT IS NULL OR id < $1)
              AND ($2::BIGINT IS NULL OR id > $2)
              AND ({window} OR $4::TIMESTAMPTZ IS NULL)
            ORDER BY id {order}
            LIMIT $3
            ",
            window = window_clause(window),
            order = keyset.order()
        );

        let rows = sqlx::query_as::<_, EventModel>(&sql)
            .bind(keyset.before)
            .bind(keyset.after)
            .bind(keyset.limit)
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(keyset.finish(rows).into_iter().map(Event::from).collect())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn create(&self, event: &Event) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO events (id, title, description, location, starts_at, ends_at, image_url,
                                created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(event.id.into_inner())
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(&event.image_url)
        .bind(event.created_by.into_inner())
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: &Event) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE events
            SET title = $2, description = $3, location = $4, starts_at = $5, ends_at = $6,
                image_url = $7, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(event.id.into_inner())
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(&event.image_url)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::EventNotFound(event.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::EventNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgEventRepository>();
    }

    #[test]
    fn test_window_clause_uses_end_or_start() {
        assert_eq!(window_clause(EventWindow::All), "TRUE");
        assert!(window_clause(EventWindow::Upcoming).contains(">= $4"));
        assert!(window_clause(EventWindow::Past).contains("< $4"));
    }
}
