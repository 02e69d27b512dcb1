//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crea_core::entities::Notification;
use crea_core::traits::{NotificationRepository, PageQuery, RepoResult};
use crea_core::value_objects::Snowflake;

use crate::models::NotificationModel;

use super::error::map_db_error;
use super::keyset::Keyset;

const COLUMNS: &str = "id, user_id, title, message, link, read_at, created_at";

#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        let sql = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        let result = sqlx::query_as::<_, NotificationModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Notification::from))
    }

    #[instrument(skip(self))]
    async fn list_for_user(
        &self,
        user_id: Snowflake,
        unread_only: bool,
        page: PageQuery,
    ) -> RepoResult<Vec<Notification>> {
        let keyset = Keyset::newest_first(page);
        let sql = format!(
            r"
            SELECT {COLUMNS} FROM notifications
            WHERE user_id = $1
              AND (NOT $2 OR read_at IS NULL)
              AND ($3::BIGINT IS NULL OR id < $3)
              AND ($4::BIGINT IS NULL OR id > $4)
            ORDER BY id {order}
            LIMIT $5
            ",
            order = keyset.order()
        );

        let rows = sqlx::query_as::<_, NotificationModel>(&sql)
            .bind(user_id.into_inner())
            .bind(unread_only)
            .bind(keyset.before)
            .bind(keyset.after)
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(keyset.finish(rows).into_iter().map(Notification::from).collect())
    }

    #[instrument(skip(self))]
    async fn unread_count(&self, user_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read_at IS NULL",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, notification), fields(notification_id = %notification.id))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO notifications (id, user_id, title, message, link, read_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(notification.id.into_inner())
        .bind(notification.user_id.into_inner())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.link)
        .bind(notification.read_at)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, notifications), fields(count = notifications.len()))]
    async fn create_many(&self, notifications: &[Notification]) -> RepoResult<u64> {
        if notifications.is_empty() {
            return Ok(0);
        }

        let mut ids = Vec::with_capacity(notifications.len());
        let mut user_ids = Vec::with_capacity(notifications.len());
        let mut titles = Vec::with_capacity(notifications.len());
        let mut messages = Vec::with_capacity(notifications.len());
        let mut links = Vec::with_capacity(notifications.len());
        let mut created = Vec::with_capacity(notifications.len());
        for n in notifications {
            ids.push(n.id.into_inner());
            user_ids.push(n.user_id.into_inner());
            titles.push(n.title.clone());
            messages.push(n.message.clone());
            links.push(n.link.clone());
            created.push(n.created_at);
        }

        let result = sqlx::query(
            r"
            INSERT INTO notifications (id, user_id, title, message, link, created_at)
            SELECT * FROM UNNEST($1::BIGINT[], $2::BIGINT[], $3::TEXT[], $4::TEXT[],
                                 $5::TEXT[], $6::TIMESTAMPTZ[])
            ",
        )
        .bind(&ids)
        .bind(&user_ids)
        .bind(&titles)
        .bind(&messages)
        .bind(&links)
        .bind(&created)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: Snowflake, user_id: Snowflake, at: DateTime<Utc>) -> RepoResult<bool> {
        // Re-reading keeps the first read time.
        let result = sqlx::query(
            r"
            UPDATE notifications SET read_at = COALESCE(read_at, $3)
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, user_id: Snowflake, at: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE notifications SET read_at = $2
            WHERE user_id = $1 AND read_at IS NULL
            ",
        )
        .bind(user_id.into_inner())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
