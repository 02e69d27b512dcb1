//! PostgreSQL implementations of the forum repositories
//!
//! Topic counters (`post_count`, `last_post_at`) move in the same
//! transaction as the post rows they describe.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crea_core::entities::{ForumPost, ForumTopic};
use crea_core::error::DomainError;
use crea_core::traits::{ForumPostRepository, ForumTopicRepository, PageQuery, RepoResult};
use crea_core::value_objects::Snowflake;

use crate::models::{ForumPostModel, ForumTopicModel};

use super::error::{ensure_affected, map_db_error};
use super::keyset::Keyset;

const TOPIC_COLUMNS: &str = "id, title, body, category, author_id, is_pinned, is_locked, \
                             post_count, last_post_at, created_at, updated_at";

/// Last reply, or creation for a topic nobody has answered
const ACTIVITY: &str = "COALESCE(t.last_post_at, t.created_at)";

const POST_COLUMNS: &str = "id, topic_id, author_id, body, created_at, updated_at";

// ============================================================================
// Topics
// ============================================================================

#[derive(Clone)]
pub struct PgForumTopicRepository {
    pool: PgPool,
}

impl PgForumTopicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ForumTopicRepository for PgForumTopicRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ForumTopic>> {
        let sql = format!("SELECT {TOPIC_COLUMNS} FROM forum_topics WHERE id = $1");
        let result = sqlx::query_as::<_, ForumTopicModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(ForumTopic::from))
    }

    #[instrument(skip(self))]
    async fn list_pinned(&self, category: Option<&str>) -> RepoResult<Vec<ForumTopic>> {
        let sql = format!(
            r"
            SELECT {TOPIC_COLUMNS} FROM forum_topics
            WHERE is_pinned AND ($1::TEXT IS NULL OR category = $1)
            ORDER BY COALESCE(last_post_at, created_at) DESC, id DESC
            "
        );

        let rows = sqlx::query_as::<_, ForumTopicModel>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ForumTopic::from).collect())
    }

    /// Keyed on `(activity, id)`; a cursor names a topic whose current
    /// activity anchors the page. A cursor topic that no longer exists
    /// yields an empty page.
    #[instrument(skip(self))]
    async fn list(&self, category: Option<&str>, page: PageQuery) -> RepoResult<Vec<ForumTopic>> {
        let keyset = Keyset::newest_first(page);
        let sql = format!(
            r"
            SELECT {TOPIC_COLUMNS} FROM forum_topics t
            WHERE NOT t.is_pinned
              AND ($1::BIGINT IS NULL OR ({ACTIVITY}, t.id) <
                   (SELECT COALESCE(c.last_post_at, c.created_at), c.id FROM forum_topics c WHERE c.id = $1))
              AND ($2::BIGINT IS NULL OR ({ACTIVITY}, t.id) >
                   (SELECT COALESCE(c.last_post_at, c.created_at), c.id FROM forum_topics c WHERE c.id = $2))
              AND ($3::TEXT IS NULL OR t.category = $3)
            ORDER BY {ACTIVITY} {order}, t.id {order}
            LIMIT $4
            ",
            order = keyset.order()
        );

        let rows = sqlx::query_as::<_, ForumTopicModel>(&sql)
            .bind(keyset.before)
            .bind(keyset.after)
            .bind(category)
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(keyset.finish(rows).into_iter().map(ForumTopic::from).collect())
    }

    #[instrument(skip(self, topic), fields(topic_id = %topic.id))]
    async fn create(&self, topic: &ForumTopic) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO forum_topics (id, title, body, category, author_id, is_pinned, is_locked,
                                      post_count, last_post_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(topic.id.into_inner())
        .bind(&topic.title)
        .bind(&topic.body)
        .bind(&topic.category)
        .bind(topic.author_id.into_inner())
        .bind(topic.is_pinned)
        .bind(topic.is_locked)
        .bind(topic.post_count)
        .bind(topic.last_post_at)
        .bind(topic.created_at)
        .bind(topic.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, topic), fields(topic_id = %topic.id))]
    async fn update(&self, topic: &ForumTopic) -> RepoResult<()> {
        // Counters are owned by the post writes and are not touched here.
        let result = sqlx::query(
            r"
            UPDATE forum_topics
            SET title = $2, body = $3, category = $4, is_pinned = $5, is_locked = $6,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(topic.id.into_inner())
        .bind(&topic.title)
        .bind(&topic.body)
        .bind(&topic.category)
        .bind(topic.is_pinned)
        .bind(topic.is_locked)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::TopicNotFound(topic.id))
    }

    #[instrument(skip(self))]
    async fn delete_with_posts(&self, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM forum_posts WHERE topic_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM forum_topics WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        // Dropping the transaction rolls the post deletes back.
        ensure_affected(result.rows_affected(), || DomainError::TopicNotFound(id))?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}

// ============================================================================
// Posts
// ============================================================================

#[derive(Clone)]
pub struct PgForumPostRepository {
    pool: PgPool,
}

impl PgForumPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ForumPostRepository for PgForumPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ForumPost>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM forum_posts WHERE id = $1");
        let result = sqlx::query_as::<_, ForumPostModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(ForumPost::from))
    }

    #[instrument(skip(self))]
    async fn list_by_topic(&self, topic_id: Snowflake, page: PageQuery) -> RepoResult<Vec<ForumPost>> {
        let keyset = Keyset::oldest_first(page);
        let sql = format!(
            r"
            SELECT {POST_COLUMNS} FROM forum_posts
            WHERE topic_id = $1
              AND ($2::BIGINT IS NULL OR id < $2)
              AND ($3::BIGINT IS NULL OR id > $3)
            ORDER BY id {order}
            LIMIT $4
            ",
            order = keyset.order()
        );

        let rows = sqlx::query_as::<_, ForumPostModel>(&sql)
            .bind(topic_id.into_inner())
            .bind(keyset.before)
            .bind(keyset.after)
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(keyset.finish(rows).into_iter().map(ForumPost::from).collect())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id, topic_id = %post.topic_id))]
    async fn create(&self, post: &ForumPost) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let bumped = sqlx::query(
            r"
            UPDATE forum_topics
            SET post_count = post_count + 1, last_post_at = $2
            WHERE id = $1
            ",
        )
        .bind(post.topic_id.into_inner())
        .bind(post.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        ensure_affected(bumped.rows_affected(), || DomainError::TopicNotFound(post.topic_id))?;

        sqlx::query(
            r"
            INSERT INTO forum_posts (id, topic_id, author_id, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(post.id.into_inner())
        .bind(post.topic_id.into_inner())
        .bind(post.author_id.into_inner())
        .bind(&post.body)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn update(&self, post: &ForumPost) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE forum_posts SET body = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.body)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::PostNotFound(post.id))
    }

    #[instrument(skip(self, post), fields(post_id = %post.id, topic_id = %post.topic_id))]
    async fn delete(&self, post: &ForumPost) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM forum_posts WHERE id = $1")
            .bind(post.id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::PostNotFound(post.id))?;

        // last_post_at falls back to the newest remaining post.
        sqlx::query(
            r"
            UPDATE forum_topics
            SET post_count = GREATEST(post_count - 1, 0),
                last_post_at = (SELECT MAX(created_at) FROM forum_posts WHERE topic_id = $1)
            WHERE id = $1
            ",
        )
        .bind(post.topic_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgForumTopicRepository>();
        assert_send_sync::<PgForumPostRepository>();
    }
}
