//! PostgreSQL implementations of the site content repositories
//!
//! Links, body members, ads and breaking news are short admin-curated lists
//! returned whole in `position` order. Achievements grow over time and are
//! paged like the other feeds.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crea_core::entities::{Achievement, Advertisement, BodyMember, BreakingNews, ExternalLink};
use crea_core::error::DomainError;
use crea_core::traits::{
    AchievementRepository, AdvertisementRepository, BodyMemberRepository, BreakingNewsRepository,
    ExternalLinkRepository, PageQuery, RepoResult,
};
use crea_core::value_objects::Snowflake;

use crate::models::{
    AchievementModel, AdvertisementModel, BodyMemberModel, BreakingNewsModel, ExternalLinkModel,
};

use super::error::{ensure_affected, map_db_error};
use super::keyset::Keyset;

async fn delete_row<F>(pool: &PgPool, table: &str, id: Snowflake, not_found: F) -> RepoResult<()>
where
    F: FnOnce() -> DomainError,
{
    let sql = format!("DELETE FROM {table} WHERE id = $1");
    let result = sqlx::query(&sql)
        .bind(id.into_inner())
        .execute(pool)
        .await
        .map_err(map_db_error)?;

    ensure_affected(result.rows_affected(), not_found)
}

// ============================================================================
// External links
// ============================================================================

const LINK_COLUMNS: &str = "id, title, url, category, position, created_at, updated_at";

#[derive(Clone)]
pub struct PgExternalLinkRepository {
    pool: PgPool,
}

impl PgExternalLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExternalLinkRepository for PgExternalLinkRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ExternalLink>> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM external_links WHERE id = $1");
        let result = sqlx::query_as::<_, ExternalLinkModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(ExternalLink::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<ExternalLink>> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM external_links ORDER BY position, id");
        let rows = sqlx::query_as::<_, ExternalLinkModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ExternalLink::from).collect())
    }

    #[instrument(skip(self, link), fields(link_id = %link.id))]
    async fn create(&self, link: &ExternalLink) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO external_links (id, title, url, category, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(link.id.into_inner())
        .bind(&link.title)
        .bind(&link.url)
        .bind(&link.category)
        .bind(link.position)
        .bind(link.created_at)
        .bind(link.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, link), fields(link_id = %link.id))]
    async fn update(&self, link: &ExternalLink) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE external_links
            SET title = $2, url = $3, category = $4, position = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(link.id.into_inner())
        .bind(&link.title)
        .bind(&link.url)
        .bind(&link.category)
        .bind(link.position)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::ExternalLinkNotFound(link.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        delete_row(&self.pool, "external_links", id, || DomainError::ExternalLinkNotFound(id)).await
    }
}

// ============================================================================
// Body members
// ============================================================================

const MEMBER_COLUMNS: &str =
    "id, name, designation, division, phone, email, photo_url, position, created_at, updated_at";

#[derive(Clone)]
pub struct PgBodyMemberRepository {
    pool: PgPool,
}

impl PgBodyMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BodyMemberRepository for PgBodyMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<BodyMember>> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM body_members WHERE id = $1");
        let result = sqlx::query_as::<_, BodyMemberModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(BodyMember::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<BodyMember>> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM body_members ORDER BY position, id");
        let rows = sqlx::query_as::<_, BodyMemberModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(BodyMember::from).collect())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn create(&self, member: &BodyMember) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO body_members (id, name, designation, division, phone, email, photo_url,
                                      position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(member.id.into_inner())
        .bind(&member.name)
        .bind(&member.designation)
        .bind(&member.division)
        .bind(&member.phone)
        .bind(&member.email)
        .bind(&member.photo_url)
        .bind(member.position)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn update(&self, member: &BodyMember) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE body_members
            SET name = $2, designation = $3, division = $4, phone = $5, email = $6,
                photo_url = $7, position = $8, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(member.id.into_inner())
        .bind(&member.name)
        .bind(&member.designation)
        .bind(&member.division)
        .bind(&member.phone)
        .bind(&member.email)
        .bind(&member.photo_url)
        .bind(member.position)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::BodyMemberNotFound(member.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        delete_row(&self.pool, "body_members", id, || DomainError::BodyMemberNotFound(id)).await
    }
}

// ============================================================================
// Advertisements
// ============================================================================

const AD_COLUMNS: &str = "id, title, image_url, link_url, is_active, starts_at, ends_at, position, \
                          created_at, updated_at";

#[derive(Clone)]
pub struct PgAdvertisementRepository {
    pool: PgPool,
}

impl PgAdvertisementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdvertisementRepository for PgAdvertisementRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Advertisement>> {
        let sql = format!("SELECT {AD_COLUMNS} FROM advertisements WHERE id = $1");
        let result = sqlx::query_as::<_, AdvertisementModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Advertisement::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, live_at: Option<DateTime<Utc>>) -> RepoResult<Vec<Advertisement>> {
        let sql = format!(
            r"
            SELECT {AD_COLUMNS} FROM advertisements
            WHERE $1::TIMESTAMPTZ IS NULL
               OR (is_active
                   AND (starts_at IS NULL OR starts_at <= $1)
                   AND (ends_at IS NULL OR ends_at >= $1))
            ORDER BY position, id
            "
        );
        let rows = sqlx::query_as::<_, AdvertisementModel>(&sql)
            .bind(live_at)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Advertisement::from).collect())
    }

    #[instrument(skip(self, ad), fields(ad_id = %ad.id))]
    async fn create(&self, ad: &Advertisement) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO advertisements (id, title, image_url, link_url, is_active, starts_at,
                                        ends_at, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(ad.id.into_inner())
        .bind(&ad.title)
        .bind(&ad.image_url)
        .bind(&ad.link_url)
        .bind(ad.is_active)
        .bind(ad.starts_at)
        .bind(ad.ends_at)
        .bind(ad.position)
        .bind(ad.created_at)
        .bind(ad.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, ad), fields(ad_id = %ad.id))]
    async fn update(&self, ad: &Advertisement) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE advertisements
            SET title = $2, image_url = $3, link_url = $4, is_active = $5, starts_at = $6,
                ends_at = $7, position = $8, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(ad.id.into_inner())
        .bind(&ad.title)
        .bind(&ad.image_url)
        .bind(&ad.link_url)
        .bind(ad.is_active)
        .bind(ad.starts_at)
        .bind(ad.ends_at)
        .bind(ad.position)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::AdvertisementNotFound(ad.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        delete_row(&self.pool, "advertisements", id, || DomainError::AdvertisementNotFound(id)).await
    }
}

// ============================================================================
// Achievements
// ============================================================================

const ACHIEVEMENT_COLUMNS: &str =
    "id, title, description, achieved_on, image_url, created_at, updated_at";

#[derive(Clone)]
pub struct PgAchievementRepository {
    pool: PgPool,
}

impl PgAchievementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AchievementRepository for PgAchievementRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Achievement>> {
        let sql = format!("SELECT {ACHIEVEMENT_COLUMNS} FROM achievements WHERE id = $1");
        let result = sqlx::query_as::<_, AchievementModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Achievement::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, page: PageQuery) -> RepoResult<Vec<Achievement>> {
        let keyset = Keyset::newest_first(page);
        let sql = format!(
            r"
            SELECT {ACHIEVEMENT_COLUMNS} FROM achievements
            WHERE ($1::BIGINT IS NULL OR id < $1)
              AND ($2::BIGINT IS NULL OR id > $2)
            ORDER BY id {order}
            LIMIT $3
            ",
            order = keyset.order()
        );

        let rows = sqlx::query_as::<_, AchievementModel>(&sql)
            .bind(keyset.before)
            .bind(keyset.after)
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(keyset.finish(rows).into_iter().map(Achievement::from).collect())
    }

    #[instrument(skip(self, achievement), fields(achievement_id = %achievement.id))]
    async fn create(&self, achievement: &Achievement) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO achievements (id, title, description, achieved_on, image_url,
                                      created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(achievement.id.into_inner())
        .bind(&achievement.title)
        .bind(&achievement.description)
        .bind(achievement.achieved_on)
        .bind(&achievement.image_url)
        .bind(achievement.created_at)
        .bind(achievement.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, achievement), fields(achievement_id = %achievement.id))]
    async fn update(&self, achievement: &Achievement) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE achievements
            SET title = $2, description = $3, achieved_on = $4, image_url = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(achievement.id.into_inner())
        .bind(&achievement.title)
        .bind(&achievement.description)
        .bind(achievement.achieved_on)
        .bind(&achievement.image_url)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::AchievementNotFound(achievement.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        delete_row(&self.pool, "achievements", id, || DomainError::AchievementNotFound(id)).await
    }
}

// ============================================================================
// Breaking news
// ============================================================================

const NEWS_COLUMNS: &str = "id, text, link, is_active, position, created_at, updated_at";

#[derive(Clone)]
pub struct PgBreakingNewsRepository {
    pool: PgPool,
}

impl PgBreakingNewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BreakingNewsRepository for PgBreakingNewsRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<BreakingNews>> {
        let sql = format!("SELECT {NEWS_COLUMNS} FROM breaking_news WHERE id = $1");
        let result = sqlx::query_as::<_, BreakingNewsModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(BreakingNews::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, active_only: bool) -> RepoResult<Vec<BreakingNews>> {
        let sql = format!(
            "SELECT {NEWS_COLUMNS} FROM breaking_news WHERE (NOT $1 OR is_active) ORDER BY position, id"
        );
        let rows = sqlx::query_as::<_, BreakingNewsModel>(&sql)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(BreakingNews::from).collect())
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn create(&self, item: &BreakingNews) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO breaking_news (id, text, link, is_active, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(item.id.into_inner())
        .bind(&item.text)
        .bind(&item.link)
        .bind(item.is_active)
        .bind(item.position)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn update(&self, item: &BreakingNews) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE breaking_news
            SET text = $2, link = $3, is_active = $4, position = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(item.id.into_inner())
        .bind(&item.text)
        .bind(&item.link)
        .bind(item.is_active)
        .bind(item.position)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::BreakingNewsNotFound(item.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        delete_row(&self.pool, "breaking_news", id, || DomainError::BreakingNewsNotFound(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repos_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgExternalLinkRepository>();
        assert_send_sync::<PgBodyMemberRepository>();
        assert_send_sync::<PgAdvertisementRepository>();
        assert_send_sync::<PgAchievementRepository>();
        assert_send_sync::<PgBreakingNewsRepository>();
    }
}
