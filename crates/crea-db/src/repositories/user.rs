//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crea_core::entities::{User, UserRole};
use crea_core::error::DomainError;
use crea_core::traits::{PageQuery, RepoResult, UserFilter, UserRepository};
use crea_core::value_objects::Snowflake;

use crate::models::UserModel;

use super::error::{ensure_affected, map_db_error, map_unique_violation};
use super::keyset::Keyset;

const COLUMNS: &str = "id, name, email, phone, designation, division, department, employee_id, \
                       role, email_verified, is_active, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND deleted_at IS NULL)
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, name, email, password_hash, phone, designation, division,
                               department, employee_id, role, email_verified, is_active,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.name)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.phone)
        .bind(&user.designation)
        .bind(&user.division)
        .bind(&user.department)
        .bind(&user.employee_id)
        .bind(user.role.as_str())
        .bind(user.email_verified)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET name = $2, phone = $3, designation = $4, division = $5, department = $6,
                employee_id = $7, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.designation)
        .bind(&user.division)
        .bind(&user.department)
        .bind(&user.employee_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::UserNotFound(user.id))
    }

    #[instrument(skip(self))]
    async fn set_role(&self, id: Snowflake, role: UserRole) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users SET role = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::UserNotFound(id))
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: Snowflake, is_active: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users SET is_active = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::UserNotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET deleted_at = NOW(), is_active = FALSE
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::UserNotFound(id))
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::UserNotFound(id))
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &UserFilter, page: PageQuery) -> RepoResult<Vec<User>> {
        let keyset = Keyset::newest_first(page);
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")));

        let sql = format!(
            r"
            SELECT {COLUMNS} FROM users
            WHERE deleted_at IS NULL
              AND ($1::BIGINT IS NULL OR id < $1)
              AND ($2::BIGINT IS NULL OR id > $2)
              AND ($3::TEXT IS NULL OR role = $3)
              AND ($4::TEXT IS NULL OR name ILIKE $4 OR email ILIKE $4)
            ORDER BY id {order}
            LIMIT $5
            ",
            order = keyset.order()
        );

        let rows = sqlx::query_as::<_, UserModel>(&sql)
            .bind(keyset.before)
            .bind(keyset.after)
            .bind(filter.role.map(UserRole::as_str))
            .bind(search)
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(keyset.finish(rows).into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn active_ids(&self) -> RepoResult<Vec<Snowflake>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r"
            SELECT id FROM users WHERE is_active AND deleted_at IS NULL ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgUserRepository>();
    }
}
