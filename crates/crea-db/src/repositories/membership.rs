//! PostgreSQL implementation of MembershipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crea_core::entities::{Membership, MembershipStatus};
use crea_core::error::DomainError;
use crea_core::traits::{MembershipActivation, MembershipRepository, PageQuery, RepoResult};
use crea_core::value_objects::Snowflake;

use crate::models::MembershipModel;

use super::error::{ensure_affected, map_db_error};
use super::keyset::Keyset;

const COLUMNS: &str = "id, user_id, plan, status, full_name, email, phone, designation, division, \
                       department, employee_id, date_of_birth, address, amount, order_id, \
                       payment_id, membership_number, valid_until, rejection_reason, \
                       activated_at, created_at, updated_at";

#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Membership>> {
        let sql = format!("SELECT {COLUMNS} FROM memberships WHERE id = $1");
        let result = sqlx::query_as::<_, MembershipModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Membership::from))
    }

    #[instrument(skip(self))]
    async fn find_by_order_id(&self, order_id: &str) -> RepoResult<Option<Membership>> {
        let sql = format!("SELECT {COLUMNS} FROM memberships WHERE order_id = $1");
        let result = sqlx::query_as::<_, MembershipModel>(&sql)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Membership::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Membership>> {
        let sql = format!("SELECT {COLUMNS} FROM memberships WHERE user_id = $1 ORDER BY id DESC");
        let rows = sqlx::query_as::<_, MembershipModel>(&sql)
            .bind(user_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Membership::from).collect())
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        status: Option<MembershipStatus>,
        page: PageQuery,
    ) -> RepoResult<Vec<Membership>> {
        let keyset = Keyset::newest_first(page);
        let sql = format!(
            r"
            SELECT {COLUMNS} FROM memberships
            WHERE ($1::BIGINT IS NULL OR id < $1)
              AND ($2::BIGINT IS NULL OR id > $2)
              AND ($3::TEXT IS NULL OR status = $3)
            ORDER BY id {order}
            LIMIT $4
            ",
            order = keyset.order()
        );

        let rows = sqlx::query_as::<_, MembershipModel>(&sql)
            .bind(keyset.before)
            .bind(keyset.after)
            .bind(status.map(MembershipStatus::as_str))
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(keyset.finish(rows).into_iter().map(Membership::from).collect())
    }

    #[instrument(skip(self, membership), fields(membership_id = %membership.id))]
    async fn create(&self, membership: &Membership) -> RepoResult<()> {
        let applicant = &membership.applicant;
        sqlx::query(
            r"
            INSERT INTO memberships (id, user_id, plan, status, full_name, email, phone,
                                     designation, division, department, employee_id,
                                     date_of_birth, address, amount, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ",
        )
        .bind(membership.id.into_inner())
        .bind(membership.user_id.into_inner())
        .bind(membership.plan.as_str())
        .bind(membership.status.as_str())
        .bind(&applicant.full_name)
        .bind(&applicant.email)
        .bind(&applicant.phone)
        .bind(&applicant.designation)
        .bind(&applicant.division)
        .bind(&applicant.department)
        .bind(&applicant.employee_id)
        .bind(applicant.date_of_birth)
        .bind(&applicant.address)
        .bind(membership.amount)
        .bind(membership.created_at)
        .bind(membership.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_order_id(&self, id: Snowflake, order_id: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE memberships SET order_id = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(order_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::MembershipNotFound(id))
    }

    #[instrument(skip(self))]
    async fn next_number(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT nextval('membership_number_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, activation), fields(payment_id = %activation.payment_id))]
    async fn activate(&self, id: Snowflake, activation: &MembershipActivation) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE memberships
            SET status = 'active', payment_id = $2, membership_number = $3,
                activated_at = $4, valid_until = $5, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(id.into_inner())
        .bind(&activation.payment_id)
        .bind(&activation.membership_number)
        .bind(activation.activated_at)
        .bind(activation.valid_until)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn reject(&self, id: Snowflake, reason: Option<&str>) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE memberships
            SET status = 'rejected', rejection_reason = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(id.into_inner())
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM memberships WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::MembershipNotFound(id))
    }
}
