//! PostgreSQL implementation of DonationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crea_core::entities::{Donation, DonationStatus};
use crea_core::error::DomainError;
use crea_core::traits::{DonationRepository, PageQuery, RepoResult};
use crea_core::value_objects::Snowflake;

use crate::models::DonationModel;

use super::error::{ensure_affected, map_db_error};
use super::keyset::Keyset;

const COLUMNS: &str = "id, user_id, donor_name, email, phone, amount, purpose, message, status, \
                       order_id, payment_id, paid_at, created_at, updated_at";

#[derive(Clone)]
pub struct PgDonationRepository {
    pool: PgPool,
}

impl PgDonationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DonationRepository for PgDonationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Donation>> {
        let sql = format!("SELECT {COLUMNS} FROM donations WHERE id = $1");
        let result = sqlx::query_as::<_, DonationModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Donation::from))
    }

    #[instrument(skip(self))]
    async fn find_by_order_id(&self, order_id: &str) -> RepoResult<Option<Donation>> {
        let sql = format!("SELECT {COLUMNS} FROM donations WHERE order_id = $1");
        let result = sqlx::query_as::<_, DonationModel>(&sql)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Donation::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, status: Option<DonationStatus>, page: PageQuery) -> RepoResult<Vec<Donation>> {
        let keyset = Keyset::newest_first(page);
        let sql = format!(
            r"
            SELECT {COLUMNS} FROM donations
            WHERE ($1::BIGINT IS NULL OR id < $1)
              AND ($2::BIGINT IS NULL OR id > $2)
              AND ($3::TEXT IS NULL OR status = $3)
            ORDER BY id {order}
            LIMIT $4
            ",
            order = keyset.order()
        );

        let rows = sqlx::query_as::<_, DonationModel>(&sql)
            .bind(keyset.before)
            .bind(keyset.after)
            .bind(status.map(DonationStatus::as_str))
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(keyset.finish(rows).into_iter().map(Donation::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: Snowflake, page: PageQuery) -> RepoResult<Vec<Donation>> {
        let keyset = Keyset::newest_first(page);
        let sql = format!(
            r"
            SELECT {COLUMNS} FROM donations
            WHERE user_id = $1
              AND ($2::BIGINT IS NULL OR id < $2)
              AND ($3::BIGINT IS NULL OR id > $3)
            ORDER BY id {order}
            LIMIT $4
            ",
            order = keyset.order()
        );

        let rows = sqlx::query_as::<_, DonationModel>(&sql)
            .bind(user_id.into_inner())
            .bind(keyset.before)
            .bind(keyset.after)
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(keyset.finish(rows).into_iter().map(Donation::from).collect())
    }

    #[instrument(skip(self, donation), fields(donation_id = %donation.id))]
    async fn create(&self, donation: &Donation) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO donations (id, user_id, donor_name, email, phone, amount, purpose,
                                   message, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(donation.id.into_inner())
        .bind(donation.user_id.map(Snowflake::into_inner))
        .bind(&donation.donor_name)
        .bind(&donation.email)
        .bind(&donation.phone)
        .bind(donation.amount)
        .bind(&donation.purpose)
        .bind(&donation.message)
        .bind(donation.status.as_str())
        .bind(donation.created_at)
        .bind(donation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_order_id(&self, id: Snowflake, order_id: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE donations SET order_id = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(order_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::DonationNotFound(id))
    }

    #[instrument(skip(self))]
    async fn mark_paid(&self, id: Snowflake, payment_id: &str, paid_at: DateTime<Utc>) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE donations
            SET status = 'paid', payment_id = $2, paid_at = $3, updated_at = NOW()
            WHERE id = $1 AND status <> 'paid'
            ",
        )
        .bind(id.into_inner())
        .bind(payment_id)
        .bind(paid_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn mark_failed(&self, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE donations SET status = 'failed', updated_at = NOW()
            WHERE id = $1 AND status = 'created'
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
