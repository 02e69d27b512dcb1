//! Membership and donation models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct MembershipModel {
    pub id: i64,
    pub user_id: i64,
    pub plan: String,
    pub status: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub designation: String,
    pub division: Option<String>,
    pub department: Option<String>,
    pub employee_id: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub amount: i64,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub membership_number: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub activated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DonationModel {
    pub id: i64,
    pub user_id: Option<i64>,
    pub donor_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub amount: i64,
    pub purpose: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
