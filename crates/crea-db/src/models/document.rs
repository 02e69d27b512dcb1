//! Circular, manual and court case models
//!
//! All three embed the same document columns: `source_url` for a link, or
//! the `file_*` group for an upload.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Default, FromRow)]
pub struct DocumentColumnsModel {
    pub source_url: Option<String>,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub file_content_type: Option<String>,
    pub file_size: Option<i64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CircularModel {
    pub id: i64,
    pub title: String,
    pub circular_number: Option<String>,
    pub issued_on: NaiveDate,
    pub category: Option<String>,
    #[sqlx(flatten)]
    pub document: DocumentColumnsModel,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ManualModel {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    #[sqlx(flatten)]
    pub document: DocumentColumnsModel,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CourtCaseModel {
    pub id: i64,
    pub case_number: String,
    pub title: String,
    pub court: String,
    pub status: String,
    pub next_hearing: Option<NaiveDate>,
    pub description: Option<String>,
    #[sqlx(flatten)]
    pub document: DocumentColumnsModel,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
