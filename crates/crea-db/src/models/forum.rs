//! Forum database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ForumTopicModel {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub category: Option<String>,
    pub author_id: i64,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub post_count: i32,
    pub last_post_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ForumPostModel {
    pub id: i64,
    pub topic_id: i64,
    pub author_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
