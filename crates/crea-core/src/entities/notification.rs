//! Notification entity - an inbox item for a single user

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(id: Snowflake, user_id: Snowflake, title: String, message: String) -> Self {
        Self {
            id,
            user_id,
            title,
            message,
            link: None,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }

    #[inline]
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}
