//! Forum entities - discussion topics and their replies

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumTopic {
    pub id: Snowflake,
    pub title: String,
    pub body: String,
    pub category: Option<String>,
    pub author_id: Snowflake,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub post_count: i32,
    pub last_post_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ForumTopic {
    pub fn new(id: Snowflake, title: String, body: String, author_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            body,
            category: None,
            author_id,
            is_pinned: false,
            is_locked: false,
            post_count: 0,
            last_post_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Authors and administrators may edit or remove a topic.
    pub fn ensure_editable_by(&self, user_id: Snowflake, is_admin: bool) -> Result<(), DomainError> {
        if is_admin || self.author_id == user_id {
            Ok(())
        } else {
            Err(DomainError::NotAuthor)
        }
    }

    pub fn ensure_open(&self) -> Result<(), DomainError> {
        if self.is_locked {
            Err(DomainError::TopicLocked)
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumPost {
    pub id: Snowflake,
    pub topic_id: Snowflake,
    pub author_id: Snowflake,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ForumPost {
    pub fn new(id: Snowflake, topic_id: Snowflake, author_id: Snowflake, body: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            topic_id,
            author_id,
            body,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn ensure_editable_by(&self, user_id: Snowflake, is_admin: bool) -> Result<(), DomainError> {
        if is_admin || self.author_id == user_id {
            Ok(())
        } else {
            Err(DomainError::NotAuthor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_edit_rights() {
        let topic = ForumTopic::new(Snowflake::new(1), "Transfers".into(), "...".into(), Snowflake::new(7));
        assert!(topic.ensure_editable_by(Snowflake::new(7), false).is_ok());
        assert!(topic.ensure_editable_by(Snowflake::new(8), true).is_ok());
        assert_eq!(
            topic.ensure_editable_by(Snowflake::new(8), false).unwrap_err().code(),
            "NOT_AUTHOR"
        );
    }

    #[test]
    fn test_locked_topic_refuses_replies() {
        let mut topic = ForumTopic::new(Snowflake::new(1), "t".into(), "b".into(), Snowflake::new(7));
        assert!(topic.ensure_open().is_ok());
        topic.is_locked = true;
        assert_eq!(topic.ensure_open().unwrap_err().code(), "TOPIC_LOCKED");
    }

    #[test]
    fn test_post_edit_rights() {
        let post = ForumPost::new(Snowflake::new(2), Snowflake::new(1), Snowflake::new(7), "hi".into());
        assert!(post.ensure_editable_by(Snowflake::new(7), false).is_ok());
        assert!(post.ensure_editable_by(Snowflake::new(3), false).is_err());
    }
}
