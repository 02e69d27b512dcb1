//! Event, forum, notification and setting mappers

use crea_core::entities::{Event, ForumPost, ForumTopic, Notification, Setting};
use crea_core::value_objects::Snowflake;

use crate::models::{EventModel, ForumPostModel, ForumTopicModel, NotificationModel, SettingModel};

impl From<EventModel> for Event {
    fn from(model: EventModel) -> Self {
        Event {
            id: Snowflake::new(model.id),
            title: model.title,
            description: model.description,
            location: model.location,
            starts_at: model.starts_at,
            ends_at: model.ends_at,
            image_url: model.image_url,
            created_by: Snowflake::new(model.created_by),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ForumTopicModel> for ForumTopic {
    fn from(model: ForumTopicModel) -> Self {
        ForumTopic {
            id: Snowflake::new(model.id),
            title: model.title,
            body: model.body,
            category: model.category,
            author_id: Snowflake::new(model.author_id),
            is_pinned: model.is_pinned,
            is_locked: model.is_locked,
            post_count: model.post_count,
            last_post_at: model.last_post_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ForumPostModel> for ForumPost {
    fn from(model: ForumPostModel) -> Self {
        ForumPost {
            id: Snowflake::new(model.id),
            topic_id: Snowflake::new(model.topic_id),
            author_id: Snowflake::new(model.author_id),
            body: model.body,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            title: model.title,
            message: model.message,
            link: model.link,
            read_at: model.read_at,
            created_at: model.created_at,
        }
    }
}

impl From<SettingModel> for Setting {
    fn from(model: SettingModel) -> Self {
        Setting {
            key: model.key,
            value: model.value,
            updated_at: model.updated_at,
        }
    }
}
