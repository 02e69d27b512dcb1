//! Site content mappers

use crea_core::entities::{Achievement, Advertisement, BodyMember, BreakingNews, ExternalLink};
use crea_core::value_objects::Snowflake;

use crate::models::{
    AchievementModel, AdvertisementModel, BodyMemberModel, BreakingNewsModel, ExternalLinkModel,
};

impl From<ExternalLinkModel> for ExternalLink {
    fn from(model: ExternalLinkModel) -> Self {
        ExternalLink {
            id: Snowflake::new(model.id),
            title: model.title,
            url: model.url,
            category: model.category,
            position: model.position,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<BodyMemberModel> for BodyMember {
    fn from(model: BodyMemberModel) -> Self {
        BodyMember {
            id: Snowflake::new(model.id),
            name: model.name,
            designation: model.designation,
            division: model.division,
            phone: model.phone,
            email: model.email,
            photo_url: model.photo_url,
            position: model.position,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<AdvertisementModel> for Advertisement {
    fn from(model: AdvertisementModel) -> Self {
        Advertisement {
            id: Snowflake::new(model.id),
            title: model.title,
            image_url: model.image_url,
            link_url: model.link_url,
            is_active: model.is_active,
            starts_at: model.starts_at,
            ends_at: model.ends_at,
            position: model.position,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<AchievementModel> for Achievement {
    fn from(model: AchievementModel) -> Self {
        Achievement {
            id: Snowflake::new(model.id),
            title: model.title,
            description: model.description,
            achieved_on: model.achieved_on,
            image_url: model.image_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<BreakingNewsModel> for BreakingNews {
    fn from(model: BreakingNewsModel) -> Self {
        BreakingNews {
            id: Snowflake::new(model.id),
            text: model.text,
            link: model.link,
            is_active: model.is_active,
            position: model.position,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
