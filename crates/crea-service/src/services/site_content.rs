//! Site content service
//!
//! Quick links, office bearers, advertisements, achievements and the
//! breaking-news ticker. Public reads, administrator writes.

use chrono::{DateTime, Utc};
use crea_core::entities::{Achievement, Advertisement, BodyMember, BreakingNews, ExternalLink};
use crea_core::traits::PageQuery;
use crea_core::{is_http_url, DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    AchievementResponse, AdvertisementResponse, BodyMemberResponse, BreakingNewsResponse,
    CreateAchievementRequest, CreateAdvertisementRequest, CreateBodyMemberRequest,
    CreateBreakingNewsRequest, CreateExternalLinkRequest, ExternalLinkResponse, PageOrder,
    PaginatedResponse, UpdateAchievementRequest, UpdateAdvertisementRequest,
    UpdateBodyMemberRequest, UpdateBreakingNewsRequest, UpdateExternalLinkRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::{non_blank, probe};

fn checked_link(url: String) -> Result<String, DomainError> {
    let url = url.trim().to_string();
    if is_http_url(&url) {
        Ok(url)
    } else {
        Err(DomainError::ValidationError(
            "link must be an http(s) URL".to_string(),
        ))
    }
}

fn checked_window(starts_at: Option<DateTime<Utc>>, ends_at: Option<DateTime<Utc>>) -> Result<(), DomainError> {
    match (starts_at, ends_at) {
        (Some(start), Some(end)) if end <= start => Err(DomainError::InvalidSchedule),
        _ => Ok(()),
    }
}

pub struct SiteContentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SiteContentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // External links
    // ========================================================================

    async fn load_link(&self, id: Snowflake) -> ServiceResult<ExternalLink> {
        self.ctx
            .external_link_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::ExternalLinkNotFound(id).into())
    }

    #[instrument(skip(self))]
    pub async fn list_links(&self) -> ServiceResult<Vec<ExternalLinkResponse>> {
        let links = self.ctx.external_link_repo().list().await?;
        Ok(links.iter().map(ExternalLinkResponse::from).collect())
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_link(&self, request: CreateExternalLinkRequest) -> ServiceResult<ExternalLinkResponse> {
        let now = Utc::now();
        let link = ExternalLink {
            id: self.ctx.generate_id(),
            title: request.title.trim().to_string(),
            url: checked_link(request.url)?,
            category: non_blank(request.category),
            position: request.position,
            created_at: now,
            updated_at: now,
        };
        self.ctx.external_link_repo().create(&link).await?;

        info!(link_id = %link.id, "External link created");
        Ok(ExternalLinkResponse::from(&link))
    }

    #[instrument(skip(self, request))]
    pub async fn update_link(&self, id: Snowflake, request: UpdateExternalLinkRequest) -> ServiceResult<ExternalLinkResponse> {
        let mut link = self.load_link(id).await?;

        if let Some(title) = request.title {
            link.title = title.trim().to_string();
        }
        if let Some(url) = request.url {
            link.url = checked_link(url)?;
        }
        if let Some(category) = request.category {
            link.category = non_blank(category);
        }
        if let Some(position) = request.position {
            link.position = position;
        }
        link.updated_at = Utc::now();

        self.ctx.external_link_repo().update(&link).await?;
        Ok(ExternalLinkResponse::from(&link))
    }

    #[instrument(skip(self))]
    pub async fn delete_link(&self, id: Snowflake) -> ServiceResult<()> {
        self.load_link(id).await?;
        self.ctx.external_link_repo().delete(id).await?;

        info!(link_id = %id, "External link deleted");
        Ok(())
    }

    // ========================================================================
    // Body members
    // ========================================================================

    async fn load_body_member(&self, id: Snowflake) -> ServiceResult<BodyMember> {
        self.ctx
            .body_member_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::BodyMemberNotFound(id).into())
    }

    #[instrument(skip(self))]
    pub async fn list_body_members(&self) -> ServiceResult<Vec<BodyMemberResponse>> {
        let members = self.ctx.body_member_repo().list().await?;
        Ok(members.iter().map(BodyMemberResponse::from).collect())
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_body_member(&self, request: CreateBodyMemberRequest) -> ServiceResult<BodyMemberResponse> {
        let now = Utc::now();
        let member = BodyMember {
            id: self.ctx.generate_id(),
            name: request.name.trim().to_string(),
            designation: request.designation.trim().to_string(),
            division: non_blank(request.division),
            phone: non_blank(request.phone),
            email: non_blank(request.email),
            photo_url: non_blank(request.photo_url),
            position: request.position,
            created_at: now,
            updated_at: now,
        };
        self.ctx.body_member_repo().create(&member).await?;

        info!(body_member_id = %member.id, "Body member created");
        Ok(BodyMemberResponse::from(&member))
    }

    #[instrument(skip(self, request))]
    pub async fn update_body_member(&self, id: Snowflake, request: UpdateBodyMemberRequest) -> ServiceResult<BodyMemberResponse> {
        let mut member = self.load_body_member(id).await?;

        if let Some(name) = request.name {
            member.name = name.trim().to_string();
        }
        if let Some(designation) = request.designation {
            member.designation = designation.trim().to_string();
        }
        if let Some(division) = request.division {
            member.division = non_blank(division);
        }
        if let Some(phone) = request.phone {
            member.phone = non_blank(phone);
        }
        if let Some(email) = request.email {
            member.email = non_blank(email);
        }
        if let Some(photo_url) = request.photo_url {
            member.photo_url = non_blank(photo_url);
        }
        if let Some(position) = request.position {
            member.position = position;
        }
        member.updated_at = Utc::now();

        self.ctx.body_member_repo().update(&member).await?;
        Ok(BodyMemberResponse::from(&member))
    }

    #[instrument(skip(self))]
    pub async fn delete_body_member(&self, id: Snowflake) -> ServiceResult<()> {
        self.load_body_member(id).await?;
        self.ctx.body_member_repo().delete(id).await?;

        info!(body_member_id = %id, "Body member deleted");
        Ok(())
    }

    // ========================================================================
    // Advertisements
    // ========================================================================

    async fn load_advertisement(&self, id: Snowflake) -> ServiceResult<Advertisement> {
        self.ctx
            .advertisement_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::AdvertisementNotFound(id).into())
    }

    /// Live ads only, unless `all` is set for the admin view
    #[instrument(skip(self))]
    pub async fn list_advertisements(&self, all: bool) -> ServiceResult<Vec<AdvertisementResponse>> {
        let live_at = if all { None } else { Some(Utc::now()) };
        let ads = self.ctx.advertisement_repo().list(live_at).await?;
        Ok(ads.iter().map(AdvertisementResponse::from).collect())
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_advertisement(&self, request: CreateAdvertisementRequest) -> ServiceResult<AdvertisementResponse> {
        checked_window(request.starts_at, request.ends_at)?;

        let now = Utc::now();
        let ad = Advertisement {
            id: self.ctx.generate_id(),
            title: request.title.trim().to_string(),
            image_url: request.image_url.trim().to_string(),
            link_url: non_blank(request.link_url).map(checked_link).transpose()?,
            is_active: request.is_active,
            starts_at: request.starts_at,
            ends_at: request.ends_at,
            position: request.position,
            created_at: now,
            updated_at: now,
        };
        self.ctx.advertisement_repo().create(&ad).await?;

        info!(advertisement_id = %ad.id, "Advertisement created");
        Ok(AdvertisementResponse::from(&ad))
    }

    #[instrument(skip(self, request))]
    pub async fn update_advertisement(
        &self,
        id: Snowflake,
        request: UpdateAdvertisementRequest,
    ) -> ServiceResult<AdvertisementResponse> {
        let mut ad = self.load_advertisement(id).await?;

        if let Some(title) = request.title {
            ad.title = title.trim().to_string();
        }
        if let Some(image_url) = request.image_url {
            ad.image_url = image_url.trim().to_string();
        }
        if let Some(link_url) = request.link_url {
            ad.link_url = non_blank(link_url).map(checked_link).transpose()?;
        }
        if let Some(is_active) = request.is_active {
            ad.is_active = is_active;
        }
        if let Some(starts_at) = request.starts_at {
            ad.starts_at = starts_at;
        }
        if let Some(ends_at) = request.ends_at {
            ad.ends_at = ends_at;
        }
        if let Some(position) = request.position {
            ad.position = position;
        }
        checked_window(ad.starts_at, ad.ends_at)?;
        ad.updated_at = Utc::now();

        self.ctx.advertisement_repo().update(&ad).await?;
        Ok(AdvertisementResponse::from(&ad))
    }

    #[instrument(skip(self))]
    pub async fn delete_advertisement(&self, id: Snowflake) -> ServiceResult<()> {
        self.load_advertisement(id).await?;
        self.ctx.advertisement_repo().delete(id).await?;

        info!(advertisement_id = %id, "Advertisement deleted");
        Ok(())
    }

    // ========================================================================
    // Achievements
    // ========================================================================

    async fn load_achievement(&self, id: Snowflake) -> ServiceResult<Achievement> {
        self.ctx
            .achievement_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::AchievementNotFound(id).into())
    }

    #[instrument(skip(self))]
    pub async fn list_achievements(&self, page: PageQuery) -> ServiceResult<PaginatedResponse<AchievementResponse>> {
        let rows = self.ctx.achievement_repo().list(probe(page)).await?;
        Ok(PaginatedResponse::from_rows(
            rows,
            page,
            PageOrder::NewestFirst,
            |a| a.id,
            |a| AchievementResponse::from(&a),
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_achievement(&self, id: Snowflake) -> ServiceResult<AchievementResponse> {
        Ok(AchievementResponse::from(&self.load_achievement(id).await?))
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_achievement(&self, request: CreateAchievementRequest) -> ServiceResult<AchievementResponse> {
        let now = Utc::now();
        let achievement = Achievement {
            id: self.ctx.generate_id(),
            title: request.title.trim().to_string(),
            description: non_blank(request.description),
            achieved_on: request.achieved_on,
            image_url: non_blank(request.image_url),
            created_at: now,
            updated_at: now,
        };
        self.ctx.achievement_repo().create(&achievement).await?;

        info!(achievement_id = %achievement.id, "Achievement created");
        Ok(AchievementResponse::from(&achievement))
    }

    #[instrument(skip(self, request))]
    pub async fn update_achievement(&self, id: Snowflake, request: UpdateAchievementRequest) -> ServiceResult<AchievementResponse> {
        let mut achievement = self.load_achievement(id).await?;

        if let Some(title) = request.title {
            achievement.title = title.trim().to_string();
        }
        if let Some(description) = request.description {
            achievement.description = non_blank(description);
        }
        if let Some(achieved_on) = request.achieved_on {
            achievement.achieved_on = achieved_on;
        }
        if let Some(image_url) = request.image_url {
            achievement.image_url = non_blank(image_url);
        }
        achievement.updated_at = Utc::now();

        self.ctx.achievement_repo().update(&achievement).await?;
        Ok(AchievementResponse::from(&achievement))
    }

    #[instrument(skip(self))]
    pub async fn delete_achievement(&self, id: Snowflake) -> ServiceResult<()> {
        self.load_achievement(id).await?;
        self.ctx.achievement_repo().delete(id).await?;

        info!(achievement_id = %id, "Achievement deleted");
        Ok(())
    }

    // ========================================================================
    // Breaking news
    // ========================================================================

    async fn load_breaking_news(&self, id: Snowflake) -> ServiceResult<BreakingNews> {
        self.ctx
            .breaking_news_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::BreakingNewsNotFound(id).into())
    }

    /// Active items only, unless `all` is set for the admin view
    #[instrument(skip(self))]
    pub async fn list_breaking_news(&self, all: bool) -> ServiceResult<Vec<BreakingNewsResponse>> {
        let items = self.ctx.breaking_news_repo().list(!all).await?;
        Ok(items.iter().map(BreakingNewsResponse::from).collect())
    }

    #[instrument(skip(self, request))]
    pub async fn create_breaking_news(&self, request: CreateBreakingNewsRequest) -> ServiceResult<BreakingNewsResponse> {
        let now = Utc::now();
        let item = BreakingNews {
            id: self.ctx.generate_id(),
            text: request.text.trim().to_string(),
            link: non_blank(request.link),
            is_active: request.is_active,
            position: request.position,
            created_at: now,
            updated_at: now,
        };
        self.ctx.breaking_news_repo().create(&item).await?;

        info!(breaking_news_id = %item.id, "Breaking news created");
        Ok(BreakingNewsResponse::from(&item))
    }

    #[instrument(skip(self, request))]
    pub async fn update_breaking_news(&self, id: Snowflake, request: UpdateBreakingNewsRequest) -> ServiceResult<BreakingNewsResponse> {
        let mut item = self.load_breaking_news(id).await?;

        if let Some(text) = request.text {
            item.text = text.trim().to_string();
        }
        if let Some(link) = request.link {
            item.link = non_blank(link);
        }
        if let Some(is_active) = request.is_active {
            item.is_active = is_active;
        }
        if let Some(position) = request.position {
            item.position = position;
        }
        item.updated_at = Utc::now();

        self.ctx.breaking_news_repo().update(&item).await?;
        Ok(BreakingNewsResponse::from(&item))
    }

    #[instrument(skip(self))]
    pub async fn delete_breaking_news(&self, id: Snowflake) -> ServiceResult<()> {
        self.load_breaking_news(id).await?;
        self.ctx.breaking_news_repo().delete(id).await?;

        info!(breaking_news_id = %id, "Breaking news deleted");
        Ok(())
    }
}
