//! Site content handlers
//!
//! Public reads with admin-managed writes for the homepage blocks.

use axum::{
    extract::{Query, State},
    Json,
};
use crea_core::DomainError;
use crea_service::dto::{
    AchievementResponse, AdvertisementResponse, ApiResponse, BodyMemberResponse,
    BreakingNewsResponse, CreateAchievementRequest, CreateAdvertisementRequest,
    CreateBodyMemberRequest, CreateBreakingNewsRequest, CreateExternalLinkRequest,
    ExternalLinkResponse, PaginatedResponse, UpdateAchievementRequest, UpdateAdvertisementRequest,
    UpdateBodyMemberRequest, UpdateBreakingNewsRequest, UpdateExternalLinkRequest,
};
use crea_service::services::SiteContentService;
use serde::Deserialize;

use crate::extractors::{AdminUser, IdPath, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// `?all=true` widens a list to inactive entries
#[derive(Debug, Default, Deserialize)]
pub struct VisibilityQuery {
    #[serde(default)]
    pub all: bool,
}

impl VisibilityQuery {
    /// Only admins may see inactive entries.
    fn include_inactive(&self, auth: OptionalAuthUser) -> ApiResult<bool> {
        if !self.all {
            return Ok(false);
        }
        match auth.0 {
            None => Err(ApiError::MissingAuth),
            Some(user) if !user.is_admin => Err(DomainError::AdminRequired.into()),
            Some(_) => Ok(true),
        }
    }
}

// ============================================================================
// External links
// ============================================================================

/// GET /external-links
pub async fn list_links(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<ExternalLinkResponse>>>> {
    let service = SiteContentService::new(state.service_context());
    Ok(Json(ApiResponse::new(service.list_links().await?)))
}

/// POST /external-links
pub async fn create_link(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateExternalLinkRequest>,
) -> ApiResult<Created<Json<ExternalLinkResponse>>> {
    let service = SiteContentService::new(state.service_context());
    Ok(Created(Json(service.create_link(request).await?)))
}

/// PATCH /external-links/{id}
pub async fn update_link(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateExternalLinkRequest>,
) -> ApiResult<Json<ExternalLinkResponse>> {
    let service = SiteContentService::new(state.service_context());
    Ok(Json(service.update_link(id, request).await?))
}

/// DELETE /external-links/{id}
pub async fn delete_link(State(state): State<AppState>, _admin: AdminUser, IdPath(id): IdPath) -> ApiResult<NoContent> {
    let service = SiteContentService::new(state.service_context());
    service.delete_link(id).await?;
    Ok(NoContent)
}

// ============================================================================
// Body members
// ============================================================================

/// GET /body-members
pub async fn list_body_members(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<BodyMemberResponse>>>> {
    let service = SiteContentService::new(state.service_context());
    Ok(Json(ApiResponse::new(service.list_body_members().await?)))
}

/// POST /body-members
pub async fn create_body_member(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateBodyMemberRequest>,
) -> ApiResult<Created<Json<BodyMemberResponse>>> {
    let service = SiteContentService::new(state.service_context());
    Ok(Created(Json(service.create_body_member(request).await?)))
}

/// PATCH /body-members/{id}
pub async fn update_body_member(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateBodyMemberRequest>,
) -> ApiResult<Json<BodyMemberResponse>> {
    let service = SiteContentService::new(state.service_context());
    Ok(Json(service.update_body_member(id, request).await?))
}

/// DELETE /body-members/{id}
pub async fn delete_body_member(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = SiteContentService::new(state.service_context());
    service.delete_body_member(id).await?;
    Ok(NoContent)
}

// ============================================================================
// Advertisements
// ============================================================================

/// Live ads, or every ad for an admin passing `?all=true`
///
/// GET /advertisements
pub async fn list_advertisements(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Json<ApiResponse<Vec<AdvertisementResponse>>>> {
    let all = query.include_inactive(auth)?;

    let service = SiteContentService::new(state.service_context());
    Ok(Json(ApiResponse::new(service.list_advertisements(all).await?)))
}

/// POST /advertisements
pub async fn create_advertisement(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateAdvertisementRequest>,
) -> ApiResult<Created<Json<AdvertisementResponse>>> {
    let service = SiteContentService::new(state.service_context());
    Ok(Created(Json(service.create_advertisement(request).await?)))
}

/// PATCH /advertisements/{id}
pub async fn update_advertisement(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateAdvertisementRequest>,
) -> ApiResult<Json<AdvertisementResponse>> {
    let service = SiteContentService::new(state.service_context());
    Ok(Json(service.update_advertisement(id, request).await?))
}

/// DELETE /advertisements/{id}
pub async fn delete_advertisement(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = SiteContentService::new(state.service_context());
    service.delete_advertisement(id).await?;
    Ok(NoContent)
}

// ============================================================================
// Achievements
// ============================================================================

/// GET /achievements?before&limit
pub async fn list_achievements(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<AchievementResponse>>> {
    let service = SiteContentService::new(state.service_context());
    Ok(Json(service.list_achievements(pagination.page()).await?))
}

/// GET /achievements/{id}
pub async fn get_achievement(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Json<AchievementResponse>> {
    let service = SiteContentService::new(state.service_context());
    Ok(Json(service.get_achievement(id).await?))
}

/// POST /achievements
pub async fn create_achievement(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateAchievementRequest>,
) -> ApiResult<Created<Json<AchievementResponse>>> {
    let service = SiteContentService::new(state.service_context());
    Ok(Created(Json(service.create_achievement(request).await?)))
}

/// PATCH /achievements/{id}
pub async fn update_achievement(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateAchievementRequest>,
) -> ApiResult<Json<AchievementResponse>> {
    let service = SiteContentService::new(state.service_context());
    Ok(Json(service.update_achievement(id, request).await?))
}

/// DELETE /achievements/{id}
pub async fn delete_achievement(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = SiteContentService::new(state.service_context());
    service.delete_achievement(id).await?;
    Ok(NoContent)
}

// ============================================================================
// Breaking news
// ============================================================================

/// GET /breaking-news
pub async fn list_breaking_news(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Json<ApiResponse<Vec<BreakingNewsResponse>>>> {
    let all = query.include_inactive(auth)?;

    let service = SiteContentService::new(state.service_context());
    Ok(Json(ApiResponse::new(service.list_breaking_news(all).await?)))
}

/// POST /breaking-news
pub async fn create_breaking_news(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateBreakingNewsRequest>,
) -> ApiResult<Created<Json<BreakingNewsResponse>>> {
    let service = SiteContentService::new(state.service_context());
    Ok(Created(Json(service.create_breaking_news(request).await?)))
}

/// PATCH /breaking-news/{id}
pub async fn update_breaking_news(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateBreakingNewsRequest>,
) -> ApiResult<Json<BreakingNewsResponse>> {
    let service = SiteContentService::new(state.service_context());
    Ok(Json(service.update_breaking_news(id, request).await?))
}

/// DELETE /breaking-news/{id}
pub async fn delete_breaking_news(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = SiteContentService::new(state.service_context());
    service.delete_breaking_news(id).await?;
    Ok(NoContent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::AuthUser;
    use crea_core::Snowflake;

    #[test]
    fn test_visibility_defaults_to_live_only() {
        let query = VisibilityQuery::default();
        assert!(!query.include_inactive(OptionalAuthUser(None)).unwrap());
    }

    #[test]
    fn test_all_requires_admin() {
        let query = VisibilityQuery { all: true };
        let member = OptionalAuthUser(Some(AuthUser::new(Snowflake::new(1), false)));
        let admin = OptionalAuthUser(Some(AuthUser::new(Snowflake::new(2), true)));

        assert!(matches!(query.include_inactive(OptionalAuthUser(None)), Err(ApiError::MissingAuth)));
        assert_eq!(
            query.include_inactive(member).unwrap_err().error_code(),
            "ADMIN_REQUIRED"
        );
        assert!(query.include_inactive(admin).unwrap());
    }
}
