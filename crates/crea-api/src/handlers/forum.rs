//! Forum handlers
//!
//! Reads are public. Authors edit their own topics and posts; admins can
//! edit anything and alone may pin or lock.

use axum::{
    extract::{Query, State},
    Json,
};
use crea_service::dto::{
    CreatePostRequest, CreateTopicRequest, PaginatedResponse, PostResponse, TopicListResponse,
    TopicResponse, UpdatePostRequest, UpdateTopicRequest,
};
use crea_service::services::ForumService;

use super::documents::CategoryQuery;
use crate::extractors::{AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List topics, pinned first
///
/// GET /forum/topics?category&before&limit
pub async fn list_topics(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
    pagination: Pagination,
) -> ApiResult<Json<TopicListResponse>> {
    let service = ForumService::new(state.service_context());
    let response = service.list_topics(query.category(), pagination.page()).await?;
    Ok(Json(response))
}

/// GET /forum/topics/{id}
pub async fn get_topic(State(state): State<AppState>, IdPath(topic_id): IdPath) -> ApiResult<Json<TopicResponse>> {
    let service = ForumService::new(state.service_context());
    Ok(Json(service.get_topic(topic_id).await?))
}

/// POST /forum/topics
pub async fn create_topic(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateTopicRequest>,
) -> ApiResult<Created<Json<TopicResponse>>> {
    let service = ForumService::new(state.service_context());
    let response = service.create_topic(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// PATCH /forum/topics/{id}
pub async fn update_topic(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(topic_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateTopicRequest>,
) -> ApiResult<Json<TopicResponse>> {
    let service = ForumService::new(state.service_context());
    Ok(Json(service.update_topic(auth.actor(), topic_id, request).await?))
}

/// Delete a topic together with its posts
///
/// DELETE /forum/topics/{id}
pub async fn delete_topic(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(topic_id): IdPath,
) -> ApiResult<NoContent> {
    let service = ForumService::new(state.service_context());
    service.delete_topic(auth.actor(), topic_id).await?;
    Ok(NoContent)
}

/// List replies, oldest first
///
/// GET /forum/topics/{id}/posts?after&limit
pub async fn list_posts(
    State(state): State<AppState>,
    IdPath(topic_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = ForumService::new(state.service_context());
    let response = service.list_posts(topic_id, pagination.page()).await?;
    Ok(Json(response))
}

/// POST /forum/topics/{id}/posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(topic_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = ForumService::new(state.service_context());
    let response = service.create_post(auth.user_id, topic_id, request).await?;
    Ok(Created(Json(response)))
}

/// PATCH /forum/posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = ForumService::new(state.service_context());
    Ok(Json(service.update_post(auth.actor(), post_id, request).await?))
}

/// DELETE /forum/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<NoContent> {
    let service = ForumService::new(state.service_context());
    service.delete_post(auth.actor(), post_id).await?;
    Ok(NoContent)
}
