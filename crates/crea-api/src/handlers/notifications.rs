//! Notification handlers
//!
//! Each user sees and manages only their own inbox. Admins may send.

use axum::{
    extract::{Query, State},
    Json,
};
use crea_service::dto::{CreateNotificationRequest, NotificationCountResponse, NotificationListResponse};
use crea_service::services::NotificationService;
use serde::Deserialize;

use crate::extractors::{AdminUser, AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct InboxQuery {
    #[serde(default)]
    pub unread_only: bool,
}

/// GET /notifications/@me?unread_only&before&limit
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<InboxQuery>,
    pagination: Pagination,
) -> ApiResult<Json<NotificationListResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service
        .list_mine(auth.user_id, query.unread_only, pagination.page())
        .await?;
    Ok(Json(response))
}

/// GET /notifications/@me/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<NotificationCountResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.unread_count(auth.user_id).await?))
}

/// POST /notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(notification_id): IdPath,
) -> ApiResult<NoContent> {
    let service = NotificationService::new(state.service_context());
    service.mark_read(auth.user_id, notification_id).await?;
    Ok(NoContent)
}

/// POST /notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<NotificationCountResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.mark_all_read(auth.user_id).await?))
}

/// DELETE /notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(notification_id): IdPath,
) -> ApiResult<NoContent> {
    let service = NotificationService::new(state.service_context());
    service.delete(auth.user_id, notification_id).await?;
    Ok(NoContent)
}

/// Send to one user, or broadcast when `user_id` is absent
///
/// POST /notifications
pub async fn create_notification(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateNotificationRequest>,
) -> ApiResult<Created<Json<NotificationCountResponse>>> {
    let service = NotificationService::new(state.service_context());
    let response = service.create(request).await?;
    Ok(Created(Json(response)))
}
