//! User handlers
//!
//! The caller's own profile plus account administration.

use axum::{
    extract::{Query, State},
    Json,
};
use crea_core::entities::UserRole;
use crea_core::traits::UserFilter;
use crea_service::dto::{
    ChangePasswordRequest, PaginatedResponse, SetActiveRequest, UpdateProfileRequest,
    UpdateRoleRequest, UserResponse,
};
use crea_service::services::UserService;
use serde::Deserialize;

use super::parse_filter;
use crate::extractors::{AdminUser, AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Filters for the admin user listing
#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
    pub search: Option<String>,
}

impl UserListQuery {
    fn into_filter(self) -> ApiResult<UserFilter> {
        let role = parse_filter::<UserRole>(self.role.as_deref())?;
        let search = self.search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Ok(UserFilter { role, search })
    }
}

/// Get the current user
///
/// GET /users/@me
pub async fn get_current_user(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Update the current user's profile
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_current_user(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Change the current user's password
///
/// POST /users/@me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.change_password(auth.user_id, request).await?;
    Ok(NoContent)
}

/// List accounts
///
/// GET /users?role&search&before&limit
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<UserListQuery>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<UserResponse>>> {
    let filter = query.into_filter()?;

    let service = UserService::new(state.service_context());
    let response = service.list_users(filter, pagination.page()).await?;
    Ok(Json(response))
}

/// Get a user by ID
///
/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}

/// Change a user's role
///
/// PATCH /users/{id}/role
pub async fn update_role(
    State(state): State<AppState>,
    admin: AdminUser,
    IdPath(user_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateRoleRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_role(admin.user_id(), user_id, &request.role).await?;
    Ok(Json(response))
}

/// Enable or disable an account
///
/// PATCH /users/{id}/status
pub async fn set_active(
    State(state): State<AppState>,
    admin: AdminUser,
    IdPath(user_id): IdPath,
    ValidatedJson(request): ValidatedJson<SetActiveRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.set_active(admin.user_id(), user_id, request.is_active).await?;
    Ok(Json(response))
}

/// Soft-delete an account
///
/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    IdPath(user_id): IdPath,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.delete_user(admin.user_id(), user_id).await?;
    Ok(NoContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_filters_are_dropped() {
        let query = UserListQuery {
            role: Some(String::new()),
            search: Some("   ".to_string()),
        };
        let filter = query.into_filter().unwrap();
        assert!(filter.role.is_none());
        assert!(filter.search.is_none());
    }

    #[test]
    fn test_role_filter_is_parsed() {
        let query = UserListQuery {
            role: Some("admin".to_string()),
            search: Some(" ravi ".to_string()),
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.role, Some(UserRole::Admin));
        assert_eq!(filter.search.as_deref(), Some("ravi"));

        let bad = UserListQuery {
            role: Some("owner".to_string()),
            search: None,
        };
        assert!(bad.into_filter().is_err());
    }
}
