//! Setting handlers

use axum::{
    extract::{Path, State},
    Json,
};
use crea_service::dto::{ApiResponse, PutSettingRequest, SettingResponse};
use crea_service::services::SettingService;

use crate::extractors::{AdminUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// GET /settings
pub async fn list_settings(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<SettingResponse>>>> {
    let service = SettingService::new(state.service_context());
    Ok(Json(ApiResponse::new(service.list().await?)))
}

/// GET /settings/{key}
pub async fn get_setting(State(state): State<AppState>, Path(key): Path<String>) -> ApiResult<Json<SettingResponse>> {
    let service = SettingService::new(state.service_context());
    Ok(Json(service.get(&key).await?))
}

/// Create or replace
///
/// PUT /settings/{key}
pub async fn put_setting(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(key): Path<String>,
    ValidatedJson(request): ValidatedJson<PutSettingRequest>,
) -> ApiResult<Json<SettingResponse>> {
    let service = SettingService::new(state.service_context());
    Ok(Json(service.put(&key, request.value).await?))
}

/// DELETE /settings/{key}
pub async fn delete_setting(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(key): Path<String>,
) -> ApiResult<NoContent> {
    let service = SettingService::new(state.service_context());
    service.delete(&key).await?;
    Ok(NoContent)
}
