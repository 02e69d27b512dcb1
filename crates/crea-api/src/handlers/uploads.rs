//! Image upload handler

use axum::{extract::State, Json};
use crea_service::dto::UploadResponse;
use crea_service::services::UploadService;

use crate::extractors::{AdminUser, FileUpload};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Store an image for use by events, body members, ads and achievements
///
/// POST /uploads/images
pub async fn upload_image(
    State(state): State<AppState>,
    admin: AdminUser,
    FileUpload(file): FileUpload,
) -> ApiResult<Created<Json<UploadResponse>>> {
    let service = UploadService::new(state.service_context());
    let response = service.upload_image(admin.user_id(), file).await?;
    Ok(Created(Json(response)))
}
