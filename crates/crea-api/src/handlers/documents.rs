//! Document handlers
//!
//! Circulars, manuals and court cases. Creation takes a multipart form
//! carrying either a `url` field or a `file` part; updates are JSON
//! metadata only.

use axum::{
    extract::{Query, State},
    Json,
};
use crea_core::entities::CourtCaseStatus;
use crea_service::dto::{
    CircularResponse, CourtCaseResponse, CreateCircularRequest, CreateCourtCaseRequest,
    CreateManualRequest, ManualResponse, PaginatedResponse, UpdateCircularRequest,
    UpdateCourtCaseRequest, UpdateManualRequest,
};
use crea_service::services::DocumentService;
use serde::Deserialize;

use super::parse_filter;
use crate::extractors::{AdminUser, DocumentForm, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

impl CategoryQuery {
    pub(crate) fn category(&self) -> Option<&str> {
        self.category.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CourtCaseQuery {
    pub status: Option<String>,
}

// ============================================================================
// Circulars
// ============================================================================

/// GET /circulars?category&before&limit
pub async fn list_circulars(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<CircularResponse>>> {
    let service = DocumentService::new(state.service_context());
    let response = service.list_circulars(query.category(), pagination.page()).await?;
    Ok(Json(response))
}

/// GET /circulars/{id}
pub async fn get_circular(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Json<CircularResponse>> {
    let service = DocumentService::new(state.service_context());
    Ok(Json(service.get_circular(id).await?))
}

/// POST /circulars
pub async fn create_circular(
    State(state): State<AppState>,
    admin: AdminUser,
    form: DocumentForm<CreateCircularRequest>,
) -> ApiResult<Created<Json<CircularResponse>>> {
    let service = DocumentService::new(state.service_context());
    let response = service.create_circular(admin.user_id(), form.data, form.file).await?;
    Ok(Created(Json(response)))
}

/// PATCH /circulars/{id}
pub async fn update_circular(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateCircularRequest>,
) -> ApiResult<Json<CircularResponse>> {
    let service = DocumentService::new(state.service_context());
    Ok(Json(service.update_circular(id, request).await?))
}

/// DELETE /circulars/{id}
pub async fn delete_circular(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = DocumentService::new(state.service_context());
    service.delete_circular(id).await?;
    Ok(NoContent)
}

// ============================================================================
// Manuals
// ============================================================================

/// GET /manuals?category&before&limit
pub async fn list_manuals(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<ManualResponse>>> {
    let service = DocumentService::new(state.service_context());
    let response = service.list_manuals(query.category(), pagination.page()).await?;
    Ok(Json(response))
}

/// GET /manuals/{id}
pub async fn get_manual(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Json<ManualResponse>> {
    let service = DocumentService::new(state.service_context());
    Ok(Json(service.get_manual(id).await?))
}

/// POST /manuals
pub async fn create_manual(
    State(state): State<AppState>,
    admin: AdminUser,
    form: DocumentForm<CreateManualRequest>,
) -> ApiResult<Created<Json<ManualResponse>>> {
    let service = DocumentService::new(state.service_context());
    let response = service.create_manual(admin.user_id(), form.data, form.file).await?;
    Ok(Created(Json(response)))
}

/// PATCH /manuals/{id}
pub async fn update_manual(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateManualRequest>,
) -> ApiResult<Json<ManualResponse>> {
    let service = DocumentService::new(state.service_context());
    Ok(Json(service.update_manual(id, request).await?))
}

/// DELETE /manuals/{id}
pub async fn delete_manual(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = DocumentService::new(state.service_context());
    service.delete_manual(id).await?;
    Ok(NoContent)
}

// ============================================================================
// Court cases
// ============================================================================

/// GET /court-cases?status&before&limit
pub async fn list_court_cases(
    State(state): State<AppState>,
    Query(query): Query<CourtCaseQuery>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<CourtCaseResponse>>> {
    let status = parse_filter::<CourtCaseStatus>(query.status.as_deref())?;

    let service = DocumentService::new(state.service_context());
    let response = service.list_court_cases(status, pagination.page()).await?;
    Ok(Json(response))
}

/// GET /court-cases/{id}
pub async fn get_court_case(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Json<CourtCaseResponse>> {
    let service = DocumentService::new(state.service_context());
    Ok(Json(service.get_court_case(id).await?))
}

/// POST /court-cases
///
/// The document is optional here.
pub async fn create_court_case(
    State(state): State<AppState>,
    admin: AdminUser,
    form: DocumentForm<CreateCourtCaseRequest>,
) -> ApiResult<Created<Json<CourtCaseResponse>>> {
    let service = DocumentService::new(state.service_context());
    let response = service.create_court_case(admin.user_id(), form.data, form.file).await?;
    Ok(Created(Json(response)))
}

/// PATCH /court-cases/{id}
pub async fn update_court_case(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateCourtCaseRequest>,
) -> ApiResult<Json<CourtCaseResponse>> {
    let service = DocumentService::new(state.service_context());
    Ok(Json(service.update_court_case(id, request).await?))
}

/// DELETE /court-cases/{id}
pub async fn delete_court_case(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = DocumentService::new(state.service_context());
    service.delete_court_case(id).await?;
    Ok(NoContent)
}
