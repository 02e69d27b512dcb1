//! Donation handlers
//!
//! Anyone may donate; a signed-in donor's pledge is linked to their account.

use axum::{
    extract::{Query, State},
    Json,
};
use crea_core::entities::DonationStatus;
use crea_service::dto::{
    CreateDonationRequest, CreateDonationResponse, DonationResponse, PaginatedResponse,
    VerifyPaymentRequest,
};
use crea_service::services::DonationService;

use super::memberships::StatusQuery;
use super::parse_filter;
use crate::extractors::{AdminUser, AuthUser, IdPath, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /donations
pub async fn create_donation(
    State(state): State<AppState>,
    OptionalAuthUser(auth): OptionalAuthUser,
    ValidatedJson(request): ValidatedJson<CreateDonationRequest>,
) -> ApiResult<Created<Json<CreateDonationResponse>>> {
    let service = DonationService::new(state.service_context());
    let response = service.create_donation(auth.map(|a| a.user_id), request).await?;
    Ok(Created(Json(response)))
}

/// POST /donations/{id}/verify
pub async fn verify_payment(
    State(state): State<AppState>,
    IdPath(donation_id): IdPath,
    ValidatedJson(request): ValidatedJson<VerifyPaymentRequest>,
) -> ApiResult<Json<DonationResponse>> {
    let service = DonationService::new(state.service_context());
    let response = service.verify_payment(donation_id, request).await?;
    Ok(Json(response))
}

/// GET /donations/@me
pub async fn my_donations(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<DonationResponse>>> {
    let service = DonationService::new(state.service_context());
    let response = service.my_donations(auth.user_id, pagination.page()).await?;
    Ok(Json(response))
}

/// GET /donations?status&before&limit
pub async fn list_donations(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<StatusQuery>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<DonationResponse>>> {
    let status = parse_filter::<DonationStatus>(query.status.as_deref())?;

    let service = DonationService::new(state.service_context());
    let response = service.list_donations(status, pagination.page()).await?;
    Ok(Json(response))
}

/// GET /donations/{id}
pub async fn get_donation(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(donation_id): IdPath,
) -> ApiResult<Json<DonationResponse>> {
    let service = DonationService::new(state.service_context());
    Ok(Json(service.get_donation(donation_id).await?))
}
