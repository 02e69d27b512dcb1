//! Membership handlers
//!
//! Application, checkout verification and administration.

use axum::{
    extract::{Query, State},
    Json,
};
use crea_core::entities::MembershipStatus;
use crea_service::dto::{
    ApiResponse, ApplyMembershipRequest, MembershipApplyResponse, MembershipPlansResponse,
    MembershipResponse, PaginatedResponse, RejectMembershipRequest, VerifyPaymentRequest,
};
use crea_service::services::MembershipService;
use serde::Deserialize;

use super::parse_filter;
use crate::extractors::{AdminUser, AuthUser, IdPath, OptionalValidatedJson, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

/// Fees and currency for each plan
///
/// GET /memberships/plans
pub async fn plans(State(state): State<AppState>) -> ApiResult<Json<MembershipPlansResponse>> {
    let service = MembershipService::new(state.service_context());
    Ok(Json(service.plans()?))
}

/// Submit the membership wizard and open a checkout order
///
/// POST /memberships
pub async fn apply(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ApplyMembershipRequest>,
) -> ApiResult<Created<Json<MembershipApplyResponse>>> {
    let service = MembershipService::new(state.service_context());
    let response = service.apply(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Confirm the checkout callback and activate
///
/// POST /memberships/{id}/verify
pub async fn verify_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(membership_id): IdPath,
    ValidatedJson(request): ValidatedJson<VerifyPaymentRequest>,
) -> ApiResult<Json<MembershipResponse>> {
    let service = MembershipService::new(state.service_context());
    let response = service.verify_payment(auth.user_id, membership_id, request).await?;
    Ok(Json(response))
}

/// GET /memberships/@me
pub async fn my_memberships(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<MembershipResponse>>>> {
    let service = MembershipService::new(state.service_context());
    let response = service.my_memberships(auth.user_id).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Owner or admin
///
/// GET /memberships/{id}
pub async fn get_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(membership_id): IdPath,
) -> ApiResult<Json<MembershipResponse>> {
    let service = MembershipService::new(state.service_context());
    let response = service
        .get_membership(auth.user_id, auth.is_admin, membership_id)
        .await?;
    Ok(Json(response))
}

/// GET /memberships?status&before&limit
pub async fn list_memberships(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<StatusQuery>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<MembershipResponse>>> {
    let status = parse_filter::<MembershipStatus>(query.status.as_deref())?;

    let service = MembershipService::new(state.service_context());
    let response = service.list_memberships(status, pagination.page()).await?;
    Ok(Json(response))
}

/// POST /memberships/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(membership_id): IdPath,
    OptionalValidatedJson(request): OptionalValidatedJson<RejectMembershipRequest>,
) -> ApiResult<Json<MembershipResponse>> {
    let reason = request.and_then(|r| r.reason);

    let service = MembershipService::new(state.service_context());
    let response = service.reject(membership_id, reason).await?;
    Ok(Json(response))
}

/// DELETE /memberships/{id}
pub async fn delete_membership(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(membership_id): IdPath,
) -> ApiResult<NoContent> {
    let service = MembershipService::new(state.service_context());
    service.delete_membership(membership_id).await?;
    Ok(NoContent)
}
