//! Authentication handlers
//!
//! One-time codes, registration, login, token refresh and password reset.

use axum::{extract::State, Json};
use crea_service::dto::{
    AuthResponse, LoginRequest, LogoutRequest, OtpSentResponse, RefreshTokenRequest,
    RegisterRequest, ResetPasswordRequest, SendOtpRequest,
};
use crea_service::services::AuthService;

use crate::extractors::{AuthUser, OptionalValidatedJson, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Email a one-time code
///
/// POST /auth/otp
pub async fn send_otp(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SendOtpRequest>,
) -> ApiResult<Json<OtpSentResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.send_otp(request).await?;
    Ok(Json(response))
}

/// Register a new account with a signup code
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Rotate a refresh token
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh_tokens(request).await?;
    Ok(Json(response))
}

/// Revoke one refresh token, or every session when none is given
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    OptionalValidatedJson(request): OptionalValidatedJson<LogoutRequest>,
) -> ApiResult<NoContent> {
    let refresh_token = request.and_then(|r| r.refresh_token);

    let service = AuthService::new(state.service_context());
    service.logout(auth.user_id, refresh_token).await?;
    Ok(NoContent)
}

/// Set a new password with a reset code
///
/// POST /auth/password/reset
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    service.reset_password(request).await?;
    Ok(NoContent)
}
