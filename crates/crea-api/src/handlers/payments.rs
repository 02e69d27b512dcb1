//! Payment gateway webhook

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};
use crea_core::DomainError;
use crea_service::dto::WebhookResponse;
use crea_service::services::PaymentService;

use crate::response::ApiResult;
use crate::state::AppState;

/// Header carrying the hex HMAC of the raw body
pub const SIGNATURE_HEADER: &str = "x-razorpay-signature";

/// The signature covers the exact bytes received, so the body is taken raw.
///
/// POST /payments/webhook
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<WebhookResponse>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(DomainError::PaymentVerificationFailed)?;

    let service = PaymentService::new(state.service_context());
    let response = service.handle_webhook(&body, signature).await?;
    Ok(Json(response))
}
