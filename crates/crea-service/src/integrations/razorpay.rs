//! Razorpay payment gateway client
//!
//! Orders are opened over the REST API with basic auth. Checkout callbacks
//! and webhooks are authenticated with hex HMAC-SHA256 signatures, compared
//! in constant time.

use std::time::Duration;

use async_trait::async_trait;
use crea_common::PaymentConfig;
use crea_core::{DomainError, OrderRequest, PaymentGateway, PaymentOrder};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{info, instrument, warn};

type HmacSha256 = Hmac<Sha256>;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// REST client for the Razorpay orders API
#[derive(Clone)]
pub struct RazorpayClient {
    http: reqwest::Client,
    api_base: String,
    key_id: String,
    key_secret: String,
    webhook_secret: String,
}

#[derive(Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    notes: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct OrderBody {
    id: String,
    amount: i64,
    currency: String,
    receipt: Option<String>,
}

impl RazorpayClient {
    /// # Errors
    /// Fails only if the TLS backend cannot be initialised
    pub fn new(config: &PaymentConfig) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::InternalError(format!("http client: {e}")))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            webhook_secret: config.webhook_secret.clone(),
        })
    }
}

impl std::fmt::Debug for RazorpayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayClient")
            .field("api_base", &self.api_base)
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    #[instrument(skip(self, request), fields(receipt = %request.receipt, amount = request.amount))]
    async fn create_order(&self, request: &OrderRequest) -> Result<PaymentOrder, DomainError> {
        let notes = request
            .notes
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        let body = CreateOrderBody {
            amount: request.amount,
            currency: &request.currency,
            receipt: &request.receipt,
            notes,
        };

        let response = self
            .http
            .post(format!("{}/v1/orders", self.api_base))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::ExternalServiceError(format!("razorpay: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, detail = %detail, "Razorpay rejected order");
            return Err(DomainError::ExternalServiceError(format!(
                "razorpay returned {status}"
            )));
        }

        let order: OrderBody = response
            .json()
            .await
            .map_err(|e| DomainError::ExternalServiceError(format!("razorpay: {e}")))?;

        info!(order_id = %order.id, "Payment order created");

        Ok(PaymentOrder {
            id: order.id,
            amount: order.amount,
            currency: order.currency,
            receipt: order.receipt,
        })
    }

    fn verify_payment(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        let payload = format!("{order_id}|{payment_id}");
        verify_signature(self.key_secret.as_bytes(), payload.as_bytes(), signature)
    }

    fn verify_webhook(&self, body: &[u8], signature: &str) -> bool {
        verify_signature(self.webhook_secret.as_bytes(), body, signature)
    }

    fn key_id(&self) -> &str {
        &self.key_id
    }
}

/// Hex HMAC-SHA256 of `payload`
pub fn sign(secret: &[u8], payload: &[u8]) -> String {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return String::new();
    };
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time check of a hex signature
pub fn verify_signature(secret: &[u8], payload: &[u8], signature: &str) -> bool {
    if secret.is_empty() {
        return false;
    }
    let Ok(expected) = hex::decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}
