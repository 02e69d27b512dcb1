//! Outbound ports - mail delivery and the payment gateway

use async_trait::async_trait;

use crate::error::DomainError;

/// Plain-text message to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DomainError>;
}

/// Order to be opened with the gateway before checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Amount in paise.
    pub amount: i64,
    pub currency: String,
    /// Our record id, echoed back by the gateway.
    pub receipt: String,
    pub notes: Vec<(String, String)>,
}

/// Order as acknowledged by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(&self, request: &OrderRequest) -> Result<PaymentOrder, DomainError>;

    /// Checks the checkout callback signature over `order_id|payment_id`.
    fn verify_payment(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;

    /// Checks a webhook signature over the raw request body.
    fn verify_webhook(&self, body: &[u8], signature: &str) -> bool;

    /// Public key handed to the checkout widget.
    fn key_id(&self) -> &str;
}
