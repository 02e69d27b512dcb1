//! Payment webhook handling
//!
//! The gateway reports captures and failures here independently of the
//! browser checkout callback. Events for orders this portal did not create
//! are acknowledged and ignored so the gateway stops retrying.

use crea_core::DomainError;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::dto::WebhookResponse;

use super::context::ServiceContext;
use super::donation::DonationService;
use super::error::{ServiceError, ServiceResult};
use super::membership::MembershipService;

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    event: String,
    #[serde(default)]
    payload: WebhookPayload,
}

#[derive(Debug, Default, Deserialize)]
struct WebhookPayload {
    payment: Option<Wrapped<PaymentEntity>>,
    order: Option<Wrapped<OrderEntity>>,
}

#[derive(Debug, Deserialize)]
struct Wrapped<T> {
    entity: T,
}

#[derive(Debug, Deserialize)]
struct PaymentEntity {
    id: String,
    order_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrderEntity {
    id: String,
}

/// What a webhook asks the portal to do
#[derive(Debug, PartialEq, Eq)]
enum WebhookAction {
    Captured { order_id: String, payment_id: String },
    Failed { order_id: String },
    Ignore,
}

impl WebhookEvent {
    fn order_id(&self) -> Option<String> {
        let payment = self.payload.payment.as_ref().and_then(|p| p.entity.order_id.clone());
        payment.or_else(|| self.payload.order.as_ref().map(|o| o.entity.id.clone()))
    }

    fn payment_id(&self) -> Option<String> {
        self.payload.payment.as_ref().map(|p| p.entity.id.clone())
    }

    fn action(&self) -> WebhookAction {
        match self.event.as_str() {
            "payment.captured" | "order.paid" => match (self.order_id(), self.payment_id()) {
                (Some(order_id), Some(payment_id)) => WebhookAction::Captured { order_id, payment_id },
                _ => WebhookAction::Ignore,
            },
            "payment.failed" => match self.order_id() {
                Some(order_id) => WebhookAction::Failed { order_id },
                None => WebhookAction::Ignore,
            },
            _ => WebhookAction::Ignore,
        }
    }
}

pub struct PaymentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PaymentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Verify the signature over the raw body, then settle the matching
    /// membership or donation.
    #[instrument(skip(self, body, signature), fields(size = body.len()))]
    pub async fn handle_webhook(&self, body: &[u8], signature: &str) -> ServiceResult<WebhookResponse> {
        if !self.ctx.payment_gateway().verify_webhook(body, signature) {
            warn!("Webhook refused: bad signature");
            return Err(DomainError::PaymentVerificationFailed.into());
        }

        let event: WebhookEvent = serde_json::from_slice(body)
            .map_err(|e| ServiceError::validation(format!("malformed webhook payload: {e}")))?;

        match event.action() {
            WebhookAction::Captured { order_id, payment_id } => self.captured(&order_id, &payment_id).await,
            WebhookAction::Failed { order_id } => self.failed(&order_id).await,
            WebhookAction::Ignore => {
                info!(event = %event.event, "Webhook ignored");
                Ok(WebhookResponse::ignored())
            }
        }
    }

    async fn captured(&self, order_id: &str, payment_id: &str) -> ServiceResult<WebhookResponse> {
        if let Some(membership) = self.ctx.membership_repo().find_by_order_id(order_id).await? {
            let membership_id = membership.id;
            return match MembershipService::new(self.ctx)
                .activate_after_payment(membership, payment_id)
                .await
            {
                Ok(_) => Ok(WebhookResponse::processed()),
                Err(ServiceError::Domain(DomainError::InvalidStatusTransition { from, .. })) => {
                    warn!(membership_id = %membership_id, status = %from, "Captured payment for a closed application");
                    Ok(WebhookResponse::ignored())
                }
                Err(e) => Err(e),
            };
        }

        if let Some(donation) = self.ctx.donation_repo().find_by_order_id(order_id).await? {
            DonationService::new(self.ctx).mark_paid(donation, payment_id).await?;
            return Ok(WebhookResponse::processed());
        }

        info!(order_id = %order_id, "Webhook for unknown order ignored");
        Ok(WebhookResponse::ignored())
    }

    async fn failed(&self, order_id: &str) -> ServiceResult<WebhookResponse> {
        if let Some(donation) = self.ctx.donation_repo().find_by_order_id(order_id).await? {
            let changed = DonationService::new(self.ctx).mark_failed(&donation).await?;
            return Ok(if changed {
                WebhookResponse::processed()
            } else {
                WebhookResponse::ignored()
            });
        }

        // A failed attempt leaves a membership pending so the member can retry.
        info!(order_id = %order_id, "Payment failure noted");
        Ok(WebhookResponse::ignored())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> WebhookEvent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_captured_payment() {
        let event = parse(
            r#"{"event":"payment.captured","payload":{"payment":{"entity":{"id":"pay_1","order_id":"order_9","status":"captured"}}}}"#,
        );
        assert_eq!(
            event.action(),
            WebhookAction::Captured {
                order_id: "order_9".into(),
                payment_id: "pay_1".into()
            }
        );
    }

    #[test]
    fn test_order_paid_falls_back_to_order_entity() {
        let event = parse(
            r#"{"event":"order.paid","payload":{"payment":{"entity":{"id":"pay_2"}},"order":{"entity":{"id":"order_3"}}}}"#,
        );
        assert_eq!(
            event.action(),
            WebhookAction::Captured {
                order_id: "order_3".into(),
                payment_id: "pay_2".into()
            }
        );
    }

    #[test]
    fn test_failed_and_unknown_events() {
        let failed = parse(r#"{"event":"payment.failed","payload":{"payment":{"entity":{"id":"pay_4","order_id":"order_4"}}}}"#);
        assert_eq!(failed.action(), WebhookAction::Failed { order_id: "order_4".into() });

        let refund = parse(r#"{"event":"refund.created","payload":{}}"#);
        assert_eq!(refund.action(), WebhookAction::Ignore);

        let bare = parse(r#"{"event":"payment.captured"}"#);
        assert_eq!(bare.action(), WebhookAction::Ignore);
    }
}
