//! Donation service
//!
//! Anyone may donate; signed-in donors get the record linked to their
//! account. Marking paid is conditional, so the checkout callback and the
//! webhook can race safely.

use chrono::Utc;
use crea_core::entities::{Donation, DonationStatus};
use crea_core::traits::{OrderRequest, PageQuery};
use crea_core::{normalize_email, rupees_to_paise, DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    checkout_order, CreateDonationRequest, CreateDonationResponse, DonationResponse, PageOrder,
    PaginatedResponse, VerifyPaymentRequest,
};
use crate::integrations::mailer::donation_receipt_email;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::NotificationService;
use super::{non_blank, probe};

pub struct DonationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DonationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, donation_id: Snowflake) -> ServiceResult<Donation> {
        self.ctx
            .donation_repo()
            .find_by_id(donation_id)
            .await?
            .ok_or_else(|| DomainError::DonationNotFound(donation_id).into())
    }

    /// Record the pledge and open a gateway order for it
    #[instrument(skip(self, request), fields(amount = request.amount))]
    pub async fn create_donation(
        &self,
        user_id: Option<Snowflake>,
        request: CreateDonationRequest,
    ) -> ServiceResult<CreateDonationResponse> {
        let amount = rupees_to_paise(request.amount)?;

        let mut donation = Donation::new(
            self.ctx.generate_id(),
            request.donor_name.trim().to_string(),
            normalize_email(&request.email),
            amount,
        );
        donation.user_id = user_id;
        donation.phone = non_blank(request.phone);
        donation.purpose = non_blank(request.purpose);
        donation.message = non_blank(request.message);

        self.ctx.donation_repo().create(&donation).await?;

        let order_request = OrderRequest {
            amount,
            currency: self.ctx.settings().currency.clone(),
            receipt: donation.id.to_string(),
            notes: vec![
                ("kind".to_string(), "donation".to_string()),
                ("donation_id".to_string(), donation.id.to_string()),
            ],
        };
        let order = self.ctx.payment_gateway().create_order(&order_request).await?;

        self.ctx.donation_repo().set_order_id(donation.id, &order.id).await?;
        donation.order_id = Some(order.id.clone());

        info!(donation_id = %donation.id, order_id = %order.id, "Donation created");

        Ok(CreateDonationResponse {
            donation: DonationResponse::from(&donation),
            order: checkout_order(&order, self.ctx.payment_gateway().key_id()),
        })
    }

    /// Check the checkout signature and mark the donation paid
    #[instrument(skip(self, request))]
    pub async fn verify_payment(&self, donation_id: Snowflake, request: VerifyPaymentRequest) -> ServiceResult<DonationResponse> {
        let donation = self.load(donation_id).await?;

        if donation.order_id.as_deref() != Some(request.order_id.as_str()) {
            warn!(donation_id = %donation_id, "Donation payment refused: order id mismatch");
            return Err(DomainError::PaymentVerificationFailed.into());
        }

        let signature_ok = self.ctx.payment_gateway().verify_payment(
            &request.order_id,
            &request.payment_id,
            &request.signature,
        );
        if !signature_ok {
            warn!(donation_id = %donation_id, "Donation payment refused: bad signature");
            return Err(DomainError::PaymentVerificationFailed.into());
        }

        let donation = self.mark_paid(donation, &request.payment_id).await?;
        Ok(DonationResponse::from(&donation))
    }

    /// Mark a donation paid once; later calls return the paid record.
    pub(crate) async fn mark_paid(&self, mut donation: Donation, payment_id: &str) -> ServiceResult<Donation> {
        if donation.is_paid() {
            return Ok(donation);
        }
        donation.ensure_transition(DonationStatus::Paid)?;

        let now = Utc::now();
        if !self.ctx.donation_repo().mark_paid(donation.id, payment_id, now).await? {
            return self.load(donation.id).await;
        }

        donation.status = DonationStatus::Paid;
        donation.payment_id = Some(payment_id.to_string());
        donation.paid_at = Some(now);
        donation.updated_at = now;

        info!(donation_id = %donation.id, amount = donation.amount, "Donation paid");

        let receipt = donation_receipt_email(&donation.email, &donation.donor_name, donation.amount, payment_id);
        if let Err(e) = self.ctx.mailer().send(&receipt).await {
            warn!(donation_id = %donation.id, error = %e, "Donation receipt not sent");
        }

        if let Some(user_id) = donation.user_id {
            NotificationService::new(self.ctx)
                .notify_quietly(
                    user_id,
                    "Thank you for your donation",
                    "Your donation was received. A receipt has been sent to your email.".to_string(),
                    None,
                )
                .await;
        }

        Ok(donation)
    }

    /// Record a failed attempt; a paid donation stays paid.
    pub(crate) async fn mark_failed(&self, donation: &Donation) -> ServiceResult<bool> {
        if donation.ensure_transition(DonationStatus::Failed).is_err() {
            return Ok(false);
        }
        let changed = self.ctx.donation_repo().mark_failed(donation.id).await?;
        if changed {
            info!(donation_id = %donation.id, "Donation payment failed");
        }
        Ok(changed)
    }

    #[instrument(skip(self))]
    pub async fn my_donations(&self, user_id: Snowflake, page: PageQuery) -> ServiceResult<PaginatedResponse<DonationResponse>> {
        let rows = self.ctx.donation_repo().list_by_user(user_id, probe(page)).await?;
        Ok(PaginatedResponse::from_rows(
            rows,
            page,
            PageOrder::NewestFirst,
            |d| d.id,
            |d| DonationResponse::from(&d),
        ))
    }

    #[instrument(skip(self))]
    pub async fn list_donations(
        &self,
        status: Option<DonationStatus>,
        page: PageQuery,
    ) -> ServiceResult<PaginatedResponse<DonationResponse>> {
        let rows = self.ctx.donation_repo().list(status, probe(page)).await?;
        Ok(PaginatedResponse::from_rows(
            rows,
            page,
            PageOrder::NewestFirst,
            |d| d.id,
            |d| DonationResponse::from(&d),
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_donation(&self, donation_id: Snowflake) -> ServiceResult<DonationResponse> {
        Ok(DonationResponse::from(&self.load(donation_id).await?))
    }
}
