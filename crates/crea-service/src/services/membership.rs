//! Membership service
//!
//! Application -> gateway order -> checkout -> signature check -> activation.
//! Activation is a conditional update on `status = 'pending'`, so it happens
//! once no matter how many callbacks or webhooks arrive.

use chrono::Utc;
use crea_core::entities::{Membership, MembershipApplicant, MembershipPlan, MembershipStatus};
use crea_core::traits::{MembershipActivation, OrderRequest, PageQuery};
use crea_core::{format_membership_number, normalize_email, rupees_to_paise, DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    checkout_order, ApplyMembershipRequest, MembershipApplyResponse, MembershipPlansResponse,
    MembershipResponse, PageOrder, PaginatedResponse, PlanResponse, VerifyPaymentRequest,
};
use crate::integrations::mailer::welcome_email;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::NotificationService;
use super::{non_blank, probe};

pub struct MembershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, membership_id: Snowflake) -> ServiceResult<Membership> {
        self.ctx
            .membership_repo()
            .find_by_id(membership_id)
            .await?
            .ok_or_else(|| DomainError::MembershipNotFound(membership_id).into())
    }

    fn fee_rupees(&self, plan: MembershipPlan) -> i64 {
        let fees = self.ctx.settings().fees;
        match plan {
            MembershipPlan::Annual => fees.annual_fee,
            MembershipPlan::Lifetime => fees.lifetime_fee,
        }
    }

    /// Plans on offer with their fees
    pub fn plans(&self) -> ServiceResult<MembershipPlansResponse> {
        let plans = [MembershipPlan::Annual, MembershipPlan::Lifetime]
            .into_iter()
            .map(|plan| {
                let rupees = self.fee_rupees(plan);
                Ok(PlanResponse {
                    plan: plan.as_str().to_string(),
                    amount: rupees_to_paise(rupees)?,
                    amount_rupees: rupees,
                    validity_months: match plan {
                        MembershipPlan::Annual => Some(12),
                        MembershipPlan::Lifetime => None,
                    },
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(MembershipPlansResponse {
            currency: self.ctx.settings().currency.clone(),
            plans,
        })
    }

    /// Create a pending application and open a gateway order for its fee
    #[instrument(skip(self, request), fields(plan = %request.plan))]
    pub async fn apply(&self, user_id: Snowflake, request: ApplyMembershipRequest) -> ServiceResult<MembershipApplyResponse> {
        let plan: MembershipPlan = request.plan.parse()?;

        let now = Utc::now();
        let existing = self.ctx.membership_repo().find_by_user(user_id).await?;
        if existing.iter().any(|m| m.is_current(now)) {
            return Err(DomainError::AlreadyActiveMember.into());
        }

        let amount = rupees_to_paise(self.fee_rupees(plan))?;
        let applicant = MembershipApplicant {
            full_name: request.full_name.trim().to_string(),
            email: normalize_email(&request.email),
            phone: request.phone.trim().to_string(),
            designation: request.designation.trim().to_string(),
            division: non_blank(request.division),
            department: non_blank(request.department),
            employee_id: non_blank(request.employee_id),
            date_of_birth: request.date_of_birth,
            address: non_blank(request.address),
        };

        let mut membership = Membership::new(self.ctx.generate_id(), user_id, plan, applicant, amount);
        self.ctx.membership_repo().create(&membership).await?;

        let order_request = OrderRequest {
            amount,
            currency: self.ctx.settings().currency.clone(),
            receipt: membership.id.to_string(),
            notes: vec![
                ("kind".to_string(), "membership".to_string()),
                ("membership_id".to_string(), membership.id.to_string()),
                ("plan".to_string(), plan.as_str().to_string()),
            ],
        };

        let order = match self.ctx.payment_gateway().create_order(&order_request).await {
            Ok(order) => order,
            Err(e) => {
                // No order means no way to pay; drop the orphan application.
                if let Err(cleanup) = self.ctx.membership_repo().delete(membership.id).await {
                    warn!(membership_id = %membership.id, error = %cleanup, "Failed to remove unpaid application");
                }
                return Err(e.into());
            }
        };

        self.ctx.membership_repo().set_order_id(membership.id, &order.id).await?;
        membership.order_id = Some(order.id.clone());

        info!(membership_id = %membership.id, user_id = %user_id, order_id = %order.id, "Membership application created");

        Ok(MembershipApplyResponse {
            membership: MembershipResponse::from(&membership),
            order: checkout_order(&order, self.ctx.payment_gateway().key_id()),
        })
    }

    /// Check the checkout signature and activate the owner's application
    #[instrument(skip(self, request))]
    pub async fn verify_payment(
        &self,
        user_id: Snowflake,
        membership_id: Snowflake,
        request: VerifyPaymentRequest,
    ) -> ServiceResult<MembershipResponse> {
        let membership = self.load(membership_id).await?;
        if !membership.is_owned_by(user_id) {
            return Err(DomainError::NotOwner("membership").into());
        }

        if membership.order_id.as_deref() != Some(request.order_id.as_str()) {
            warn!(membership_id = %membership_id, "Payment refused: order id mismatch");
            return Err(DomainError::PaymentVerificationFailed.into());
        }

        let signature_ok = self.ctx.payment_gateway().verify_payment(
            &request.order_id,
            &request.payment_id,
            &request.signature,
        );
        if !signature_ok {
            warn!(membership_id = %membership_id, "Payment refused: bad signature");
            return Err(DomainError::PaymentVerificationFailed.into());
        }

        let membership = self.activate_after_payment(membership, &request.payment_id).await?;
        Ok(MembershipResponse::from(&membership))
    }

    /// Activate a pending membership for a verified payment.
    ///
    /// Repeating with the payment that already activated it returns the
    /// active record unchanged.
    pub(crate) async fn activate_after_payment(
        &self,
        mut membership: Membership,
        payment_id: &str,
    ) -> ServiceResult<Membership> {
        if already_activated_by(&membership, payment_id) {
            return Ok(membership);
        }
        membership.ensure_transition(MembershipStatus::Active)?;

        let now = Utc::now();
        let sequence = self.ctx.membership_repo().next_number().await?;
        membership.activate(payment_id.to_string(), format_membership_number(now, sequence), now)?;

        let activation = MembershipActivation {
            payment_id: payment_id.to_string(),
            membership_number: membership.membership_number.clone().unwrap_or_default(),
            activated_at: now,
            valid_until: membership.valid_until,
        };

        if !self.ctx.membership_repo().activate(membership.id, &activation).await? {
            // Lost the race: report whatever the winner wrote.
            let current = self.load(membership.id).await?;
            if already_activated_by(&current, payment_id) {
                return Ok(current);
            }
            current.ensure_transition(MembershipStatus::Active)?;
            return Err(DomainError::InvalidStatusTransition {
                from: current.status.as_str().to_string(),
                to: MembershipStatus::Active.as_str().to_string(),
            }
            .into());
        }

        let number = activation.membership_number.as_str();
        info!(membership_id = %membership.id, membership_number = %number, "Membership activated");

        NotificationService::new(self.ctx)
            .notify_quietly(
                membership.user_id,
                "Membership activated",
                format!(
                    "Your {} membership is active. Your membership number is {number}.",
                    membership.plan.as_str()
                ),
                Some("/membership".to_string()),
            )
            .await;

        let email = welcome_email(
            &membership.applicant.email,
            &membership.applicant.full_name,
            number,
            &self.ctx.settings().public_url,
        );
        if let Err(e) = self.ctx.mailer().send(&email).await {
            warn!(membership_id = %membership.id, error = %e, "Welcome email not sent");
        }

        Ok(membership)
    }

    #[instrument(skip(self))]
    pub async fn my_memberships(&self, user_id: Snowflake) -> ServiceResult<Vec<MembershipResponse>> {
        let rows = self.ctx.membership_repo().find_by_user(user_id).await?;
        Ok(rows.iter().map(MembershipResponse::from).collect())
    }

    /// Owners and administrators only
    #[instrument(skip(self))]
    pub async fn get_membership(&self, user_id: Snowflake, is_admin: bool, membership_id: Snowflake) -> ServiceResult<MembershipResponse> {
        let membership = self.load(membership_id).await?;
        if !is_admin && !membership.is_owned_by(user_id) {
            return Err(DomainError::NotOwner("membership").into());
        }
        Ok(MembershipResponse::from(&membership))
    }

    #[instrument(skip(self))]
    pub async fn list_memberships(
        &self,
        status: Option<MembershipStatus>,
        page: PageQuery,
    ) -> ServiceResult<PaginatedResponse<MembershipResponse>> {
        let rows = self.ctx.membership_repo().list(status, probe(page)).await?;
        Ok(PaginatedResponse::from_rows(
            rows,
            page,
            PageOrder::NewestFirst,
            |m| m.id,
            |m| MembershipResponse::from(&m),
        ))
    }

    /// Reject a pending application
    #[instrument(skip(self, reason))]
    pub async fn reject(&self, membership_id: Snowflake, reason: Option<String>) -> ServiceResult<MembershipResponse> {
        let mut membership = self.load(membership_id).await?;
        let reason = non_blank(reason);
        membership.reject(reason.clone())?;

        if !self.ctx.membership_repo().reject(membership_id, reason.as_deref()).await? {
            let current = self.load(membership_id).await?;
            current.ensure_transition(MembershipStatus::Rejected)?;
        }

        info!(membership_id = %membership_id, "Membership rejected");

        let message = match &reason {
            Some(reason) => format!("Your membership application was not approved: {reason}"),
            None => "Your membership application was not approved.".to_string(),
        };
        NotificationService::new(self.ctx)
            .notify_quietly(membership.user_id, "Membership application update", message, Some("/membership".to_string()))
            .await;

        Ok(MembershipResponse::from(&membership))
    }

    #[instrument(skip(self))]
    pub async fn delete_membership(&self, membership_id: Snowflake) -> ServiceResult<()> {
        self.load(membership_id).await?;
        self.ctx.membership_repo().delete(membership_id).await?;

        info!(membership_id = %membership_id, "Membership deleted");
        Ok(())
    }
}

fn already_activated_by(membership: &Membership, payment_id: &str) -> bool {
    membership.status == MembershipStatus::Active && membership.payment_id.as_deref() == Some(payment_id)
}
