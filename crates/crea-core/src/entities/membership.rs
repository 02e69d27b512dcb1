//! Membership entity - an application for association membership and its lifecycle

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipPlan {
    Annual,
    Lifetime,
}

impl MembershipPlan {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Lifetime => "lifetime",
        }
    }

    /// Expiry for a membership activated at `activated_at`; lifetime plans never expire.
    pub fn valid_until(self, activated_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Annual => activated_at.checked_add_months(Months::new(12)),
            Self::Lifetime => None,
        }
    }
}

impl std::str::FromStr for MembershipPlan {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annual" => Ok(Self::Annual),
            "lifetime" => Ok(Self::Lifetime),
            other => Err(DomainError::ValidationError(format!("unknown plan '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipStatus {
    Pending,
    Active,
    Rejected,
}

impl MembershipStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Rejected => "rejected",
        }
    }

    /// Only a pending application can move, and only forward.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Active) | (Self::Pending, Self::Rejected)
        )
    }

    fn transition_error(self, next: Self) -> DomainError {
        DomainError::InvalidStatusTransition {
            from: self.as_str().to_string(),
            to: next.as_str().to_string(),
        }
    }
}

impl std::str::FromStr for MembershipStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::ValidationError(format!(
                "unknown membership status '{other}'"
            ))),
        }
    }
}

/// Personal details captured by the application wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MembershipApplicant {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub designation: String,
    pub division: Option<String>,
    pub department: Option<String>,
    pub employee_id: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub plan: MembershipPlan,
    pub status: MembershipStatus,
    pub applicant: MembershipApplicant,
    /// Fee in paise.
    pub amount: i64,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub membership_number: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub activated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        plan: MembershipPlan,
        applicant: MembershipApplicant,
        amount: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            plan,
            status: MembershipStatus::Pending,
            applicant,
            amount,
            order_id: None,
            payment_id: None,
            membership_number: None,
            valid_until: None,
            rejection_reason: None,
            activated_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }

    /// Whether this record currently grants membership.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.status == MembershipStatus::Active && self.valid_until.map_or(true, |until| until > now)
    }

    pub fn ensure_transition(&self, next: MembershipStatus) -> Result<(), DomainError> {
        if self.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(self.status.transition_error(next))
        }
    }

    /// Moves a pending application to active after a verified payment.
    pub fn activate(
        &mut self,
        payment_id: String,
        membership_number: String,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.ensure_transition(MembershipStatus::Active)?;
        self.status = MembershipStatus::Active;
        self.payment_id = Some(payment_id);
        self.membership_number = Some(membership_number);
        self.activated_at = Some(now);
        self.valid_until = self.plan.valid_until(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn reject(&mut self, reason: Option<String>) -> Result<(), DomainError> {
        self.ensure_transition(MembershipStatus::Rejected)?;
        self.status = MembershipStatus::Rejected;
        self.rejection_reason = reason;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Formats the public membership number, e.g. `CREA-2026-00042`.
pub fn format_membership_number(activated_at: DateTime<Utc>, sequence: i64) -> String {
    format!("CREA-{}-{:05}", activated_at.year(), sequence)
}
