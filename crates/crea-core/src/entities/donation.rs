//! Donation entity - a one-off contribution paid through the gateway

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DonationStatus {
    Created,
    Paid,
    Failed,
}

impl DonationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }

    /// A failed attempt can still be captured on retry; paid is terminal.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Created, Self::Paid) | (Self::Created, Self::Failed) | (Self::Failed, Self::Paid)
        )
    }
}

impl std::str::FromStr for DonationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            other => Err(DomainError::ValidationError(format!(
                "unknown donation status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donation {
    pub id: Snowflake,
    /// Set when the donor was signed in.
    pub user_id: Option<Snowflake>,
    pub donor_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Amount in paise.
    pub amount: i64,
    pub purpose: Option<String>,
    pub message: Option<String>,
    pub status: DonationStatus,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Donation {
    pub fn new(id: Snowflake, donor_name: String, email: String, amount: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id: None,
            donor_name,
            email,
            phone: None,
            amount,
            purpose: None,
            message: None,
            status: DonationStatus::Created,
            order_id: None,
            payment_id: None,
            paid_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_paid(&self) -> bool {
        self.status == DonationStatus::Paid
    }

    pub fn ensure_transition(&self, next: DonationStatus) -> Result<(), DomainError> {
        if self.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.status.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donation_transitions() {
        use DonationStatus::{Created, Failed, Paid};
        assert!(Created.can_transition_to(Paid));
        assert!(Created.can_transition_to(Failed));
        assert!(Failed.can_transition_to(Paid));
        assert!(!Paid.can_transition_to(Failed));
        assert!(!Paid.can_transition_to(Created));
        assert!(!Failed.can_transition_to(Created));
    }

    #[test]
    fn test_paid_donation_is_terminal() {
        let mut d = Donation::new(Snowflake::new(1), "A".into(), "a@x.in".into(), 10_000);
        assert!(d.ensure_transition(DonationStatus::Paid).is_ok());
        d.status = DonationStatus::Paid;
        assert!(d.is_paid());
        assert_eq!(
            d.ensure_transition(DonationStatus::Failed).unwrap_err().code(),
            "INVALID_STATUS_TRANSITION"
        );
    }
}
