//! Amounts are held in paise; clients send whole rupees.

use crate::error::DomainError;

pub const PAISE_PER_RUPEE: i64 = 100;

/// Converts a rupee amount from a request into paise.
///
/// Zero, negative, and overflowing amounts are rejected.
pub fn rupees_to_paise(rupees: i64) -> Result<i64, DomainError> {
    if rupees < 1 {
        return Err(DomainError::InvalidAmount(
            "amount must be at least 1 rupee".to_string(),
        ));
    }
    rupees
        .checked_mul(PAISE_PER_RUPEE)
        .ok_or_else(|| DomainError::InvalidAmount("amount is too large".to_string()))
}
