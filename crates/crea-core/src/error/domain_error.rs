//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Event not found: {0}")]
    EventNotFound(Snowflake),

    #[error("Circular not found: {0}")]
    CircularNotFound(Snowflake),

    #[error("Manual not found: {0}")]
    ManualNotFound(Snowflake),

    #[error("Court case not found: {0}")]
    CourtCaseNotFound(Snowflake),

    #[error("Forum topic not found: {0}")]
    TopicNotFound(Snowflake),

    #[error("Forum post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Membership not found: {0}")]
    MembershipNotFound(Snowflake),

    #[error("Donation not found: {0}")]
    DonationNotFound(Snowflake),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Snowflake),

    #[error("Setting not found: {0}")]
    SettingNotFound(String),

    #[error("External link not found: {0}")]
    ExternalLinkNotFound(Snowflake),

    #[error("Body member not found: {0}")]
    BodyMemberNotFound(Snowflake),

    #[error("Advertisement not found: {0}")]
    AdvertisementNotFound(Snowflake),

    #[error("Achievement not found: {0}")]
    AchievementNotFound(Snowflake),

    #[error("Breaking news item not found: {0}")]
    BreakingNewsNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Invalid document source: {0}")]
    InvalidDocumentSource(String),

    #[error("Event cannot end before it starts")]
    InvalidSchedule,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid setting key: {0}")]
    InvalidSettingKey(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File too large: max {max_bytes} bytes")]
    FileTooLarge { max_bytes: u64 },

    #[error("Invalid or incorrect verification code")]
    OtpInvalid,

    #[error("Verification code has expired or was never issued")]
    OtpExpired,

    #[error("Too many incorrect attempts, request a new code")]
    OtpExhausted,

    #[error("Payment verification failed")]
    PaymentVerificationFailed,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Administrator access required")]
    AdminRequired,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Only the author or an administrator can do this")]
    NotAuthor,

    #[error("You do not have access to this {0}")]
    NotOwner(&'static str),

    #[error("Topic is locked")]
    TopicLocked,

    #[error("Administrators cannot {0} their own account")]
    CannotModifySelf(&'static str),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("An active membership already exists")]
    AlreadyActiveMember,

    #[error("Cannot move from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("A code was sent recently, retry in {retry_after} seconds")]
    OtpCooldown { retry_after: u64 },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Upstream service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::EventNotFound(_) => "UNKNOWN_EVENT",
            Self::CircularNotFound(_) => "UNKNOWN_CIRCULAR",
            Self::ManualNotFound(_) => "UNKNOWN_MANUAL",
            Self::CourtCaseNotFound(_) => "UNKNOWN_COURT_CASE",
            Self::TopicNotFound(_) => "UNKNOWN_TOPIC",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::MembershipNotFound(_) => "UNKNOWN_MEMBERSHIP",
            Self::DonationNotFound(_) => "UNKNOWN_DONATION",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::SettingNotFound(_) => "UNKNOWN_SETTING",
            Self::ExternalLinkNotFound(_) => "UNKNOWN_EXTERNAL_LINK",
            Self::BodyMemberNotFound(_) => "UNKNOWN_BODY_MEMBER",
            Self::AdvertisementNotFound(_) => "UNKNOWN_ADVERTISEMENT",
            Self::AchievementNotFound(_) => "UNKNOWN_ACHIEVEMENT",
            Self::BreakingNewsNotFound(_) => "UNKNOWN_BREAKING_NEWS",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidDocumentSource(_) => "INVALID_DOCUMENT_SOURCE",
            Self::InvalidSchedule => "INVALID_SCHEDULE",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidSettingKey(_) => "INVALID_SETTING_KEY",
            Self::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",
            Self::OtpInvalid => "OTP_INVALID",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::OtpExhausted => "OTP_EXHAUSTED",
            Self::PaymentVerificationFailed => "PAYMENT_VERIFICATION_FAILED",

            // Authorization
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::NotAuthor => "NOT_AUTHOR",
            Self::NotOwner(_) => "NOT_OWNER",
            Self::TopicLocked => "TOPIC_LOCKED",
            Self::CannotModifySelf(_) => "CANNOT_MODIFY_SELF",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyActiveMember => "ALREADY_ACTIVE_MEMBER",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::OtpCooldown { .. } => "OTP_COOLDOWN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::ExternalServiceError(_) => "UPSTREAM_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::EventNotFound(_)
                | Self::CircularNotFound(_)
                | Self::ManualNotFound(_)
                | Self::CourtCaseNotFound(_)
                | Self::TopicNotFound(_)
                | Self::PostNotFound(_)
                | Self::MembershipNotFound(_)
                | Self::DonationNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::SettingNotFound(_)
                | Self::ExternalLinkNotFound(_)
                | Self::BodyMemberNotFound(_)
                | Self::AdvertisementNotFound(_)
                | Self::AchievementNotFound(_)
                | Self::BreakingNewsNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::InvalidDocumentSource(_)
                | Self::InvalidSchedule
                | Self::InvalidAmount(_)
                | Self::InvalidSettingKey(_)
                | Self::UnsupportedFileType(_)
                | Self::FileTooLarge { .. }
                | Self::OtpInvalid
                | Self::OtpExpired
                | Self::OtpExhausted
                | Self::PaymentVerificationFailed
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::AdminRequired
                | Self::AccountDisabled
                | Self::NotAuthor
                | Self::NotOwner(_)
                | Self::TopicLocked
                | Self::CannotModifySelf(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::AlreadyActiveMember
                | Self::InvalidStatusTransition { .. }
                | Self::OtpCooldown { .. }
        )
    }

    /// Failure of a third-party service (mail relay, payment gateway)
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::ExternalServiceError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::EventNotFound(Snowflake::new(1)).code(), "UNKNOWN_EVENT");
        assert_eq!(DomainError::TopicLocked.code(), "TOPIC_LOCKED");
        assert_eq!(
            DomainError::InvalidStatusTransition {
                from: "active".into(),
                to: "rejected".into()
            }
            .code(),
            "INVALID_STATUS_TRANSITION"
        );
    }

    #[test]
    fn test_categories_are_disjoint() {
        let samples = [
            DomainError::UserNotFound(Snowflake::new(1)),
            DomainError::SettingNotFound("site.title".into()),
            DomainError::OtpExpired,
            DomainError::PaymentVerificationFailed,
            DomainError::AccountDisabled,
            DomainError::TopicLocked,
            DomainError::AlreadyActiveMember,
            DomainError::OtpCooldown { retry_after: 30 },
        ];
        for err in &samples {
            let hits = [
                err.is_not_found(),
                err.is_validation(),
                err.is_authorization(),
                err.is_conflict(),
            ]
            .iter()
            .filter(|b| **b)
            .count();
            assert_eq!(hits, 1, "{err:?} should be in exactly one category");
        }
    }

    #[test]
    fn test_infrastructure_errors_have_no_category() {
        let err = DomainError::DatabaseError("boom".into());
        assert!(!err.is_not_found() && !err.is_validation() && !err.is_conflict());
        assert!(DomainError::ExternalServiceError("smtp".into()).is_upstream());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::CannotModifySelf("disable").to_string(),
            "Administrators cannot disable their own account"
        );
        assert_eq!(
            DomainError::FileTooLarge { max_bytes: 10 }.to_string(),
            "File too large: max 10 bytes"
        );
    }
}
