//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Money arrives in whole rupees. Optional text fields on update requests use
//! `Option<Option<_>>`: absent leaves the field alone, `null` clears it.

use chrono::{DateTime, NaiveDate, Utc};
use crea_cache::OtpPurpose;
use crea_core::Snowflake;
use serde::{Deserialize, Deserializer};
use validator::Validate;

/// Distinguish a missing field from an explicit `null`
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Ask for a one-time code by email
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub purpose: OtpPurpose,
}

/// Account registration, completed with the emailed code
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(equal = 6, message = "Code must be 6 digits"))]
    pub otp: String,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 100))]
    pub designation: Option<String>,

    #[validate(length(max = 100))]
    pub division: Option<String>,

    #[validate(length(max = 100))]
    pub department: Option<String>,

    #[validate(length(max = 50))]
    pub employee_id: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request (optional refresh token to revoke)
#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

/// Set a new password with an emailed code
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(equal = 6, message = "Code must be 6 digits"))]
    pub otp: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub new_password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update the caller's own profile
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub designation: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub division: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub department: Option<Option<String>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    pub role: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

// ============================================================================
// Event Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    #[serde(default)]
    pub description: String,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    pub starts_at: DateTime<Utc>,

    pub ends_at: Option<DateTime<Utc>>,

    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,

    pub starts_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "nullable")]
    pub ends_at: Option<Option<DateTime<Utc>>>,

    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
}

// ============================================================================
// Document Requests
// ============================================================================

/// A file received in a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Circular metadata from the multipart form; the document is `url` or a file part
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateCircularRequest {
    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: String,

    #[validate(length(max = 100))]
    pub circular_number: Option<String>,

    pub issued_on: Option<NaiveDate>,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCircularRequest {
    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub circular_number: Option<Option<String>>,

    pub issued_on: Option<NaiveDate>,

    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateManualRequest {
    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateManualRequest {
    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateCourtCaseRequest {
    #[validate(length(min = 1, max = 100, message = "Case number must be 1-100 characters"))]
    pub case_number: String,

    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 200, message = "Court must be 1-200 characters"))]
    pub court: String,

    pub status: Option<String>,

    pub next_hearing: Option<NaiveDate>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCourtCaseRequest {
    #[validate(length(min = 1, max = 100, message = "Case number must be 1-100 characters"))]
    pub case_number: Option<String>,

    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Court must be 1-200 characters"))]
    pub court: Option<String>,

    pub status: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub next_hearing: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

// ============================================================================
// Forum Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTopicRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 20000, message = "Body must be 1-20000 characters"))]
    pub body: String,

    #[validate(length(max = 100))]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTopicRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 20000, message = "Body must be 1-20000 characters"))]
    pub body: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,

    /// Admin only
    pub is_pinned: Option<bool>,

    /// Admin only
    pub is_locked: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 10000, message = "Body must be 1-10000 characters"))]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 10000, message = "Body must be 1-10000 characters"))]
    pub body: String,
}

// ============================================================================
// Membership & Payment Requests
// ============================================================================

/// Membership wizard submission
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApplyMembershipRequest {
    pub plan: String,

    #[validate(length(min = 2, max = 100, message = "Full name must be 2-100 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 7, max = 20, message = "Phone must be 7-20 characters"))]
    pub phone: String,

    #[validate(length(min = 1, max = 100, message = "Designation is required"))]
    pub designation: String,

    #[validate(length(max = 100))]
    pub division: Option<String>,

    #[validate(length(max = 100))]
    pub department: Option<String>,

    #[validate(length(max = 50))]
    pub employee_id: Option<String>,

    pub date_of_birth: Option<NaiveDate>,

    #[validate(length(max = 500))]
    pub address: Option<String>,
}

/// Checkout callback fields, accepted with or without the gateway's prefix
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyPaymentRequest {
    #[serde(alias = "razorpay_order_id")]
    #[validate(length(min = 1, message = "order_id is required"))]
    pub order_id: String,

    #[serde(alias = "razorpay_payment_id")]
    #[validate(length(min = 1, message = "payment_id is required"))]
    pub payment_id: String,

    #[serde(alias = "razorpay_signature")]
    #[validate(length(min = 1, message = "signature is required"))]
    pub signature: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RejectMembershipRequest {
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDonationRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub donor_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    /// Whole rupees
    #[validate(range(min = 1, message = "Amount must be at least 1 rupee"))]
    pub amount: i64,

    #[validate(length(max = 200))]
    pub purpose: Option<String>,

    #[validate(length(max = 1000))]
    pub message: Option<String>,
}

// ============================================================================
// Notification & Setting Requests
// ============================================================================

/// Send to one user, or to every active user when `user_id` is absent
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    pub user_id: Option<Snowflake>,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,

    #[validate(length(max = 500))]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PutSettingRequest {
    pub value: serde_json::Value,
}

// ============================================================================
// Site Content Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExternalLinkRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(url(message = "Invalid URL"))]
    pub url: String,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateExternalLinkRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(url(message = "Invalid URL"))]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,

    pub position: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBodyMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Designation must be 1-100 characters"))]
    pub designation: String,

    #[validate(length(max = 100))]
    pub division: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 500))]
    pub photo_url: Option<String>,

    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBodyMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Designation must be 1-100 characters"))]
    pub designation: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub division: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub photo_url: Option<Option<String>>,

    pub position: Option<i32>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAdvertisementRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 500, message = "Image URL is required"))]
    pub image_url: String,

    #[validate(length(max = 500))]
    pub link_url: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    pub starts_at: Option<DateTime<Utc>>,

    pub ends_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAdvertisementRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 500, message = "Image URL is required"))]
    pub image_url: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub link_url: Option<Option<String>>,

    pub is_active: Option<bool>,

    #[serde(default, deserialize_with = "nullable")]
    pub starts_at: Option<Option<DateTime<Utc>>>,

    #[serde(default, deserialize_with = "nullable")]
    pub ends_at: Option<Option<DateTime<Utc>>>,

    pub position: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAchievementRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub achieved_on: Option<NaiveDate>,

    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAchievementRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub achieved_on: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBreakingNewsRequest {
    #[validate(length(min = 1, max = 500, message = "Text must be 1-500 characters"))]
    pub text: String,

    #[validate(length(max = 500))]
    pub link: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBreakingNewsRequest {
    #[validate(length(min = 1, max = 500, message = "Text must be 1-500 characters"))]
    pub text: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub link: Option<Option<String>>,

    pub is_active: Option<bool>,

    pub position: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullable_distinguishes_absent_and_null() {
        let absent: UpdateEventRequest = serde_json::from_str("{}").unwrap();
        assert!(absent.location.is_none());

        let cleared: UpdateEventRequest = serde_json::from_str(r#"{"location":null}"#).unwrap();
        assert_eq!(cleared.location, Some(None));

        let set: UpdateEventRequest = serde_json::from_str(r#"{"location":"Mumbai CSMT"}"#).unwrap();
        assert_eq!(set.location, Some(Some("Mumbai CSMT".to_string())));
    }

    #[test]
    fn test_verify_payment_accepts_gateway_names() {
        let body = r#"{"razorpay_order_id":"order_1","razorpay_payment_id":"pay_1","razorpay_signature":"ab"}"#;
        let req: VerifyPaymentRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.order_id, "order_1");
        assert_eq!(req.payment_id, "pay_1");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_send_otp_purpose() {
        let req: SendOtpRequest =
            serde_json::from_str(r#"{"email":"a@b.in","purpose":"password_reset"}"#).unwrap();
        assert_eq!(req.purpose, OtpPurpose::PasswordReset);
        assert!(serde_json::from_str::<SendOtpRequest>(r#"{"email":"a@b.in","purpose":"login"}"#).is_err());
    }

    #[test]
    fn test_donation_amount_minimum() {
        let req: CreateDonationRequest =
            serde_json::from_str(r#"{"donor_name":"Asha","email":"a@b.in","amount":0}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_validation() {
        let req = RegisterRequest {
            name: "A".into(),
            email: "not-an-email".into(),
            password: "short".into(),
            otp: "123".into(),
            phone: None,
            designation: None,
            division: None,
            department: None,
            employee_id: None,
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("otp"));
    }

    #[test]
    fn test_advertisement_defaults_active() {
        let req: CreateAdvertisementRequest =
            serde_json::from_str(r#"{"title":"Ad","image_url":"/uploads/images/1.png"}"#).unwrap();
        assert!(req.is_active);
        assert_eq!(req.position, 0);
    }
}
