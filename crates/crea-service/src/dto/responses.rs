//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.
//! Amounts are in paise, the unit the checkout widget expects.

use chrono::{DateTime, NaiveDate, Utc};
use crea_core::traits::PageQuery;
use crea_core::Snowflake;
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Which way a listing walks its ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrder {
    NewestFirst,
    OldestFirst,
}

/// Paginated response with cursor-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, before: Option<String>, after: Option<String>, has_more: bool, limit: i32) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                before,
                after,
                has_more,
                limit,
            },
        }
    }

    /// Build a page from rows fetched with one extra row as a probe.
    ///
    /// The probe row sits at the far end of the scan, which is the front of
    /// the presented rows when the cursor runs against the listing order.
    /// The cursor continuing in the listing's direction points at the last
    /// returned row: `before` for newest-first, `after` for oldest-first.
    pub fn from_rows<E>(
        mut rows: Vec<E>,
        page: PageQuery,
        order: PageOrder,
        id_of: impl Fn(&E) -> Snowflake,
        map: impl FnMut(E) -> T,
    ) -> Self {
        let limit = page.limit.max(1);
        let keep = usize::try_from(limit).unwrap_or(usize::MAX);
        let has_more = rows.len() > keep;
        if has_more {
            let against_order = match order {
                PageOrder::NewestFirst => page.before.is_none() && page.after.is_some(),
                PageOrder::OldestFirst => page.after.is_none() && page.before.is_some(),
            };
            if against_order {
                rows.drain(..rows.len() - keep);
            } else {
                rows.truncate(keep);
            }
        }

        let first = rows.first().map(|r| id_of(r).to_string());
        let last = rows.last().map(|r| id_of(r).to_string());
        let (before, after) = match order {
            PageOrder::NewestFirst => (last, first),
            PageOrder::OldestFirst => (first, last),
        };

        let data = rows.into_iter().map(map).collect();
        Self::new(data, before, after, has_more, i32::try_from(limit).unwrap_or(i32::MAX))
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Cursor for fetching older rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Cursor for fetching newer rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Whether more results exist
    pub has_more: bool,
    /// Page size limit used
    pub limit: i32,
}

/// Acknowledgement for operations with nothing else to return
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth & User Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64, user: UserResponse) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// Returned whether or not a code was actually sent
#[derive(Debug, Clone, Serialize)]
pub struct OtpSentResponse {
    pub message: String,
    /// Code lifetime in seconds
    pub expires_in: u64,
}

/// Full account view, for the account owner and administrators
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub designation: Option<String>,
    pub division: Option<String>,
    pub department: Option<String>,
    pub employee_id: Option<String>,
    pub role: String,
    pub email_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Event & Document Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub is_upcoming: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Where to open a document, plus file details for uploads
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    /// `url` or `file`
    pub kind: &'static str,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CircularResponse {
    pub id: String,
    pub title: String,
    pub circular_number: Option<String>,
    pub issued_on: NaiveDate,
    pub category: Option<String>,
    pub document: DocumentResponse,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManualResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub document: DocumentResponse,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourtCaseResponse {
    pub id: String,
    pub case_number: String,
    pub title: String,
    pub court: String,
    pub status: String,
    pub next_hearing: Option<NaiveDate>,
    pub description: Option<String>,
    pub document: Option<DocumentResponse>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored upload, for editors that embed images
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub path: String,
    pub original_name: String,
    pub content_type: String,
    pub size: i64,
}

// ============================================================================
// Forum Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TopicResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub category: Option<String>,
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub post_count: i32,
    pub last_post_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TopicResponse {
    #[must_use]
    pub fn with_author_name(mut self, name: Option<String>) -> Self {
        self.author_name = name;
        self
    }
}

/// Topic listing: every pinned topic, then a page of the rest
#[derive(Debug, Serialize)]
pub struct TopicListResponse {
    pub pinned: Vec<TopicResponse>,
    pub data: Vec<TopicResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub topic_id: String,
    pub author_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Membership & Payment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ApplicantResponse {
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

#[derive(Debug, Clone, Serialize)]
pub struct MembershipResponse {
    pub id: String,
    pub user_id: String,
    pub plan: String,
    pub status: String,
    pub applicant: ApplicantResponse,
    pub amount: i64,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub membership_number: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub activated_at: Option<DateTime<Utc>>,
    pub is_current: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What the checkout widget needs to open a payment
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutOrderResponse {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MembershipApplyResponse {
    pub membership: MembershipResponse,
    pub order: CheckoutOrderResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub plan: String,
    /// Paise
    pub amount: i64,
    pub amount_rupees: i64,
    /// Months of validity; absent for lifetime plans
    pub validity_months: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MembershipPlansResponse {
    pub currency: String,
    pub plans: Vec<PlanResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DonationResponse {
    pub id: String,
    pub user_id: Option<String>,
    pub donor_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub amount: i64,
    pub purpose: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateDonationResponse {
    pub donation: DonationResponse,
    pub order: CheckoutOrderResponse,
}

/// Webhook outcome; unknown events are acknowledged and ignored
#[derive(Debug, Clone, Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
}

impl WebhookResponse {
    pub fn processed() -> Self {
        Self { status: "processed" }
    }

    pub fn ignored() -> Self {
        Self { status: "ignored" }
    }
}

// ============================================================================
// Notification & Setting Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub data: Vec<NotificationResponse>,
    pub pagination: PaginationMeta,
    pub unread_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationCountResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingResponse {
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Site Content Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ExternalLinkResponse {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyMemberResponse {
    pub id: String,
    pub name: String,
    pub designation: String,
    pub division: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvertisementResponse {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AchievementResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub achieved_on: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreakingNewsResponse {
    pub id: String,
    pub text: String,
    pub link: Option<String>,
    pub is_active: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
