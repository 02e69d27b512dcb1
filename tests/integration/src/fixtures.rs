//! Test fixtures and data generators
//!
//! Request bodies and the subset of response fields the tests inspect.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// An address no earlier run of the suite has used
pub fn unique_email(prefix: &str) -> String {
    format!(
        "{prefix}{}-{}@example.com",
        Utc::now().timestamp_micros(),
        unique_suffix()
    )
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
}

/// Pagination metadata
#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub before: Option<String>,
    pub has_more: bool,
    pub limit: i32,
}

/// A page of results
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Unpaged list wrapper
#[derive(Debug, Deserialize)]
pub struct DataList<T> {
    pub data: Vec<T>,
}

/// Any response with an id
#[derive(Debug, Deserialize)]
pub struct Created {
    pub id: String,
}

/// Event request starting `days` from now
pub fn event_request(days: i64) -> Value {
    let suffix = unique_suffix();
    json!({
        "title": format!("General Body Meeting {suffix}"),
        "description": "Annual general body meeting of the association",
        "location": "Mumbai CSMT",
        "starts_at": Utc::now() + Duration::days(days),
    })
}

#[derive(Debug, Deserialize)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub is_upcoming: bool,
}

/// Forum topic request
pub fn topic_request() -> Value {
    let suffix = unique_suffix();
    json!({
        "title": format!("Running allowance revision {suffix}"),
        "body": "Has anyone received the revised allowance yet?",
        "category": "allowances",
    })
}

#[derive(Debug, Deserialize)]
pub struct TopicResponse {
    pub id: String,
    pub author_id: String,
    pub is_locked: bool,
    pub post_count: i32,
}

/// Membership wizard body
pub fn membership_request(plan: &str, email: &str) -> Value {
    json!({
        "plan": plan,
        "full_name": "Test Member",
        "email": email,
        "phone": "9876543210",
        "designation": "Senior Section Engineer",
        "division": "Mumbai",
    })
}

#[derive(Debug, Deserialize)]
pub struct CheckoutOrder {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MembershipResponse {
    pub id: String,
    pub plan: String,
    pub status: String,
    pub amount: i64,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub membership_number: Option<String>,
    pub valid_until: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MembershipApplyResponse {
    pub membership: MembershipResponse,
    pub order: CheckoutOrder,
}

/// Donation pledge body
pub fn donation_request(amount_rupees: i64) -> Value {
    json!({
        "donor_name": "Well Wisher",
        "email": unique_email("donor"),
        "amount": amount_rupees,
        "purpose": "Welfare fund",
    })
}

#[derive(Debug, Deserialize)]
pub struct DonationResponse {
    pub id: String,
    pub user_id: Option<String>,
    pub amount: i64,
    pub status: String,
    pub payment_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDonationResponse {
    pub donation: DonationResponse,
    pub order: CheckoutOrder,
}

/// Gateway webhook payload for a payment event
pub fn webhook_event(event: &str, order_id: &str, payment_id: &str) -> Value {
    json!({
        "entity": "event",
        "event": event,
        "payload": {
            "payment": {
                "entity": {
                    "id": payment_id,
                    "order_id": order_id,
                    "status": if event == "payment.failed" { "failed" } else { "captured" },
                }
            }
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct WebhookResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    pub title: String,
    pub is_read: bool,
}

#[derive(Debug, Deserialize)]
pub struct NotificationList {
    pub data: Vec<NotificationResponse>,
    pub unread_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct DocumentResponse {
    pub kind: String,
    pub url: String,
    pub original_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CircularResponse {
    pub id: String,
    pub title: String,
    pub document: DocumentResponse,
}
