//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, checkout_signature, fixtures::*,
    TestServer,
};
use reqwest::{
    multipart::{Form, Part},
    StatusCode,
};
use serde_json::{json, Value};

async fn server() -> TestServer {
    TestServer::start().await.expect("Failed to start server")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
    assert_eq!(body["checks"]["redis"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_bootstrap_admin_can_log_in() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();

    let response = server.get_auth("/users/@me", &admin.access_token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.email, server.admin_email);
    assert_eq!(me.role, "admin");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let member = server.create_member().await.unwrap();
    let request = LoginRequest {
        email: member.email.clone(),
        password: "WrongPass123".to_string(),
    };

    let response = server.post("/auth/login", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_rotates_token() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let member = server.create_member().await.unwrap();

    let body = json!({ "refresh_token": member.refresh_token });
    let response = server.post("/auth/refresh", &body).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(auth.refresh_token, member.refresh_token);
    assert_eq!(auth.token_type, "Bearer");

    // The rotated-out token is spent
    let response = server.post("/auth/refresh", &body).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let member = server.create_member().await.unwrap();

    let response = server
        .post_auth("/auth/logout", &member.access_token, &json!({ "refresh_token": member.refresh_token }))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post("/auth/refresh", &json!({ "refresh_token": member.refresh_token }))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_password_reset_otp_does_not_reveal_accounts() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let body = json!({ "email": unique_email("nobody"), "purpose": "password_reset" });

    let response = server.post("/auth/otp", &body).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_signup_otp_for_registered_email_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let member = server.create_member().await.unwrap();
    let body = json!({ "email": member.email, "purpose": "signup" });

    let response = server.post("/auth/otp", &body).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_with_wrong_code_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let email = unique_email("signup");
    let response = server
        .post("/auth/otp", &json!({ "email": email, "purpose": "signup" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // A second request inside the cooldown is refused
    let response = server
        .post("/auth/otp", &json!({ "email": email, "purpose": "signup" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "OTP_COOLDOWN");

    let body = json!({
        "name": "New Member",
        "email": email,
        "password": "Welcome123",
        // Right length, but no issued code contains letters
        "otp": "abcdef",
    });
    let response = server.post("/auth/register", &body).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "OTP_INVALID");
}

// ============================================================================
// Authorization Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let response = server.get("/users/@me").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");

    let response = server.get_auth("/users/@me", "not-a-token").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_member_cannot_use_admin_routes() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let member = server.create_member().await.unwrap();

    let response = server.get_auth("/users", &member.access_token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "ADMIN_REQUIRED");

    let response = server
        .post_auth("/events", &member.access_token, &event_request(3))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_admin_cannot_demote_self() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();

    let response = server
        .patch_auth(
            &format!("/users/{}/role", admin.id),
            &admin.access_token,
            &json!({ "role": "member" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "CANNOT_MODIFY_SELF");
}

#[tokio::test]
async fn test_disabled_member_cannot_log_in() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();
    let member = server.create_member().await.unwrap();

    let response = server
        .patch_auth(
            &format!("/users/{}/status", member.id),
            &admin.access_token,
            &json!({ "is_active": false }),
        )
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!user.is_active);

    let request = LoginRequest {
        email: member.email.clone(),
        password: integration_tests::TEST_PASSWORD.to_string(),
    };
    let response = server.post("/auth/login", &request).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "ACCOUNT_DISABLED");
}

// ============================================================================
// Event Tests
// ============================================================================

#[tokio::test]
async fn test_event_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();

    let request = event_request(5);
    let response = server.post_auth("/events", &admin.access_token, &request).await.unwrap();
    let event: EventResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(event.is_upcoming);

    let response = server.get("/events?when=upcoming&limit=100").await.unwrap();
    let page: Page<EventResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.data.iter().any(|e| e.id == event.id));
    assert_eq!(page.pagination.limit, 100);

    let response = server
        .patch_auth(
            &format!("/events/{}", event.id),
            &admin.access_token,
            &json!({ "title": "Rescheduled meeting" }),
        )
        .await
        .unwrap();
    let updated: EventResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Rescheduled meeting");

    let response = server
        .delete_auth(&format!("/events/{}", event.id), &admin.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&format!("/events/{}", event.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_event_with_end_before_start_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();

    let mut request = event_request(5);
    request["ends_at"] = json!(chrono::Utc::now());
    let response = server.post_auth("/events", &admin.access_token, &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_invalid_path_and_query() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;

    let response = server.get("/events/not-an-id").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");

    let response = server.get("/events?when=someday").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");
}

// ============================================================================
// Document Tests
// ============================================================================

#[tokio::test]
async fn test_circular_by_url() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();

    let form = Form::new()
        .text("title", "Revision of night duty allowance")
        .text("category", "allowances")
        .text("url", "https://indianrailways.gov.in/circular.pdf");
    let response = server.post_form("/circulars", &admin.access_token, form).await.unwrap();
    let circular: CircularResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(circular.document.kind, "url");
    assert_eq!(circular.document.url, "https://indianrailways.gov.in/circular.pdf");

    let response = server.get("/circulars?category=allowances").await.unwrap();
    let page: Page<CircularResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.data.iter().any(|c| c.id == circular.id));
}

#[tokio::test]
async fn test_circular_file_is_served() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();

    let pdf = b"%PDF-1.4 test document".to_vec();
    let part = Part::bytes(pdf.clone())
        .file_name("order.pdf")
        .mime_str("application/pdf")
        .unwrap();
    let form = Form::new().text("title", "Transfer order").part("file", part);

    let response = server.post_form("/circulars", &admin.access_token, form).await.unwrap();
    let circular: CircularResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(circular.document.kind, "file");
    assert_eq!(circular.document.original_name.as_deref(), Some("order.pdf"));

    let response = server.get(&circular.document.url).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.bytes().await.unwrap().to_vec(), pdf);

    let response = server
        .delete_auth(&format!("/circulars/{}", circular.id), &admin.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&circular.document.url).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_document_needs_exactly_one_source() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();

    let form = Form::new().text("title", "Manual without a document");
    let response = server.post_form("/manuals", &admin.access_token, form).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_DOCUMENT_SOURCE");

    let part = Part::bytes(b"%PDF-1.4".to_vec())
        .file_name("manual.pdf")
        .mime_str("application/pdf")
        .unwrap();
    let form = Form::new()
        .text("title", "Manual with two documents")
        .text("url", "https://example.com/manual.pdf")
        .part("file", part);
    let response = server.post_form("/manuals", &admin.access_token, form).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_DOCUMENT_SOURCE");
}

#[tokio::test]
async fn test_court_case_without_document() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();

    let body = json!({
        "case_number": format!("OA/{}/2024", unique_suffix()),
        "title": "CREA vs Union of India",
        "court": "Central Administrative Tribunal, Mumbai",
        "status": "ongoing",
    });
    let response = server.post_auth("/court-cases", &admin.access_token, &body).await.unwrap();
    let case: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(case["status"], "ongoing");
    assert!(case["document"].is_null());

    let response = server.get("/court-cases?status=ongoing").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/court-cases?status=closed").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Forum Tests
// ============================================================================

#[tokio::test]
async fn test_forum_authorship_and_locking() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();
    let author = server.create_member().await.unwrap();
    let other = server.create_member().await.unwrap();

    let response = server
        .post_auth("/forum/topics", &author.access_token, &topic_request())
        .await
        .unwrap();
    let topic: TopicResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(topic.author_id, author.id);

    // Replies bump the counter
    let path = format!("/forum/topics/{}/posts", topic.id);
    let response = server
        .post_auth(&path, &other.access_token, &json!({ "body": "Not yet in our division." }))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get(&format!("/forum/topics/{}", topic.id)).await.unwrap();
    let fetched: TopicResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.post_count, 1);

    // Only the author or an admin may edit
    let response = server
        .patch_auth(
            &format!("/forum/topics/{}", topic.id),
            &other.access_token,
            &json!({ "title": "Hijacked title" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Authors cannot lock their own topic
    let response = server
        .patch_auth(
            &format!("/forum/topics/{}", topic.id),
            &author.access_token,
            &json!({ "is_locked": true }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/forum/topics/{}", topic.id),
            &admin.access_token,
            &json!({ "is_locked": true }),
        )
        .await
        .unwrap();
    let locked: TopicResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(locked.is_locked);

    let response = server
        .post_auth(&path, &author.access_token, &json!({ "body": "Any update?" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "TOPIC_LOCKED");

    let response = server
        .delete_auth(&format!("/forum/topics/{}", topic.id), &author.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Membership Tests
// ============================================================================

async fn apply(server: &TestServer, token: &str, email: &str, plan: &str) -> MembershipApplyResponse {
    let response = server
        .post_auth("/memberships", token, &membership_request(plan, email))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

#[tokio::test]
async fn test_membership_plans() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let response = server.get("/memberships/plans").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let plans = body["plans"].as_array().unwrap();
    assert_eq!(plans.len(), 2);
    assert!(plans.iter().any(|p| p["plan"] == "lifetime" && p["validity_months"].is_null()));
}

#[tokio::test]
async fn test_membership_checkout_flow() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let member = server.create_member().await.unwrap();

    let applied = apply(&server, &member.access_token, &member.email, "annual").await;
    assert_eq!(applied.membership.status, "pending");
    assert_eq!(applied.order.amount, applied.membership.amount);
    assert_eq!(applied.order.key_id, "rzp_test_integration");
    assert_eq!(applied.membership.order_id.as_deref(), Some(applied.order.order_id.as_str()));

    let verify_path = format!("/memberships/{}/verify", applied.membership.id);

    // A forged signature leaves the application pending
    let forged = json!({
        "razorpay_order_id": applied.order.order_id,
        "razorpay_payment_id": "pay_forged",
        "razorpay_signature": "00ff",
    });
    let response = server.post_auth(&verify_path, &member.access_token, &forged).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "PAYMENT_VERIFICATION_FAILED");

    let payment_id = format!("pay_{}", unique_suffix());
    let callback = json!({
        "razorpay_order_id": applied.order.order_id,
        "razorpay_payment_id": payment_id,
        "razorpay_signature": checkout_signature(&applied.order.order_id, &payment_id),
    });
    let response = server.post_auth(&verify_path, &member.access_token, &callback).await.unwrap();
    let active: MembershipResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(active.status, "active");
    assert!(active.membership_number.as_deref().unwrap().starts_with("CREA-"));
    assert!(active.valid_until.is_some());

    // Replaying the same callback is a no-op
    let response = server.post_auth(&verify_path, &member.access_token, &callback).await.unwrap();
    let again: MembershipResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(again.membership_number, active.membership_number);

    // An active member cannot apply again
    let response = server
        .post_auth("/memberships", &member.access_token, &membership_request("lifetime", &member.email))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_ACTIVE_MEMBER");

    // Activation leaves a notification behind
    let response = server
        .get_auth("/notifications/@me?unread_only=true", &member.access_token)
        .await
        .unwrap();
    let inbox: NotificationList = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(inbox.unread_count >= 1);
    assert!(!inbox.data.is_empty());
}

#[tokio::test]
async fn test_membership_visible_to_owner_and_admin_only() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();
    let owner = server.create_member().await.unwrap();
    let stranger = server.create_member().await.unwrap();

    let applied = apply(&server, &owner.access_token, &owner.email, "lifetime").await;
    let path = format!("/memberships/{}", applied.membership.id);

    let response = server.get_auth(&path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let response = server.get_auth(&path, &admin.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let response = server.get_auth(&path, &stranger.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get_auth("/memberships/@me", &owner.access_token).await.unwrap();
    let mine: DataList<MembershipResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(mine.data.iter().any(|m| m.id == applied.membership.id && m.plan == "lifetime"));
}

#[tokio::test]
async fn test_rejected_membership_cannot_activate() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();
    let member = server.create_member().await.unwrap();

    let applied = apply(&server, &member.access_token, &member.email, "annual").await;

    let response = server
        .post_auth(
            &format!("/memberships/{}/reject", applied.membership.id),
            &admin.access_token,
            &json!({ "reason": "Incomplete details" }),
        )
        .await
        .unwrap();
    let rejected: MembershipResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rejected.status, "rejected");

    // A late capture for the closed application is acknowledged and ignored
    let event = webhook_event("payment.captured", &applied.order.order_id, "pay_late");
    let response = server.post_webhook(&event).await.unwrap();
    let outcome: WebhookResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(outcome.status, "ignored");

    let response = server
        .post_auth(
            &format!("/memberships/{}/reject", applied.membership.id),
            &admin.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "INVALID_STATUS_TRANSITION");
}

// ============================================================================
// Payment Webhook Tests
// ============================================================================

#[tokio::test]
async fn test_webhook_activates_membership_once() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let member = server.create_member().await.unwrap();
    let applied = apply(&server, &member.access_token, &member.email, "annual").await;

    let event = webhook_event("payment.captured", &applied.order.order_id, "pay_hook_1");
    for _ in 0..2 {
        let response = server.post_webhook(&event).await.unwrap();
        let outcome: WebhookResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(outcome.status, "processed");
    }

    let response = server
        .get_auth(&format!("/memberships/{}", applied.membership.id), &member.access_token)
        .await
        .unwrap();
    let membership: MembershipResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(membership.status, "active");
    assert_eq!(membership.payment_id.as_deref(), Some("pay_hook_1"));
}

#[tokio::test]
async fn test_webhook_rejects_bad_signature() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let response = server
        .client
        .post(format!("{}/api/v1/payments/webhook", server.base_url()))
        .header("x-razorpay-signature", "deadbeef")
        .body(r#"{"event":"payment.captured"}"#)
        .send()
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "PAYMENT_VERIFICATION_FAILED");
}

#[tokio::test]
async fn test_webhook_ignores_unknown_orders_and_events() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;

    let event = webhook_event("payment.captured", "order_not_ours", "pay_x");
    let response = server.post_webhook(&event).await.unwrap();
    let outcome: WebhookResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(outcome.status, "ignored");

    let refund = json!({ "event": "refund.processed", "payload": {} });
    let response = server.post_webhook(&refund).await.unwrap();
    let outcome: WebhookResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(outcome.status, "ignored");
}

// ============================================================================
// Donation Tests
// ============================================================================

#[tokio::test]
async fn test_anonymous_donation_checkout() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;

    let response = server.post("/donations", &donation_request(501)).await.unwrap();
    let created: CreateDonationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.donation.amount, 50_100);
    assert_eq!(created.donation.status, "created");
    assert!(created.donation.user_id.is_none());

    let payment_id = format!("pay_{}", unique_suffix());
    let callback = json!({
        "order_id": created.order.order_id,
        "payment_id": payment_id,
        "signature": checkout_signature(&created.order.order_id, &payment_id),
    });
    let response = server
        .post(&format!("/donations/{}/verify", created.donation.id), &callback)
        .await
        .unwrap();
    let paid: DonationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(paid.status, "paid");
    assert_eq!(paid.payment_id.as_deref(), Some(payment_id.as_str()));
}

#[tokio::test]
async fn test_signed_in_donation_is_linked_and_failure_recovers() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let member = server.create_member().await.unwrap();

    let response = server
        .post_auth("/donations", &member.access_token, &donation_request(100))
        .await
        .unwrap();
    let created: CreateDonationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.donation.user_id.as_deref(), Some(member.id.as_str()));

    let failed = webhook_event("payment.failed", &created.order.order_id, "pay_declined");
    let response = server.post_webhook(&failed).await.unwrap();
    let outcome: WebhookResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(outcome.status, "processed");

    // A retry on the same order can still be captured
    let captured = webhook_event("payment.captured", &created.order.order_id, "pay_retry");
    let response = server.post_webhook(&captured).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/donations/@me", &member.access_token).await.unwrap();
    let page: Page<DonationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let donation = page.data.iter().find(|d| d.id == created.donation.id).unwrap();
    assert_eq!(donation.status, "paid");
}

#[tokio::test]
async fn test_donation_minimum_amount() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let response = server.post("/donations", &donation_request(0)).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_notification_inbox() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();
    let member = server.create_member().await.unwrap();
    let other = server.create_member().await.unwrap();

    let body = json!({ "user_id": member.id, "title": "Dues reminder", "message": "Please renew." });
    let response = server.post_auth("/notifications", &admin.access_token, &body).await.unwrap();
    let created: CountResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.count, 1);

    let response = server.get_auth("/notifications/@me", &member.access_token).await.unwrap();
    let inbox: NotificationList = assert_json(response, StatusCode::OK).await.unwrap();
    let notice = inbox.data.iter().find(|n| n.title == "Dues reminder").unwrap();
    assert!(!notice.is_read);

    // Someone else's notification reads as missing
    let path = format!("/notifications/{}/read", notice.id);
    let response = server.post_auth(&path, &other.access_token, &json!({})).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.post_auth(&path, &member.access_token, &json!({})).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth("/notifications/@me/unread-count", &member.access_token)
        .await
        .unwrap();
    let unread: CountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.count, 0);

    let response = server
        .delete_auth(&format!("/notifications/{}", notice.id), &member.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Settings & Site Content Tests
// ============================================================================

#[tokio::test]
async fn test_settings_round_trip() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();
    let key = format!("homepage.banner_{}", unique_suffix());
    let path = format!("/settings/{key}");

    let value = json!({ "value": { "text": "Welcome", "visible": true } });
    let response = server.put_auth(&path, &admin.access_token, &value).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let setting: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(setting["value"]["text"], "Welcome");

    let response = server.delete_auth(&path, &admin.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .put_auth("/settings/Bad%20Key", &admin.access_token, &value)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_SETTING_KEY");
}

#[tokio::test]
async fn test_inactive_breaking_news_is_admin_only() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();
    let member = server.create_member().await.unwrap();

    let text = format!("Strike notice {}", unique_suffix());
    let body = json!({ "text": text, "is_active": false });
    let response = server.post_auth("/breaking-news", &admin.access_token, &body).await.unwrap();
    let created: Created = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.get("/breaking-news").await.unwrap();
    let public: DataList<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(public.data.iter().all(|n| n["id"] != created.id.as_str()));

    let response = server.get_auth("/breaking-news?all=true", &member.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get_auth("/breaking-news?all=true", &admin.access_token).await.unwrap();
    let all: DataList<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(all.data.iter().any(|n| n["id"] == created.id.as_str()));
}

#[tokio::test]
async fn test_external_link_requires_http_url() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();

    let body = json!({ "title": "Local file", "url": "file:///etc/passwd" });
    let response = server.post_auth("/external-links", &admin.access_token, &body).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let body = json!({ "title": "Ministry of Railways", "url": "https://indianrailways.gov.in" });
    let response = server.post_auth("/external-links", &admin.access_token, &body).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

// ============================================================================
// Upload Tests
// ============================================================================

#[tokio::test]
async fn test_image_upload_rejects_documents() {
    if !check_test_env().await {
        return;
    }

    let server = server().await;
    let admin = server.login_admin().await.unwrap();

    let part = Part::bytes(b"%PDF-1.4".to_vec())
        .file_name("photo.pdf")
        .mime_str("application/pdf")
        .unwrap();
    let response = server
        .post_form("/uploads/images", &admin.access_token, Form::new().part("file", part))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "UNSUPPORTED_FILE_TYPE");

    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let part = Part::bytes(png).file_name("photo.png").mime_str("image/png").unwrap();
    let response = server
        .post_form("/uploads/images", &admin.access_token, Form::new().part("file", part))
        .await
        .unwrap();
    let upload: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(upload["url"].as_str().unwrap().starts_with("/uploads/images/"));
}
