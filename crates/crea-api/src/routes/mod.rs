//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers::{
    auth, documents, donations, events, forum, health, memberships, notifications, payments,
    settings, site_content, uploads, users,
};
use crate::state::AppState;

/// Create the main API router
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Stored uploads served as static files under `/uploads`
pub fn upload_files(upload_dir: &str) -> Router<AppState> {
    Router::new().nest_service("/uploads", ServeDir::new(upload_dir))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(event_routes())
        .merge(document_routes())
        .merge(forum_routes())
        .merge(membership_routes())
        .merge(donation_routes())
        .merge(notification_routes())
        .merge(setting_routes())
        .merge(site_content_routes())
        .route("/payments/webhook", post(payments::webhook))
        .route("/uploads/images", post(uploads::upload_image))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/otp", post(auth::send_otp))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/password/reset", post(auth::reset_password))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/@me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/users/@me/password", post(users::change_password))
        .route("/users", get(users::list_users))
        .route("/users/:id", get(users::get_user).delete(users::delete_user))
        .route("/users/:id/role", patch(users::update_role))
        .route("/users/:id/status", patch(users::set_active))
}

/// Event routes
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/:id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
}

/// Circular, manual and court case routes
fn document_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/circulars",
            get(documents::list_circulars).post(documents::create_circular),
        )
        .route(
            "/circulars/:id",
            get(documents::get_circular)
                .patch(documents::update_circular)
                .delete(documents::delete_circular),
        )
        .route("/manuals", get(documents::list_manuals).post(documents::create_manual))
        .route(
            "/manuals/:id",
            get(documents::get_manual)
                .patch(documents::update_manual)
                .delete(documents::delete_manual),
        )
        .route(
            "/court-cases",
            get(documents::list_court_cases).post(documents::create_court_case),
        )
        .route(
            "/court-cases/:id",
            get(documents::get_court_case)
                .patch(documents::update_court_case)
                .delete(documents::delete_court_case),
        )
}

/// Forum routes
fn forum_routes() -> Router<AppState> {
    Router::new()
        .route("/forum/topics", get(forum::list_topics).post(forum::create_topic))
        .route(
            "/forum/topics/:id",
            get(forum::get_topic)
                .patch(forum::update_topic)
                .delete(forum::delete_topic),
        )
        .route(
            "/forum/topics/:id/posts",
            get(forum::list_posts).post(forum::create_post),
        )
        .route(
            "/forum/posts/:id",
            patch(forum::update_post).delete(forum::delete_post),
        )
}

/// Membership routes
fn membership_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/memberships",
            get(memberships::list_memberships).post(memberships::apply),
        )
        .route("/memberships/plans", get(memberships::plans))
        .route("/memberships/@me", get(memberships::my_memberships))
        .route(
            "/memberships/:id",
            get(memberships::get_membership).delete(memberships::delete_membership),
        )
        .route("/memberships/:id/verify", post(memberships::verify_payment))
        .route("/memberships/:id/reject", post(memberships::reject))
}

/// Donation routes
fn donation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/donations",
            get(donations::list_donations).post(donations::create_donation),
        )
        .route("/donations/@me", get(donations::my_donations))
        .route("/donations/:id", get(donations::get_donation))
        .route("/donations/:id/verify", post(donations::verify_payment))
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", post(notifications::create_notification))
        .route("/notifications/@me", get(notifications::list_mine))
        .route("/notifications/@me/unread-count", get(notifications::unread_count))
        .route("/notifications/read-all", post(notifications::mark_all_read))
        .route(
            "/notifications/:id",
            delete(notifications::delete_notification),
        )
        .route("/notifications/:id/read", post(notifications::mark_read))
}

/// Setting routes
fn setting_routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(settings::list_settings))
        .route(
            "/settings/:key",
            get(settings::get_setting)
                .put(settings::put_setting)
                .delete(settings::delete_setting),
        )
}

/// Homepage content routes
fn site_content_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/external-links",
            get(site_content::list_links).post(site_content::create_link),
        )
        .route(
            "/external-links/:id",
            patch(site_content::update_link).delete(site_content::delete_link),
        )
        .route(
            "/body-members",
            get(site_content::list_body_members).post(site_content::create_body_member),
        )
        .route(
            "/body-members/:id",
            patch(site_content::update_body_member).delete(site_content::delete_body_member),
        )
        .route(
            "/advertisements",
            get(site_content::list_advertisements).post(site_content::create_advertisement),
        )
        .route(
            "/advertisements/:id",
            patch(site_content::update_advertisement).delete(site_content::delete_advertisement),
        )
        .route(
            "/achievements",
            get(site_content::list_achievements).post(site_content::create_achievement),
        )
        .route(
            "/achievements/:id",
            get(site_content::get_achievement)
                .patch(site_content::update_achievement)
                .delete(site_content::delete_achievement),
        )
        .route(
            "/breaking-news",
            get(site_content::list_breaking_news).post(site_content::create_breaking_news),
        )
        .route(
            "/breaking-news/:id",
            patch(site_content::update_breaking_news).delete(site_content::delete_breaking_news),
        )
}
