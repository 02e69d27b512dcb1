//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for one request and
//! orchestrates repositories, caches and outbound integrations.

pub mod admin;
pub mod auth;
pub mod context;
pub mod document;
pub mod donation;
pub mod error;
pub mod event;
pub mod forum;
pub mod membership;
pub mod notification;
pub mod payment;
pub mod setting;
pub mod site_content;
pub mod upload;
pub mod user;

use crea_core::traits::PageQuery;

// Re-export all services for convenience
pub use admin::{AdminService, BootstrapOutcome};
pub use auth::AuthService;
pub use context::{PortalSettings, Repositories, ServiceContext, ServiceContextBuilder};
pub use document::DocumentService;
pub use donation::DonationService;
pub use error::{ServiceError, ServiceResult};
pub use event::EventService;
pub use forum::{Actor, ForumService};
pub use membership::MembershipService;
pub use notification::NotificationService;
pub use payment::PaymentService;
pub use setting::SettingService;
pub use site_content::SiteContentService;
pub use upload::UploadService;
pub use user::UserService;

/// Ask the repository for one row past the page so `has_more` is known.
pub(crate) fn probe(page: PageQuery) -> PageQuery {
    PageQuery {
        limit: page.limit + 1,
        ..page
    }
}

/// Trimmed, with blank input treated as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crea_core::Snowflake;

    #[test]
    fn test_probe_asks_for_one_more() {
        let page = PageQuery {
            before: Some(Snowflake::new(9)),
            after: None,
            limit: 20,
        };
        let probed = probe(page);
        assert_eq!(probed.limit, 21);
        assert_eq!(probed.before, page.before);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Mumbai ".into())), Some("Mumbai".into()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }
}
