//! Domain entities - core business objects

mod circular;
mod court_case;
mod donation;
mod event;
mod forum;
mod manual;
mod membership;
mod notification;
mod setting;
mod site_content;
mod user;

pub use circular::Circular;
pub use court_case::{CourtCase, CourtCaseStatus};
pub use donation::{Donation, DonationStatus};
pub use event::{Event, EventWindow};
pub use forum::{ForumPost, ForumTopic};
pub use manual::Manual;
pub use membership::{
    format_membership_number, Membership, MembershipApplicant, MembershipPlan, MembershipStatus,
};
pub use notification::Notification;
pub use setting::{validate_setting_key, Setting, MAX_SETTING_KEY_LEN};
pub use site_content::{Achievement, Advertisement, BodyMember, BreakingNews, ExternalLink};
pub use user::{normalize_email, User, UserRole};
