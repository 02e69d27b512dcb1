//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in crea-core.
//! Each repository handles database operations for one record type.

mod circular;
mod court_case;
mod donation;
mod error;
mod event;
mod forum;
mod keyset;
mod manual;
mod membership;
mod notification;
mod setting;
mod site_content;
mod user;

pub use circular::PgCircularRepository;
pub use court_case::PgCourtCaseRepository;
pub use donation::PgDonationRepository;
pub use event::PgEventRepository;
pub use forum::{PgForumPostRepository, PgForumTopicRepository};
pub use manual::PgManualRepository;
pub use membership::PgMembershipRepository;
pub use notification::PgNotificationRepository;
pub use setting::PgSettingRepository;
pub use site_content::{
    PgAchievementRepository, PgAdvertisementRepository, PgBodyMemberRepository,
    PgBreakingNewsRepository, PgExternalLinkRepository,
};
pub use user::PgUserRepository;
