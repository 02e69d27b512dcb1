//! Ports implemented by the infrastructure crates

mod gateways;
mod repositories;

pub use gateways::{Mailer, OrderRequest, OutgoingEmail, PaymentGateway, PaymentOrder};
pub use repositories::{
    AchievementRepository, AdvertisementRepository, BodyMemberRepository, BreakingNewsRepository,
    CircularRepository, CourtCaseRepository, DonationRepository, EventRepository,
    ExternalLinkRepository, ForumPostRepository, ForumTopicRepository, ManualRepository,
    MembershipActivation, MembershipRepository, NotificationRepository, PageQuery, RepoResult,
    SettingRepository, UserFilter, UserRepository,
};
