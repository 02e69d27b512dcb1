//! # crea-core
//!
//! Domain layer for the CREA portal: entities, value objects, and the
//! repository and gateway traits the outer crates implement.
//! This crate has no dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    format_membership_number, normalize_email, validate_setting_key, Achievement, Advertisement,
    BodyMember, BreakingNews, Circular, CourtCase, CourtCaseStatus, Donation, DonationStatus,
    Event, EventWindow, ExternalLink, ForumPost, ForumTopic, Manual, Membership,
    MembershipApplicant, MembershipPlan, MembershipStatus, Notification, Setting, User, UserRole,
};
pub use error::DomainError;
pub use traits::{
    AchievementRepository, AdvertisementRepository, BodyMemberRepository, BreakingNewsRepository,
    CircularRepository, CourtCaseRepository, DonationRepository, EventRepository,
    ExternalLinkRepository, ForumPostRepository, ForumTopicRepository, Mailer, ManualRepository,
    MembershipActivation, MembershipRepository, NotificationRepository, OrderRequest,
    OutgoingEmail, PageQuery, PaymentGateway, PaymentOrder, RepoResult, SettingRepository,
    UserFilter, UserRepository,
};
pub use value_objects::{
    is_http_url, rupees_to_paise, DocumentSource, Snowflake, SnowflakeGenerator,
    SnowflakeParseError, SourceInput, StoredFile, PAISE_PER_RUPEE,
};
