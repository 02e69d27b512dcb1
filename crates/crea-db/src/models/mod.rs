//! Database models - SQLx row structs, one per table

mod document;
mod event;
mod forum;
mod notification;
mod payment;
mod site_content;
mod user;

pub use document::{CircularModel, CourtCaseModel, DocumentColumnsModel, ManualModel};
pub use event::EventModel;
pub use forum::{ForumPostModel, ForumTopicModel};
pub use notification::{NotificationModel, SettingModel};
pub use payment::{DonationModel, MembershipModel};
pub use site_content::{
    AchievementModel, AdvertisementModel, BodyMemberModel, BreakingNewsModel, ExternalLinkModel,
};
pub use user::UserModel;
