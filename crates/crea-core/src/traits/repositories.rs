//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer states what it needs; `crea-db` provides the
//! PostgreSQL implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Achievement, Advertisement, BodyMember, BreakingNews, Circular, CourtCase, CourtCaseStatus,
    Donation, DonationStatus, Event, EventWindow, ExternalLink, ForumPost, ForumTopic, Manual,
    Membership, MembershipStatus, Notification, Setting, User, UserRole,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Cursor window over id-ordered rows.
///
/// `before` walks newest-first; `after` walks oldest-first. Callers
/// usually ask for one row more than they return to detect `has_more`.
#[derive(Debug, Clone, Copy)]
pub struct PageQuery {
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            before: None,
            after: None,
            limit: 50,
        }
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    /// Case-insensitive match on name or email.
    pub search: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Lookup by normalized email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields
    async fn update(&self, user: &User) -> RepoResult<()>;

    async fn set_role(&self, id: Snowflake, role: UserRole) -> RepoResult<()>;

    async fn set_active(&self, id: Snowflake, is_active: bool) -> RepoResult<()>;

    /// Soft delete a user
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;

    async fn list(&self, filter: &UserFilter, page: PageQuery) -> RepoResult<Vec<User>>;

    /// Ids of every active, non-deleted account
    async fn active_ids(&self) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Event Repository
// ============================================================================

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>>;

    async fn list(
        &self,
        window: EventWindow,
        now: DateTime<Utc>,
        page: PageQuery,
    ) -> RepoResult<Vec<Event>>;

    async fn create(&self, event: &Event) -> RepoResult<()>;

    async fn update(&self, event: &Event) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Document Repositories
// ============================================================================

#[async_trait]
pub trait CircularRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Circular>>;

    async fn list(&self, category: Option<&str>, page: PageQuery) -> RepoResult<Vec<Circular>>;

    async fn create(&self, circular: &Circular) -> RepoResult<()>;

    /// Update metadata; the source is fixed at creation
    async fn update(&self, circular: &Circular) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait ManualRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Manual>>;

    async fn list(&self, category: Option<&str>, page: PageQuery) -> RepoResult<Vec<Manual>>;

    async fn create(&self, manual: &Manual) -> RepoResult<()>;

    async fn update(&self, manual: &Manual) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait CourtCaseRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CourtCase>>;

    async fn list(
        &self,
        status: Option<CourtCaseStatus>,
        page: PageQuery,
    ) -> RepoResult<Vec<CourtCase>>;

    async fn create(&self, case: &CourtCase) -> RepoResult<()>;

    async fn update(&self, case: &CourtCase) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Forum Repositories
// ============================================================================

#[async_trait]
pub trait ForumTopicRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ForumTopic>>;

    /// Pinned topics, most recently active first
    async fn list_pinned(&self, category: Option<&str>) -> RepoResult<Vec<ForumTopic>>;

    /// Unpinned topics, most recently active first
    async fn list(&self, category: Option<&str>, page: PageQuery) -> RepoResult<Vec<ForumTopic>>;

    async fn create(&self, topic: &ForumTopic) -> RepoResult<()>;

    async fn update(&self, topic: &ForumTopic) -> RepoResult<()>;

    /// Delete a topic together with its posts in one transaction
    async fn delete_with_posts(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait ForumPostRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ForumPost>>;

    /// Posts of a topic, oldest first
    async fn list_by_topic(&self, topic_id: Snowflake, page: PageQuery) -> RepoResult<Vec<ForumPost>>;

    /// Insert a post and bump the topic's counters atomically
    async fn create(&self, post: &ForumPost) -> RepoResult<()>;

    async fn update(&self, post: &ForumPost) -> RepoResult<()>;

    /// Remove a post and decrement the topic's counter atomically
    async fn delete(&self, post: &ForumPost) -> RepoResult<()>;
}

// ============================================================================
// Membership Repository
// ============================================================================

/// Fields written when a payment activates a membership.
#[derive(Debug, Clone)]
pub struct MembershipActivation {
    pub payment_id: String,
    pub membership_number: String,
    pub activated_at: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Membership>>;

    async fn find_by_order_id(&self, order_id: &str) -> RepoResult<Option<Membership>>;

    /// All applications by a user, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Membership>>;

    async fn list(
        &self,
        status: Option<MembershipStatus>,
        page: PageQuery,
    ) -> RepoResult<Vec<Membership>>;

    async fn create(&self, membership: &Membership) -> RepoResult<()>;

    async fn set_order_id(&self, id: Snowflake, order_id: &str) -> RepoResult<()>;

    /// Next value of the membership number sequence
    async fn next_number(&self) -> RepoResult<i64>;

    /// Applies the activation only while the record is still pending.
    /// Returns `false` when another writer got there first.
    async fn activate(&self, id: Snowflake, activation: &MembershipActivation) -> RepoResult<bool>;

    /// Rejects only while pending. Returns `false` otherwise.
    async fn reject(&self, id: Snowflake, reason: Option<&str>) -> RepoResult<bool>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Donation Repository
// ============================================================================

#[async_trait]
pub trait DonationRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Donation>>;

    async fn find_by_order_id(&self, order_id: &str) -> RepoResult<Option<Donation>>;

    async fn list(&self, status: Option<DonationStatus>, page: PageQuery) -> RepoResult<Vec<Donation>>;

    async fn list_by_user(&self, user_id: Snowflake, page: PageQuery) -> RepoResult<Vec<Donation>>;

    async fn create(&self, donation: &Donation) -> RepoResult<()>;

    async fn set_order_id(&self, id: Snowflake, order_id: &str) -> RepoResult<()>;

    /// Marks paid unless already paid. Returns whether a row changed.
    async fn mark_paid(&self, id: Snowflake, payment_id: &str, paid_at: DateTime<Utc>) -> RepoResult<bool>;

    /// Marks failed only from `created`. Returns whether a row changed.
    async fn mark_failed(&self, id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>>;

    async fn list_for_user(
        &self,
        user_id: Snowflake,
        unread_only: bool,
        page: PageQuery,
    ) -> RepoResult<Vec<Notification>>;

    async fn unread_count(&self, user_id: Snowflake) -> RepoResult<i64>;

    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Bulk insert, returns rows written
    async fn create_many(&self, notifications: &[Notification]) -> RepoResult<u64>;

    /// Returns `false` if the notification is not the user's
    async fn mark_read(&self, id: Snowflake, user_id: Snowflake, at: DateTime<Utc>) -> RepoResult<bool>;

    async fn mark_all_read(&self, user_id: Snowflake, at: DateTime<Utc>) -> RepoResult<u64>;

    /// Returns `false` if the notification is not the user's
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Setting Repository
// ============================================================================

#[async_trait]
pub trait SettingRepository: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<Setting>>;

    async fn find(&self, key: &str) -> RepoResult<Option<Setting>>;

    async fn upsert(&self, key: &str, value: &serde_json::Value) -> RepoResult<Setting>;

    /// Returns `false` when the key did not exist
    async fn delete(&self, key: &str) -> RepoResult<bool>;
}

// ============================================================================
// Site Content Repositories
// ============================================================================

#[async_trait]
pub trait ExternalLinkRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ExternalLink>>;

    /// Ordered by position
    async fn list(&self) -> RepoResult<Vec<ExternalLink>>;

    async fn create(&self, link: &ExternalLink) -> RepoResult<()>;

    async fn update(&self, link: &ExternalLink) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait BodyMemberRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<BodyMember>>;

    /// Ordered by position
    async fn list(&self) -> RepoResult<Vec<BodyMember>>;

    async fn create(&self, member: &BodyMember) -> RepoResult<()>;

    async fn update(&self, member: &BodyMember) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait AdvertisementRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Advertisement>>;

    /// Ordered by position; with `live_at`, only ads showing at that instant
    async fn list(&self, live_at: Option<DateTime<Utc>>) -> RepoResult<Vec<Advertisement>>;

    async fn create(&self, ad: &Advertisement) -> RepoResult<()>;

    async fn update(&self, ad: &Advertisement) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait AchievementRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Achievement>>;

    async fn list(&self, page: PageQuery) -> RepoResult<Vec<Achievement>>;

    async fn create(&self, achievement: &Achievement) -> RepoResult<()>;

    async fn update(&self, achievement: &Achievement) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait BreakingNewsRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<BreakingNews>>;

    /// Ordered by position
    async fn list(&self, active_only: bool) -> RepoResult<Vec<BreakingNews>>;

    async fn create(&self, item: &BreakingNews) -> RepoResult<()>;

    async fn update(&self, item: &BreakingNews) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}
