//! Service context - dependency container for services
//!
//! Holds all repositories, cache stores, and outbound integrations needed by services.

use std::sync::Arc;

use crea_cache::{OtpPolicy, OtpStore, RedisPool, RefreshTokenStore};
use crea_common::auth::JwtService;
use crea_common::{AppConfig, MembershipFees};
use crea_core::traits::{
    AchievementRepository, AdvertisementRepository, BodyMemberRepository, BreakingNewsRepository,
    CircularRepository, CourtCaseRepository, DonationRepository, EventRepository,
    ExternalLinkRepository, ForumPostRepository, ForumTopicRepository, Mailer, ManualRepository,
    MembershipRepository, NotificationRepository, PaymentGateway, SettingRepository,
    UserRepository,
};
use crea_core::SnowflakeGenerator;
use crea_db::PgPool;

use crate::storage::FileStorage;

use super::error::{ServiceError, ServiceResult};

/// Portal-level settings the services read
#[derive(Debug, Clone)]
pub struct PortalSettings {
    /// Frontend base URL used in emails
    pub public_url: String,
    pub currency: String,
    pub fees: MembershipFees,
    pub otp: OtpPolicy,
}

impl PortalSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            public_url: config.app.public_url.trim_end_matches('/').to_string(),
            currency: config.payment.currency.clone(),
            fees: config.membership,
            otp: OtpPolicy::from(&config.otp),
        }
    }
}

/// Every repository the services use
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub events: Arc<dyn EventRepository>,
    pub circulars: Arc<dyn CircularRepository>,
    pub manuals: Arc<dyn ManualRepository>,
    pub court_cases: Arc<dyn CourtCaseRepository>,
    pub forum_topics: Arc<dyn ForumTopicRepository>,
    pub forum_posts: Arc<dyn ForumPostRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub donations: Arc<dyn DonationRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub settings: Arc<dyn SettingRepository>,
    pub external_links: Arc<dyn ExternalLinkRepository>,
    pub body_members: Arc<dyn BodyMemberRepository>,
    pub advertisements: Arc<dyn AdvertisementRepository>,
    pub achievements: Arc<dyn AchievementRepository>,
    pub breaking_news: Arc<dyn BreakingNewsRepository>,
}

impl Repositories {
    /// PostgreSQL implementations sharing one pool
    pub fn postgres(pool: &PgPool) -> Self {
        use crea_db::{
            PgAchievementRepository, PgAdvertisementRepository, PgBodyMemberRepository,
            PgBreakingNewsRepository, PgCircularRepository, PgCourtCaseRepository,
            PgDonationRepository, PgEventRepository, PgExternalLinkRepository,
            PgForumPostRepository, PgForumTopicRepository, PgManualRepository,
            PgMembershipRepository, PgNotificationRepository, PgSettingRepository,
            PgUserRepository,
        };

        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            events: Arc::new(PgEventRepository::new(pool.clone())),
            circulars: Arc::new(PgCircularRepository::new(pool.clone())),
            manuals: Arc::new(PgManualRepository::new(pool.clone())),
            court_cases: Arc::new(PgCourtCaseRepository::new(pool.clone())),
            forum_topics: Arc::new(PgForumTopicRepository::new(pool.clone())),
            forum_posts: Arc::new(PgForumPostRepository::new(pool.clone())),
            memberships: Arc::new(PgMembershipRepository::new(pool.clone())),
            donations: Arc::new(PgDonationRepository::new(pool.clone())),
            notifications: Arc::new(PgNotificationRepository::new(pool.clone())),
            settings: Arc::new(PgSettingRepository::new(pool.clone())),
            external_links: Arc::new(PgExternalLinkRepository::new(pool.clone())),
            body_members: Arc::new(PgBodyMemberRepository::new(pool.clone())),
            advertisements: Arc::new(PgAdvertisementRepository::new(pool.clone())),
            achievements: Arc::new(PgAchievementRepository::new(pool.clone())),
            breaking_news: Arc::new(PgBreakingNewsRepository::new(pool.clone())),
        }
    }
}

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - Redis stores for refresh tokens and one-time codes
/// - JWT service for authentication
/// - Snowflake generator for ID generation
/// - Mailer, payment gateway and file storage
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    redis_pool: RedisPool,
    repos: Repositories,
    refresh_token_store: RefreshTokenStore,
    otp_store: OtpStore,
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    mailer: Arc<dyn Mailer>,
    payment_gateway: Arc<dyn PaymentGateway>,
    storage: FileStorage,
    settings: PortalSettings,
}

impl ServiceContext {
    // === Infrastructure ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &RedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.repos.users.as_ref()
    }

    pub fn event_repo(&self) -> &dyn EventRepository {
        self.repos.events.as_ref()
    }

    pub fn circular_repo(&self) -> &dyn CircularRepository {
        self.repos.circulars.as_ref()
    }

    pub fn manual_repo(&self) -> &dyn ManualRepository {
        self.repos.manuals.as_ref()
    }

    pub fn court_case_repo(&self) -> &dyn CourtCaseRepository {
        self.repos.court_cases.as_ref()
    }

    pub fn forum_topic_repo(&self) -> &dyn ForumTopicRepository {
        self.repos.forum_topics.as_ref()
    }

    pub fn forum_post_repo(&self) -> &dyn ForumPostRepository {
        self.repos.forum_posts.as_ref()
    }

    pub fn membership_repo(&self) -> &dyn MembershipRepository {
        self.repos.memberships.as_ref()
    }

    pub fn donation_repo(&self) -> &dyn DonationRepository {
        self.repos.donations.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.repos.notifications.as_ref()
    }

    pub fn setting_repo(&self) -> &dyn SettingRepository {
        self.repos.settings.as_ref()
    }

    pub fn external_link_repo(&self) -> &dyn ExternalLinkRepository {
        self.repos.external_links.as_ref()
    }

    pub fn body_member_repo(&self) -> &dyn BodyMemberRepository {
        self.repos.body_members.as_ref()
    }

    pub fn advertisement_repo(&self) -> &dyn AdvertisementRepository {
        self.repos.advertisements.as_ref()
    }

    pub fn achievement_repo(&self) -> &dyn AchievementRepository {
        self.repos.achievements.as_ref()
    }

    pub fn breaking_news_repo(&self) -> &dyn BreakingNewsRepository {
        self.repos.breaking_news.as_ref()
    }

    // === Cache Stores ===

    /// Get the refresh token store
    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    /// Get the one-time code store
    pub fn otp_store(&self) -> &OtpStore {
        &self.otp_store
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> crea_core::Snowflake {
        self.snowflake_generator.generate()
    }

    pub fn mailer(&self) -> &dyn Mailer {
        self.mailer.as_ref()
    }

    pub fn payment_gateway(&self) -> &dyn PaymentGateway {
        self.payment_gateway.as_ref()
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    pub fn settings(&self) -> &PortalSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &self.redis_pool)
            .field("repositories", &"...")
            .field("storage", &self.storage)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
    repos: Option<Repositories>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    mailer: Option<Arc<dyn Mailer>>,
    payment_gateway: Option<Arc<dyn PaymentGateway>>,
    storage: Option<FileStorage>,
    settings: Option<PortalSettings>,
    refresh_token_ttl: Option<u64>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    /// Override the repositories; defaults to PostgreSQL ones on `pool`
    pub fn repositories(mut self, repos: Repositories) -> Self {
        self.repos = Some(repos);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn payment_gateway(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.payment_gateway = Some(gateway);
        self
    }

    pub fn storage(mut self, storage: FileStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn settings(mut self, settings: PortalSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Lifetime of stored refresh tokens, normally the refresh JWT expiry
    pub fn refresh_token_ttl(mut self, seconds: u64) -> Self {
        self.refresh_token_ttl = Some(seconds);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let pool = self.pool.ok_or_else(|| ServiceError::validation("pool is required"))?;
        let redis_pool = self
            .redis_pool
            .ok_or_else(|| ServiceError::validation("redis_pool is required"))?;
        let jwt_service = self
            .jwt_service
            .ok_or_else(|| ServiceError::validation("jwt_service is required"))?;
        let settings = self
            .settings
            .ok_or_else(|| ServiceError::validation("settings is required"))?;

        let refresh_token_store = match self.refresh_token_ttl {
            Some(ttl) => RefreshTokenStore::with_ttl(redis_pool.clone(), ttl),
            None => RefreshTokenStore::new(redis_pool.clone()),
        };
        let otp_store = OtpStore::new(redis_pool.clone(), settings.otp);
        let repos = self.repos.unwrap_or_else(|| Repositories::postgres(&pool));

        Ok(ServiceContext {
            repos,
            refresh_token_store,
            otp_store,
            jwt_service,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            mailer: self
                .mailer
                .ok_or_else(|| ServiceError::validation("mailer is required"))?,
            payment_gateway: self
                .payment_gateway
                .ok_or_else(|| ServiceError::validation("payment_gateway is required"))?,
            storage: self
                .storage
                .ok_or_else(|| ServiceError::validation("storage is required"))?,
            settings,
            pool,
            redis_pool,
        })
    }
}
