//! # crea-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `crea-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crea_common::AppConfig;
//! use crea_db::{create_pool, run_migrations, PgEventRepository};
//! use crea_core::traits::EventRepository;
//!
//! async fn example(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&config.database).await?;
//!     run_migrations(&pool, &config.database.migrations_dir).await?;
//!     let events = PgEventRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, ping, run_migrations, PgPool};
pub use repositories::{
    PgAchievementRepository, PgAdvertisementRepository, PgBodyMemberRepository,
    PgBreakingNewsRepository, PgCircularRepository, PgCourtCaseRepository, PgDonationRepository,
    PgEventRepository, PgExternalLinkRepository, PgForumPostRepository, PgForumTopicRepository,
    PgManualRepository, PgMembershipRepository, PgNotificationRepository, PgSettingRepository,
    PgUserRepository,
};
