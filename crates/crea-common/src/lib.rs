//! # crea-common
//!
//! Shared utilities: configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    equalize_verification_time, hash_password, validate_password_strength, verify_password,
    Claims, JwtService, TokenPair, TokenType,
};
pub use config::{
    AdminBootstrap, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, MailConfig, MembershipFees, OtpConfig, PaymentConfig, RateLimitConfig, RedisConfig,
    ServerConfig, SnowflakeConfig, StorageConfig,
};
pub use error::{domain_status_code, AppError, AppResult, ErrorResponse};
pub use telemetry::{try_init_tracing, TracingConfig, TracingError};
