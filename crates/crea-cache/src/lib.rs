//! # crea-cache
//!
//! Redis layer for short-lived authentication state.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Refresh Tokens**: Server-side record of live refresh tokens, so logout
//!   and password resets can revoke them
//! - **One-Time Codes**: Hashed email verification codes with expiry, resend
//!   cooldown and attempt limits
//!
//! ## Example
//!
//! ```ignore
//! use crea_cache::{OtpPolicy, OtpPurpose, OtpStore, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let otp = OtpStore::new(pool.clone(), OtpPolicy::default());
//!
//! let code = crea_cache::generate_code();
//! otp.issue(OtpPurpose::Signup, "member@example.com", &code).await?;
//! ```

pub mod otp;
pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export session types
pub use session::{RefreshTokenData, RefreshTokenStore};

// Re-export one-time code types
pub use otp::{
    generate_code, OtpIssue, OtpPolicy, OtpPurpose, OtpRecord, OtpStore, OtpVerdict, OTP_LENGTH,
};
