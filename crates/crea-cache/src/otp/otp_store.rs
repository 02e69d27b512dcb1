//! One-time email verification codes.
//!
//! A code lives at `otp:{purpose}:{email}` as a JSON record holding the
//! SHA-256 of the code and the number of wrong guesses so far. Issuing a new
//! code overwrites the record. A separate `otp_cooldown:` key, written with
//! `SET NX EX`, throttles resends.
//!
//! A correct guess deletes the record and only the caller whose `DEL`
//! removed it succeeds, so two concurrent submissions of the same code
//! cannot both pass.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::pool::{RedisPool, RedisResult};

const OTP_PREFIX: &str = "otp:";
const COOLDOWN_PREFIX: &str = "otp_cooldown:";

/// Number of digits in a code
pub const OTP_LENGTH: usize = 6;

/// What a code may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    Signup,
    PasswordReset,
}

impl OtpPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(Self::Signup),
            "password_reset" => Ok(Self::PasswordReset),
            other => Err(format!("unknown otp purpose: {other}")),
        }
    }
}

/// Tunables, normally taken from `crea_common::OtpConfig`
#[derive(Debug, Clone, Copy)]
pub struct OtpPolicy {
    pub ttl_seconds: u64,
    pub max_attempts: u32,
    pub resend_cooldown_seconds: u64,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            ttl_seconds: 600,
            max_attempts: 5,
            resend_cooldown_seconds: 60,
        }
    }
}

impl From<&crea_common::OtpConfig> for OtpPolicy {
    fn from(config: &crea_common::OtpConfig) -> Self {
        Self {
            ttl_seconds: config.ttl_seconds,
            max_attempts: config.max_attempts,
            resend_cooldown_seconds: config.resend_cooldown_seconds,
        }
    }
}

/// Result of issuing a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpIssue {
    Issued,
    /// A code was sent recently; retry after this many seconds
    Cooldown { retry_after: u64 },
}

/// Result of checking a submitted code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpVerdict {
    /// Correct; the code has been consumed
    Valid,
    /// Wrong code; `remaining` guesses are left
    Invalid { remaining: u32 },
    /// No code outstanding (never issued, expired, or already used)
    Expired,
    /// Too many wrong guesses; the code has been discarded
    Exhausted,
}

/// Stored state of an outstanding code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRecord {
    pub code_hash: String,
    pub attempts: u32,
    pub created_at: i64,
}

impl OtpRecord {
    pub fn new(code: &str) -> Self {
        Self {
            code_hash: hash_code(code),
            attempts: 0,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Judge a guess against this record without touching storage.
    pub fn check(&self, code: &str, max_attempts: u32) -> OtpVerdict {
        if self.attempts >= max_attempts {
            return OtpVerdict::Exhausted;
        }
        if hash_code(code.trim()) == self.code_hash {
            OtpVerdict::Valid
        } else {
            OtpVerdict::Invalid {
                remaining: max_attempts - self.attempts - 1,
            }
        }
    }
}

fn hash_code(code: &str) -> String {
    hex::encode(Sha256::digest(code.as_bytes()))
}

/// Random zero-padded numeric code
pub fn generate_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{n:0width$}", width = OTP_LENGTH)
}

/// Redis-backed OTP store
#[derive(Clone)]
pub struct OtpStore {
    pool: RedisPool,
    policy: OtpPolicy,
}

impl OtpStore {
    #[must_use]
    pub fn new(pool: RedisPool, policy: OtpPolicy) -> Self {
        Self { pool, policy }
    }

    pub fn policy(&self) -> OtpPolicy {
        self.policy
    }

    fn key(purpose: OtpPurpose, email: &str) -> String {
        format!("{OTP_PREFIX}{purpose}:{email}")
    }

    fn cooldown_key(purpose: OtpPurpose, email: &str) -> String {
        format!("{COOLDOWN_PREFIX}{purpose}:{email}")
    }

    /// Store `code` for `email`, replacing any outstanding code, unless the
    /// resend cooldown is still running.
    pub async fn issue(&self, purpose: OtpPurpose, email: &str, code: &str) -> RedisResult<OtpIssue> {
        let cooldown_key = Self::cooldown_key(purpose, email);

        if self.policy.resend_cooldown_seconds > 0 {
            let mut conn = self.pool.get().await?;
            let claimed: Option<String> = redis::cmd("SET")
                .arg(&cooldown_key)
                .arg(1)
                .arg("NX")
                .arg("EX")
                .arg(self.policy.resend_cooldown_seconds)
                .query_async(&mut conn)
                .await?;

            if claimed.is_none() {
                let remaining: i64 = conn.ttl(&cooldown_key).await?;
                let retry_after = u64::try_from(remaining).ok().filter(|s| *s > 0).unwrap_or(1);
                return Ok(OtpIssue::Cooldown { retry_after });
            }
        }

        let record = OtpRecord::new(code);
        self.pool
            .put_json(&Self::key(purpose, email), &record, self.policy.ttl_seconds)
            .await?;

        tracing::debug!(purpose = %purpose, "Issued one-time code");

        Ok(OtpIssue::Issued)
    }

    /// Check a submitted code, consuming it when correct.
    pub async fn verify(&self, purpose: OtpPurpose, email: &str, code: &str) -> RedisResult<OtpVerdict> {
        let key = Self::key(purpose, email);
        let Some(mut record) = self.pool.get_json::<OtpRecord>(&key).await? else {
            return Ok(OtpVerdict::Expired);
        };

        match record.check(code, self.policy.max_attempts) {
            OtpVerdict::Valid => {
                // Only the request whose DEL removed the key wins.
                if self.pool.remove(&key).await? {
                    Ok(OtpVerdict::Valid)
                } else {
                    Ok(OtpVerdict::Expired)
                }
            }
            OtpVerdict::Exhausted => {
                self.pool.remove(&key).await?;
                Ok(OtpVerdict::Exhausted)
            }
            verdict @ OtpVerdict::Invalid { .. } => {
                record.attempts += 1;
                let serialized = serde_json::to_string(&record)?;
                let mut conn = self.pool.get().await?;
                // XX: never resurrect a code that expired meanwhile.
                let _: Option<String> = redis::cmd("SET")
                    .arg(&key)
                    .arg(serialized)
                    .arg("XX")
                    .arg("KEEPTTL")
                    .query_async(&mut conn)
                    .await?;
                Ok(verdict)
            }
            OtpVerdict::Expired => Ok(OtpVerdict::Expired),
        }
    }

    /// Drop any outstanding code and cooldown for this email
    pub async fn clear(&self, purpose: OtpPurpose, email: &str) -> RedisResult<()> {
        self.pool
            .remove_all(&[Self::key(purpose, email), Self::cooldown_key(purpose, email)])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_are_six_digits() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), OTP_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_record_never_stores_plain_code() {
        let record = OtpRecord::new("123456");
        assert_ne!(record.code_hash, "123456");
        assert_eq!(record.code_hash.len(), 64);
    }

    #[test]
    fn test_check_correct_and_wrong() {
        let record = OtpRecord::new("482913");
        assert_eq!(record.check("482913", 5), OtpVerdict::Valid);
        assert_eq!(record.check(" 482913 ", 5), OtpVerdict::Valid);
        assert_eq!(record.check("000000", 5), OtpVerdict::Invalid { remaining: 4 });
    }

    #[test]
    fn test_check_exhausted_even_with_right_code() {
        let mut record = OtpRecord::new("482913");
        record.attempts = 4;
        assert_eq!(record.check("111111", 5), OtpVerdict::Invalid { remaining: 0 });
        record.attempts = 5;
        assert_eq!(record.check("482913", 5), OtpVerdict::Exhausted);
    }

    #[test]
    fn test_keys_are_scoped_by_purpose() {
        assert_eq!(
            OtpStore::key(OtpPurpose::Signup, "a@b.in"),
            "otp:signup:a@b.in"
        );
        assert_eq!(
            OtpStore::cooldown_key(OtpPurpose::PasswordReset, "a@b.in"),
            "otp_cooldown:password_reset:a@b.in"
        );
    }

    #[test]
    fn test_purpose_parsing() {
        assert_eq!("signup".parse::<OtpPurpose>().unwrap(), OtpPurpose::Signup);
        assert_eq!(
            serde_json::from_str::<OtpPurpose>("\"password_reset\"").unwrap(),
            OtpPurpose::PasswordReset
        );
        assert!("login".parse::<OtpPurpose>().is_err());
    }
}
