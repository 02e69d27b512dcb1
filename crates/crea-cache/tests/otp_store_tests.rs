//! Integration tests for the Redis-backed one-time code store
//!
//! These tests require a running Redis instance.
//! Set REDIS_URL environment variable before running:
//!
//! ```bash
//! export REDIS_URL="redis://127.0.0.1:6379"
//! cargo test -p crea-cache --test otp_store_tests
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crea_cache::{OtpIssue, OtpPolicy, OtpPurpose, OtpStore, OtpVerdict, RedisPool, RedisPoolConfig};

/// Helper to create a reachable test pool
async fn get_test_pool() -> Option<RedisPool> {
    let url = std::env::var("REDIS_URL").ok()?;
    let pool = RedisPool::new(RedisPoolConfig {
        url,
        max_connections: 4,
    })
    .ok()?;
    pool.health_check().await.ok()?;
    Some(pool)
}

/// An address no other test (or earlier run) has used
fn unique_email() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    format!(
        "otp{}-{}@example.com",
        chrono::Utc::now().timestamp_micros(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

fn policy(ttl_seconds: u64, max_attempts: u32) -> OtpPolicy {
    OtpPolicy {
        ttl_seconds,
        max_attempts,
        resend_cooldown_seconds: 0,
    }
}

#[tokio::test]
async fn test_code_is_single_use() {
    let Some(pool) = get_test_pool().await else {
        eprintln!("Skipping test: REDIS_URL not set");
        return;
    };
    let store = OtpStore::new(pool, policy(600, 5));
    let email = unique_email();

    let issued = store.issue(OtpPurpose::Signup, &email, "482913").await.unwrap();
    assert_eq!(issued, OtpIssue::Issued);

    let first = store.verify(OtpPurpose::Signup, &email, "482913").await.unwrap();
    assert_eq!(first, OtpVerdict::Valid);

    let second = store.verify(OtpPurpose::Signup, &email, "482913").await.unwrap();
    assert_eq!(second, OtpVerdict::Expired);
}

#[tokio::test]
async fn test_code_is_scoped_to_purpose() {
    let Some(pool) = get_test_pool().await else {
        eprintln!("Skipping test: REDIS_URL not set");
        return;
    };
    let store = OtpStore::new(pool, policy(600, 5));
    let email = unique_email();

    store.issue(OtpPurpose::Signup, &email, "120034").await.unwrap();

    let reset = store.verify(OtpPurpose::PasswordReset, &email, "120034").await.unwrap();
    assert_eq!(reset, OtpVerdict::Expired);

    let signup = store.verify(OtpPurpose::Signup, &email, "120034").await.unwrap();
    assert_eq!(signup, OtpVerdict::Valid);
}

#[tokio::test]
async fn test_wrong_guesses_exhaust_the_code() {
    let Some(pool) = get_test_pool().await else {
        eprintln!("Skipping test: REDIS_URL not set");
        return;
    };
    let store = OtpStore::new(pool, policy(600, 3));
    let email = unique_email();

    store.issue(OtpPurpose::PasswordReset, &email, "555123").await.unwrap();

    for remaining in [2, 1, 0] {
        let verdict = store.verify(OtpPurpose::PasswordReset, &email, "999999").await.unwrap();
        assert_eq!(verdict, OtpVerdict::Invalid { remaining });
    }

    // The right code no longer helps once the guesses are spent
    let verdict = store.verify(OtpPurpose::PasswordReset, &email, "555123").await.unwrap();
    assert_eq!(verdict, OtpVerdict::Exhausted);

    let verdict = store.verify(OtpPurpose::PasswordReset, &email, "555123").await.unwrap();
    assert_eq!(verdict, OtpVerdict::Expired);
}

#[tokio::test]
async fn test_code_expires_after_ttl() {
    let Some(pool) = get_test_pool().await else {
        eprintln!("Skipping test: REDIS_URL not set");
        return;
    };
    let store = OtpStore::new(pool, policy(1, 5));
    let email = unique_email();

    store.issue(OtpPurpose::Signup, &email, "700700").await.unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;

    let verdict = store.verify(OtpPurpose::Signup, &email, "700700").await.unwrap();
    assert_eq!(verdict, OtpVerdict::Expired);
}

#[tokio::test]
async fn test_reissue_replaces_code_and_cooldown_throttles() {
    let Some(pool) = get_test_pool().await else {
        eprintln!("Skipping test: REDIS_URL not set");
        return;
    };
    let store = OtpStore::new(
        pool,
        OtpPolicy {
            ttl_seconds: 600,
            max_attempts: 5,
            resend_cooldown_seconds: 60,
        },
    );
    let email = unique_email();

    assert_eq!(store.issue(OtpPurpose::Signup, &email, "111222").await.unwrap(), OtpIssue::Issued);

    match store.issue(OtpPurpose::Signup, &email, "333444").await.unwrap() {
        OtpIssue::Cooldown { retry_after } => assert!((1..=60).contains(&retry_after)),
        other => panic!("expected cooldown, got {other:?}"),
    }

    // Clearing lifts the cooldown; the new code replaces the old one
    store.clear(OtpPurpose::Signup, &email).await.unwrap();
    assert_eq!(store.issue(OtpPurpose::Signup, &email, "333444").await.unwrap(), OtpIssue::Issued);

    let old = store.verify(OtpPurpose::Signup, &email, "111222").await.unwrap();
    assert_eq!(old, OtpVerdict::Invalid { remaining: 4 });
    let new = store.verify(OtpPurpose::Signup, &email, "333444").await.unwrap();
    assert_eq!(new, OtpVerdict::Valid);
}

#[tokio::test]
async fn test_concurrent_correct_guesses_succeed_once() {
    let Some(pool) = get_test_pool().await else {
        eprintln!("Skipping test: REDIS_URL not set");
        return;
    };
    let store = OtpStore::new(pool, policy(600, 5));
    let email = unique_email();

    store.issue(OtpPurpose::Signup, &email, "246810").await.unwrap();

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            let email = email.clone();
            tokio::spawn(async move { store.verify(OtpPurpose::Signup, &email, "246810").await })
        })
        .collect();

    let mut valid = 0;
    for attempt in attempts {
        if attempt.await.unwrap().unwrap() == OtpVerdict::Valid {
            valid += 1;
        }
    }
    assert_eq!(valid, 1);
}
