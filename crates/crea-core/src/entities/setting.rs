//! Setting entity - a site-wide key/value entry

use chrono::{DateTime, Utc};

use crate::error::DomainError;

pub const MAX_SETTING_KEY_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

/// Keys are 1-64 characters from `[a-z0-9_.-]`.
pub fn validate_setting_key(key: &str) -> Result<(), DomainError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_SETTING_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'_' | b'.' | b'-'));
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidSettingKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_keys() {
        assert!(validate_setting_key("site.title").is_ok());
        assert!(validate_setting_key("membership_form-v2").is_ok());
        assert!(validate_setting_key("").is_err());
        assert!(validate_setting_key("Site.Title").is_err());
        assert!(validate_setting_key("a b").is_err());
        assert!(validate_setting_key(&"k".repeat(65)).is_err());
        assert!(validate_setting_key(&"k".repeat(64)).is_ok());
    }
}
