//! User entity - a registered portal account

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Account role. Admins manage content and members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserRole {
    #[default]
    Member,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            other => Err(DomainError::ValidationError(format!("unknown role '{other}'"))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Portal user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    /// Always stored normalized, see [`normalize_email`].
    pub email: String,
    pub phone: Option<String>,
    pub designation: Option<String>,
    pub division: Option<String>,
    pub department: Option<String>,
    pub employee_id: Option<String>,
    pub role: UserRole,
    pub email_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New active member account
    pub fn new(id: Snowflake, name: String, email: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email: normalize_email(email),
            phone: None,
            designation: None,
            division: None,
            department: None,
            employee_id: None,
            role: UserRole::Member,
            email_verified: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Lower-cased, trimmed form used for storage and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(Snowflake::new(1), "Asha".into(), "  Asha@CR.Railnet.GOV.in ");
        assert_eq!(user.email, "asha@cr.railnet.gov.in");
        assert_eq!(user.role, UserRole::Member);
        assert!(user.is_active);
        assert!(!user.email_verified);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!(UserRole::Member.to_string(), "member");
        assert!("owner".parse::<UserRole>().is_err());
    }
}
