//! Site content - small admin-curated records shown on the public pages

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::Snowflake;

/// Quick link to an external site (railway portals, pay calculators, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLink {
    pub id: Snowflake,
    pub title: String,
    pub url: String,
    pub category: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Office bearer of the association
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyMember {
    pub id: Snowflake,
    pub name: String,
    pub designation: String,
    pub division: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advertisement {
    pub id: Snowflake,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Advertisement {
    /// Shown when switched on and `now` falls inside the optional window.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.starts_at.map_or(true, |start| start <= now)
            && self.ends_at.map_or(true, |end| now < end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub id: Snowflake,
    pub title: String,
    pub description: Option<String>,
    pub achieved_on: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ticker item on the home page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakingNews {
    pub id: Snowflake,
    pub text: String,
    pub link: Option<String>,
    pub is_active: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ad(is_active: bool, starts: Option<i64>, ends: Option<i64>) -> Advertisement {
        let now = Utc::now();
        Advertisement {
            id: Snowflake::new(1),
            title: "Ad".into(),
            image_url: "/uploads/images/1.png".into(),
            link_url: None,
            is_active,
            starts_at: starts.map(|h| now + Duration::hours(h)),
            ends_at: ends.map(|h| now + Duration::hours(h)),
            position: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_advertisement_window() {
        let now = Utc::now();
        assert!(ad(true, None, None).is_live(now));
        assert!(ad(true, Some(-1), Some(1)).is_live(now));
        assert!(!ad(false, None, None).is_live(now));
        assert!(!ad(true, Some(1), None).is_live(now));
        assert!(!ad(true, None, Some(-1)).is_live(now));
    }
}
