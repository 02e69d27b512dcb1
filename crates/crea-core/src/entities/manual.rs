//! Manual entity - reference handbooks and codes

use chrono::{DateTime, Utc};

use crate::value_objects::{DocumentSource, Snowflake};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manual {
    pub id: Snowflake,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub source: DocumentSource,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Manual {
    pub fn new(id: Snowflake, title: String, source: DocumentSource, created_by: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description: None,
            category: None,
            source,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}
