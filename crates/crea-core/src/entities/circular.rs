//! Circular entity - official notices published to members

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{DocumentSource, Snowflake};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circular {
    pub id: Snowflake,
    pub title: String,
    pub circular_number: Option<String>,
    pub issued_on: NaiveDate,
    pub category: Option<String>,
    pub source: DocumentSource,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Circular {
    pub fn new(
        id: Snowflake,
        title: String,
        issued_on: NaiveDate,
        source: DocumentSource,
        created_by: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            circular_number: None,
            issued_on,
            category: None,
            source,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}
