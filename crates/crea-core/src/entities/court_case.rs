//! Court case entity - litigation the association tracks for its members

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DomainError;
use crate::value_objects::{DocumentSource, Snowflake};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CourtCaseStatus {
    #[default]
    Pending,
    Ongoing,
    Disposed,
}

impl CourtCaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ongoing => "ongoing",
            Self::Disposed => "disposed",
        }
    }
}

impl std::str::FromStr for CourtCaseStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "ongoing" => Ok(Self::Ongoing),
            "disposed" => Ok(Self::Disposed),
            other => Err(DomainError::ValidationError(format!(
                "unknown court case status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourtCase {
    pub id: Snowflake,
    pub case_number: String,
    pub title: String,
    pub court: String,
    pub status: CourtCaseStatus,
    pub next_hearing: Option<NaiveDate>,
    pub description: Option<String>,
    /// Optional order or judgment copy.
    pub document: Option<DocumentSource>,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CourtCase {
    pub fn new(
        id: Snowflake,
        case_number: String,
        title: String,
        court: String,
        created_by: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            case_number,
            title,
            court,
            status: CourtCaseStatus::Pending,
            next_hearing: None,
            description: None,
            document: None,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}
