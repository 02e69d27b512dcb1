//! Pagination extractor
//!
//! Extracts cursor-based pagination parameters from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use crea_core::traits::PageQuery;
use crea_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

/// Default page size
const DEFAULT_LIMIT: i64 = 50;
/// Maximum page size
const MAX_LIMIT: i64 = 100;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Validated pagination parameters
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    /// Clamped to 1-100
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            before: None,
            after: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn with_limit(limit: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            ..Self::default()
        }
    }

    pub fn page(&self) -> PageQuery {
        PageQuery {
            before: self.before,
            after: self.after,
            limit: self.limit,
        }
    }
}

fn parse_cursor(value: Option<String>, name: &str) -> Result<Option<Snowflake>, ApiError> {
    value
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Snowflake>()
                .map_err(|_| ApiError::invalid_query(format!("Invalid '{name}' cursor format")))
        })
        .transpose()
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = ApiError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        Ok(Pagination {
            before: parse_cursor(params.before, "before")?,
            after: parse_cursor(params.after, "after")?,
            limit: params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Pagination::try_from(params)
    }
}
