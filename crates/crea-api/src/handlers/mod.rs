//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod documents;
pub mod donations;
pub mod events;
pub mod forum;
pub mod health;
pub mod memberships;
pub mod notifications;
pub mod payments;
pub mod settings;
pub mod site_content;
pub mod uploads;
pub mod users;

use std::fmt::Display;
use std::str::FromStr;

use crate::response::{ApiError, ApiResult};

/// Parse an optional enum-valued query parameter; empty means absent.
pub(crate) fn parse_filter<T>(value: Option<&str>) -> ApiResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<T>().map_err(|e| ApiError::invalid_query(e.to_string())))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crea_core::entities::{CourtCaseStatus, EventWindow};

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter::<EventWindow>(None).unwrap(), None);
        assert_eq!(parse_filter::<EventWindow>(Some(" ")).unwrap(), None);
        assert_eq!(
            parse_filter::<EventWindow>(Some("upcoming")).unwrap(),
            Some(EventWindow::Upcoming)
        );
        assert_eq!(
            parse_filter::<CourtCaseStatus>(Some("disposed")).unwrap(),
            Some(CourtCaseStatus::Disposed)
        );

        let err = parse_filter::<EventWindow>(Some("someday")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_QUERY_PARAMETER");
    }
}
