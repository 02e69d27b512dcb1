//! Error handling utilities for repositories

use crea_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique violation to a domain error, anything else to `DatabaseError`
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Turn "no row matched" into the given not-found error
pub fn ensure_affected<F>(rows_affected: u64, not_found: F) -> Result<(), DomainError>
where
    F: FnOnce() -> DomainError,
{
    if rows_affected == 0 {
        Err(not_found())
    } else {
        Ok(())
    }
}

/// Clamp a page size to what a single query may return
pub fn page_limit(limit: i64) -> i64 {
    limit.clamp(1, 101)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crea_core::Snowflake;

    #[test]
    fn test_ensure_affected() {
        assert!(ensure_affected(1, || DomainError::EventNotFound(Snowflake::new(1))).is_ok());
        let err = ensure_affected(0, || DomainError::EventNotFound(Snowflake::new(1))).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_page_limit() {
        assert_eq!(page_limit(0), 1);
        assert_eq!(page_limit(51), 51);
        assert_eq!(page_limit(1000), 101);
    }

    #[test]
    fn test_non_database_error_maps_to_database_error() {
        let err = map_unique_violation(SqlxError::RowNotFound, || DomainError::EmailAlreadyExists);
        assert_eq!(err.code(), "DATABASE_ERROR");
    }
}
