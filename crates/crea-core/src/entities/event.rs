//! Event entity - association meetings, functions, and programmes

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: Snowflake,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn new(
        id: Snowflake,
        title: String,
        description: String,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
        created_by: Snowflake,
    ) -> Result<Self, DomainError> {
        check_schedule(starts_at, ends_at)?;
        let now = Utc::now();
        Ok(Self {
            id,
            title,
            description,
            location: None,
            starts_at,
            ends_at,
            image_url: None,
            created_by,
            created_at: now,
            updated_at: now,
        })
    }

    /// An event is upcoming until its end (or its start, when open-ended) has passed.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.ends_at.unwrap_or(self.starts_at) >= now
    }

    pub fn reschedule(
        &mut self,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError> {
        check_schedule(starts_at, ends_at)?;
        self.starts_at = starts_at;
        self.ends_at = ends_at;
        Ok(())
    }
}

/// Which slice of the calendar a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventWindow {
    #[default]
    All,
    Upcoming,
    Past,
}

impl std::str::FromStr for EventWindow {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            other => Err(DomainError::ValidationError(format!(
                "when must be upcoming, past or all, got '{other}'"
            ))),
        }
    }
}

fn check_schedule(starts_at: DateTime<Utc>, ends_at: Option<DateTime<Utc>>) -> Result<(), DomainError> {
    match ends_at {
        Some(end) if end < starts_at => Err(DomainError::InvalidSchedule),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Result<Event, DomainError> {
        Event::new(Snowflake::new(1), "AGM".into(), "Annual meet".into(), start, end, Snowflake::new(9))
    }

    #[test]
    fn test_end_before_start_rejected() {
        let now = Utc::now();
        let err = event(now, Some(now - Duration::hours(1))).unwrap_err();
        assert_eq!(err.code(), "INVALID_SCHEDULE");
        assert!(event(now, Some(now)).is_ok());
    }

    #[test]
    fn test_upcoming_uses_end_when_present() {
        let now = Utc::now();
        let running = event(now - Duration::hours(2), Some(now + Duration::hours(1))).unwrap();
        assert!(running.is_upcoming(now));

        let finished = event(now - Duration::days(2), None).unwrap();
        assert!(!finished.is_upcoming(now));
    }

    #[test]
    fn test_reschedule_keeps_invariant() {
        let now = Utc::now();
        let mut ev = event(now, None).unwrap();
        assert!(ev.reschedule(now, Some(now - Duration::minutes(5))).is_err());
        assert_eq!(ev.starts_at, now);
        assert!(ev.ends_at.is_none());
    }

    #[test]
    fn test_window_parse() {
        assert_eq!("past".parse::<EventWindow>().unwrap(), EventWindow::Past);
        assert!("soon".parse::<EventWindow>().is_err());
    }
}
