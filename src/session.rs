//! Session record type for focus tracking
//!
//! A `Session` represents one timed activity instance: it is created when
//! tracking starts, and either completed (kept in history with an end time)
//! or cancelled (removed from history entirely).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a session
pub type SessionId = Uuid;

/// A single timed activity instance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Unique identifier, assigned at creation and never reused
    pub id: SessionId,
    /// Display label, immutable after creation
    pub title: String,
    /// Planned length in seconds (accepted verbatim, including non-positive values)
    pub duration: i64,
    /// Timestamp captured at creation
    pub start_time: DateTime<Utc>,
    /// Set exactly once, when the session completes
    pub end_time: Option<DateTime<Utc>>,
    /// False at creation, set true exactly once on completion
    pub completed: bool,
    /// Optional tag correlating the session to an external ordered step
    pub step_number: Option<u32>,
}

impl Session {
    /// Create a new session in the active (incomplete) state
    pub fn new(
        id: SessionId,
        title: String,
        duration: i64,
        start_time: DateTime<Utc>,
        step_number: Option<u32>,
    ) -> Self {
        Self {
            id,
            title,
            duration,
            start_time,
            end_time: None,
            completed: false,
            step_number,
        }
    }

    /// Mark this session completed at the given time
    ///
    /// Completion is terminal: `completed` and `end_time` are set exactly once.
    pub(crate) fn complete(&mut self, end_time: DateTime<Utc>) {
        self.completed = true;
        self.end_time = Some(end_time);
    }

    /// Whether this session is still incomplete
    pub fn is_incomplete(&self) -> bool {
        !self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_session_creation() {
        let session = Session::new(
            Uuid::new_v4(),
            "Focus Block".to_string(),
            1500,
            sample_start(),
            Some(2),
        );
        assert_eq!(session.title, "Focus Block");
        assert_eq!(session.duration, 1500);
        assert_eq!(session.step_number, Some(2));
        assert!(!session.completed);
        assert!(session.end_time.is_none());
        assert!(session.is_incomplete());
    }

    #[test]
    fn test_session_complete() {
        let mut session = Session::new(
            Uuid::new_v4(),
            "Test".to_string(),
            60,
            sample_start(),
            None,
        );
        let end = sample_start() + chrono::Duration::seconds(60);
        session.complete(end);
        assert!(session.completed);
        assert_eq!(session.end_time, Some(end));
        assert!(!session.is_incomplete());
    }

    #[test]
    fn test_negative_duration_accepted() {
        // Durations are stored verbatim; nothing validates them
        let session = Session::new(Uuid::new_v4(), "Odd".to_string(), -30, sample_start(), None);
        assert_eq!(session.duration, -30);
    }

    #[test]
    fn test_session_serde_round_trip() {
        let mut session = Session::new(
            Uuid::new_v4(),
            "Review".to_string(),
            900,
            sample_start(),
            Some(7),
        );
        session.complete(sample_start() + chrono::Duration::seconds(900));

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn test_optional_fields_round_trip_when_absent() {
        let session = Session::new(Uuid::new_v4(), "Plain".to_string(), 300, sample_start(), None);
        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.end_time, None);
        assert_eq!(restored.step_number, None);
    }
}
