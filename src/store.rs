//! Session history store
//!
//! Tracks at most one active session plus an ordered history of every
//! session started, with a start/complete/cancel lifecycle and derived
//! queries over the completed subset. After every mutation the session list
//! is persisted through a [`HistoryChannel`]; the active-session reference
//! is transient and never persisted.

use crate::clock::{Clock, IdSource, RandomIds, SystemClock};
use crate::persist::{HistoryChannel, PersistResult, PersistedHistory};
use crate::session::{Session, SessionId};

/// Store name used when none is given
const DEFAULT_STORE_NAME: &str = "history";

/// Holds the session history and the at-most-one active session
pub struct SessionHistoryStore {
    /// Logical name addressing this store's slot in the persistence channel
    name: String,
    /// All sessions, creation order
    sessions: Vec<Session>,
    /// Id of the active session, if any
    current: Option<SessionId>,
    channel: Box<dyn HistoryChannel>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
}

impl SessionHistoryStore {
    /// Create a store backed by the given channel, rehydrating any
    /// previously persisted history
    ///
    /// Uses the system clock and random UUIDs. The active-session slot is
    /// always empty after rehydration, even if a session was active at
    /// shutdown; such a session stays in the list incomplete.
    pub fn new(channel: Box<dyn HistoryChannel>) -> PersistResult<Self> {
        Self::with_parts(
            DEFAULT_STORE_NAME,
            channel,
            Box::new(SystemClock),
            Box::new(RandomIds),
        )
    }

    /// Create a store with explicit clock and ID seams
    pub fn with_parts(
        name: &str,
        channel: Box<dyn HistoryChannel>,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdSource>,
    ) -> PersistResult<Self> {
        let sessions = match channel.load(name)? {
            Some(history) => history.sessions,
            None => Vec::new(),
        };

        Ok(Self {
            name: name.to_string(),
            sessions,
            current: None,
            channel,
            clock,
            ids,
        })
    }

    /// Start a new session and make it the active one
    ///
    /// No validation is performed on the inputs; a non-positive `duration`
    /// is stored verbatim. If a session is already active it is left in the
    /// list incomplete and simply stops being tracked - starting does not
    /// complete or cancel the previous session.
    pub fn start_session(&mut self, title: &str, duration: i64, step_number: Option<u32>) {
        if let Some(prev) = self.current {
            tracing::warn!("Starting new session while {} is active; leaving it incomplete", prev);
        }

        let session = Session::new(
            self.ids.generate(),
            title.to_string(),
            duration,
            self.clock.now(),
            step_number,
        );

        tracing::debug!("Started session {} ({:?})", session.id, session.title);
        self.current = Some(session.id);
        self.sessions.push(session);
        self.persist();
    }

    /// Complete the active session
    ///
    /// Sets its end time to now and keeps it in the list at its original
    /// position. No-op when no session is active.
    pub fn complete_session(&mut self) {
        let Some(id) = self.current.take() else {
            return;
        };

        let now = self.clock.now();
        if let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) {
            session.complete(now);
            tracing::debug!("Completed session {}", id);
        }
        self.persist();
    }

    /// Cancel the active session, removing it from the list entirely
    ///
    /// No-op when no session is active.
    pub fn cancel_session(&mut self) {
        let Some(id) = self.current.take() else {
            return;
        };

        self.sessions.retain(|s| s.id != id);
        tracing::debug!("Cancelled session {}", id);
        self.persist();
    }

    /// Remove all sessions and clear the active reference
    pub fn clear_history(&mut self) {
        self.sessions.clear();
        self.current = None;
        self.persist();
    }

    /// All sessions in creation order, including the active one
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Completed sessions only, in their original order
    pub fn completed_sessions(&self) -> Vec<&Session> {
        self.sessions.iter().filter(|s| s.completed).collect()
    }

    /// Sum of planned durations over completed sessions, in seconds
    pub fn total_time(&self) -> i64 {
        self.sessions
            .iter()
            .filter(|s| s.completed)
            .map(|s| s.duration)
            .sum()
    }

    /// The currently active session, if any
    pub fn active_session(&self) -> Option<&Session> {
        let id = self.current?;
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Total number of sessions in the list
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Persist the session list, swallowing channel failures
    ///
    /// In-memory state is already updated when this runs; a failed write
    /// costs durability, never correctness.
    fn persist(&self) {
        let history = PersistedHistory::new(self.sessions.clone());
        if let Err(e) = self.channel.store(&self.name, &history) {
            tracing::warn!("Failed to persist session history '{}': {}", self.name, e);
        }
    }
}
