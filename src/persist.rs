//! Durable persistence channel for session history
//!
//! Provides best-effort persistence of the session list with:
//! - A key-value channel trait addressed by a logical store name
//! - A JSON file implementation with atomic writes
//! - An in-memory implementation for tests and embedding
//! - Versioned history files

use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

/// Version of the history file format
const HISTORY_VERSION: u32 = 1;

/// Errors that can occur while reading or writing persisted history
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: u32, actual: u32 },
}

/// Result type alias for persistence operations
pub type PersistResult<T> = std::result::Result<T, PersistError>;

/// The projection of store state that gets persisted
///
/// Only the session list is durable. The active-session reference is
/// transient by design: a session that was active at shutdown is rehydrated
/// in its incomplete state and is not re-activated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedHistory {
    /// History file format version
    pub version: u32,
    /// All sessions in creation order
    pub sessions: Vec<Session>,
}

impl PersistedHistory {
    /// Create a projection from the in-memory session list
    pub fn new(sessions: Vec<Session>) -> Self {
        Self {
            version: HISTORY_VERSION,
            sessions,
        }
    }

    /// Verify version compatibility
    fn check_version(self) -> PersistResult<Self> {
        if self.version != HISTORY_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: HISTORY_VERSION,
                actual: self.version,
            });
        }
        Ok(self)
    }
}

/// Durable key-value storage addressed by a logical store name
pub trait HistoryChannel {
    /// Load the history stored under `name`, or `None` if nothing was persisted yet
    fn load(&self, name: &str) -> PersistResult<Option<PersistedHistory>>;

    /// Durably store `history` under `name`, replacing any previous value
    fn store(&self, name: &str, history: &PersistedHistory) -> PersistResult<()>;
}

/// File-backed channel storing each name as `{base_dir}/{name}.json`
#[derive(Debug, Clone)]
pub struct JsonFileChannel {
    base_dir: PathBuf,
}

impl JsonFileChannel {
    /// Create a channel rooted at the given directory
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Default storage directory under the platform data-local dir
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("focustrack")
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{name}.json"))
    }
}

impl Default for JsonFileChannel {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}

impl HistoryChannel for JsonFileChannel {
    fn load(&self, name: &str) -> PersistResult<Option<PersistedHistory>> {
        let path = self.entry_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let json = std::fs::read_to_string(&path)?;
        let history: PersistedHistory = serde_json::from_str(&json)?;
        let history = history.check_version()?;

        tracing::info!(
            "Loaded {} sessions from {:?}",
            history.sessions.len(),
            path
        );
        Ok(Some(history))
    }

    fn store(&self, name: &str, history: &PersistedHistory) -> PersistResult<()> {
        let path = self.entry_path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(history)?;

        // Write to temporary file first, then rename (atomic operation)
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, json)?;
        std::fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved {} sessions to {:?}", history.sessions.len(), path);
        Ok(())
    }
}

/// In-memory channel for tests and filesystem-free embedding
///
/// Values are kept as serialized JSON so the round-trip matches the file
/// channel's behavior.
#[derive(Debug, Default)]
pub struct MemoryChannel {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryChannel {
    /// Create an empty in-memory channel
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryChannel for MemoryChannel {
    fn load(&self, name: &str) -> PersistResult<Option<PersistedHistory>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(name) {
            Some(json) => {
                let history: PersistedHistory = serde_json::from_str(json)?;
                Ok(Some(history.check_version()?))
            }
            None => Ok(None),
        }
    }

    fn store(&self, name: &str, history: &PersistedHistory) -> PersistResult<()> {
        let json = serde_json::to_string(history)?;
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(name.to_string(), json);
        Ok(())
    }
}
