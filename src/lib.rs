//! FocusTrack Library
//!
//! This library provides focus-session history tracking including:
//! - Start/complete/cancel lifecycle for timed activity sessions
//! - Ordered session history with derived queries
//! - Best-effort durable persistence across restarts

pub mod clock;
pub mod persist;
pub mod session;
pub mod store;

pub use clock::{Clock, IdSource, RandomIds, SystemClock};
pub use persist::{HistoryChannel, JsonFileChannel, MemoryChannel, PersistError, PersistedHistory};
pub use session::{Session, SessionId};
pub use store::SessionHistoryStore;
