//! Injectable time and ID sources
//!
//! The store depends on wall-clock time and unique identifiers; both are
//! behind small traits so tests can substitute deterministic versions.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of current wall-clock time
pub trait Clock {
    /// Current time in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of unique session identifiers
///
/// Implementations must not produce colliding IDs within a single store
/// lifetime under realistic call rates.
pub trait IdSource {
    /// Generate a fresh identifier
    fn generate(&self) -> Uuid;
}

/// Random (v4) UUID generation
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}
