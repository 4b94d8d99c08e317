//! Dependency injection traits and their production implementations.
//!
//! All external dependencies of the reducer and store are abstracted behind
//! traits and injected via [`TodoEnvironment`]. Tests swap in deterministic
//! implementations (see `taskstore-testing`).

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

use crate::todo::TodoId;

/// Clock trait - abstracts time operations for testability
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Id generation trait - abstracts todo id assignment for testability
pub trait IdGenerator: Send + Sync {
    /// Produce the next unique id
    fn next_id(&self) -> TodoId;
}

/// Production id generator: wall-clock milliseconds with a monotonic bump.
///
/// Ids are seeded from the current Unix-epoch millisecond, matching the
/// timestamp-shaped ids of the original data, but two calls can never return
/// the same value: when the clock has not advanced past the last issued id
/// (or moved backwards), the generator issues `last + 1` instead. Uniqueness
/// holds per process.
#[derive(Debug, Default)]
pub struct WallClockIds {
    last: AtomicI64,
}

impl WallClockIds {
    /// Creates a new generator
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }
}

impl IdGenerator for WallClockIds {
    fn next_id(&self) -> TodoId {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = if now > last { now } else { last + 1 };
            match self.last.compare_exchange_weak(
                last,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return TodoId::new(candidate),
                Err(observed) => last = observed,
            }
        }
    }
}

/// Environment dependencies for the todo reducer and store
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for timestamps
    pub clock: Arc<dyn Clock>,
    /// Generator for todo ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates an environment from explicit dependencies
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Creates the production environment: system clock, wall-clock ids
    #[must_use]
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(WallClockIds::new()))
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}
