//! # Taskstore Testing
//!
//! Testing utilities and helpers for the taskstore architecture.
//!
//! This crate provides:
//! - Deterministic mock implementations of the environment traits
//! - The [`ReducerTest`] given/when/then harness for reducers
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use taskstore_core::environment::TodoEnvironment;
//! use taskstore_testing::mocks::{SequentialIds, test_clock};
//!
//! let env = TodoEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new()));
//! ```

use chrono::{DateTime, Utc};

mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations for testing.
pub mod mocks {
    use super::{DateTime, Utc};
    use std::sync::atomic::{AtomicI64, Ordering};
    use taskstore_core::environment::{Clock, IdGenerator};
    use taskstore_core::todo::TodoId;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use taskstore_core::environment::Clock;
    /// use taskstore_testing::mocks::FixedClock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Sequential id generator for predictable ids in tests (1, 2, 3, ...)
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        next: AtomicI64,
    }

    impl SequentialIds {
        /// Create a generator starting at 1
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicI64::new(1),
            }
        }

        /// Create a generator starting at the given value
        #[must_use]
        pub const fn starting_at(first: i64) -> Self {
            Self {
                next: AtomicI64::new(first),
            }
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> TodoId {
            TodoId::new(self.next.fetch_add(1, Ordering::SeqCst))
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SequentialIds, test_clock};
