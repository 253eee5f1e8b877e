//! # Todo Testing
//!
//! Testing utilities and helpers for the todo list core.
//!
//! This crate provides:
//! - Mock implementations of environment traits and storage
//! - A Given-When-Then harness for the store
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```
//! use todo_testing::{StoreTest, test_environment};
//!
//! StoreTest::new()
//!     .with_env(test_environment())
//!     .when(|store| {
//!         let _ = store.add("Buy milk");
//!     })
//!     .then_todos(|todos| assert_eq!(todos.len(), 1))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use todo_core::environment::{Clock, IdGenerator};
use todo_core::types::TodoId;

pub mod storage_mocks;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, TodoId, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Mutex, PoisonError};

    pub use crate::storage_mocks::MockStorage;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_testing::mocks::FixedClock;
    /// use todo_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
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

    /// Clock that advances by a fixed step after every reading
    ///
    /// Gives every created todo a distinct, increasing timestamp.
    #[derive(Debug)]
    pub struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
        step: chrono::Duration,
    }

    impl SteppingClock {
        /// Starts at `start`, moving forward by `step` per call
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: chrono::Duration) -> Self {
            Self {
                next: Mutex::new(start),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
            let now = *next;
            *next = now + self.step;
            now
        }
    }

    /// Predictable ids: `todo-1`, `todo-2`, ...
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        counter: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator starting at `todo-1`
        #[must_use]
        pub const fn new() -> Self {
            Self {
                counter: AtomicU64::new(0),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> TodoId {
            let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
            TodoId::new(format!("todo-{n}"))
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
}

/// Test helpers and utilities
pub mod helpers {
    use crate::mocks::{SequentialIdGenerator, SteppingClock, test_clock};
    use std::sync::Arc;
    use todo_core::environment::Clock;
    use todo_core::store::TodoEnvironment;

    /// Environment with sequential ids and a clock ticking 1ms per reading,
    /// starting at 2025-01-01 00:00:00 UTC
    #[must_use]
    pub fn test_environment() -> TodoEnvironment {
        let clock = SteppingClock::new(test_clock().now(), chrono::Duration::milliseconds(1));
        TodoEnvironment::new(Arc::new(clock), Arc::new(SequentialIdGenerator::new()))
    }

    /// Environment where every todo gets the same timestamp
    #[must_use]
    pub fn frozen_environment() -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIdGenerator::new()))
    }

    /// Routes `tracing` output to the test harness; safe to call repeatedly
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;
    use todo_core::types::{Todo, TodoId};

    /// Non-empty text with no surrounding whitespace
    pub fn todo_text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9][A-Za-z0-9 ]{0,30}".prop_map(|s| s.trim_end().to_string())
    }

    /// Empty or whitespace-only input
    pub fn blank_text() -> impl Strategy<Value = String> {
        "[ \t\r\n]{0,12}"
    }

    /// `(raw input, expected trimmed text)` with random surrounding whitespace
    pub fn padded_text() -> impl Strategy<Value = (String, String)> {
        ("[ \t\n]{0,4}", todo_text(), "[ \t\n]{0,4}")
            .prop_map(|(lead, text, trail)| (format!("{lead}{text}{trail}"), text))
    }

    /// Valid collections: unique ids, non-empty text, timestamps drawn from
    /// a narrow range so ties are common
    pub fn collection() -> impl Strategy<Value = Vec<Todo>> {
        prop::collection::vec((todo_text(), any::<bool>(), 0i64..16), 0..24).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (text, completed, created_at))| Todo {
                    id: TodoId::new(format!("todo-{i}")),
                    text,
                    completed,
                    created_at,
                })
                .collect()
        })
    }
}

// Re-export commonly used items
pub use helpers::{frozen_environment, init_tracing, test_environment};
pub use mocks::{FixedClock, MockStorage, SequentialIdGenerator, SteppingClock, test_clock};
pub use store_test::StoreTest;
