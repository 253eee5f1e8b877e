//! # Todo Core
//!
//! Store, persistence and rendering core for the composable todo list.
//!
//! The crate is split along the data flow of a single user interaction:
//!
//! - **Persistence**: the whole collection is one JSON blob under a fixed key
//!   in a synchronous [`storage::KeyValueStorage`]
//! - **Store**: [`store::TodoStore`] owns the live collection, validates input,
//!   assigns ids and timestamps, and saves after every mutation
//! - **View**: [`view::sort_for_display`] and [`view::render`] turn a snapshot
//!   into a freshly built list of nodes
//! - **Controller**: [`controller::Controller`] routes UI events to the store
//!   and re-renders
//! - **Environment**: clocks and id generators are injected via traits
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_core::controller::{Controller, UiEvent};
//! use todo_core::environment::{RandomIdGenerator, SystemClock};
//! use todo_core::persistence::PersistenceAdapter;
//! use todo_core::storage::FileStorage;
//! use todo_core::store::{TodoEnvironment, TodoStore};
//!
//! let env = TodoEnvironment::new(Arc::new(SystemClock), Arc::new(RandomIdGenerator::new()));
//! let persistence = PersistenceAdapter::new(FileStorage::new(".todo"));
//! let mut controller = Controller::new(TodoStore::new(persistence, env));
//! controller.start();
//!
//! controller.dispatch(UiEvent::Submit("Buy milk".to_string()));
//! println!("{} item(s) on screen", controller.view().len());
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod persistence;
pub mod storage;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use error::{CorruptDataWarning, Result, StorageError, TodoError};
pub use types::{Todo, TodoId};

/// Environment module - Dependency injection traits
///
/// Time and identifier generation are the only non-deterministic inputs of
/// the store. Both are abstracted behind traits and injected through
/// [`store::TodoEnvironment`].
pub mod environment {
    use crate::types::TodoId;
    use chrono::{DateTime, Utc};
    use rand::rngs::{OsRng, StdRng};
    use rand::{RngCore, SeedableRng};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - uses system clock
    /// struct SystemClock;
    /// impl Clock for SystemClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         Utc::now()
    ///     }
    /// }
    ///
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Produces identifiers for newly created todos
    pub trait IdGenerator: Send + Sync {
        /// Returns an identifier that has not been handed out before
        fn next_id(&self) -> TodoId;
    }

    /// Random identifiers in UUID v4 layout.
    ///
    /// Bytes come from the operating system's CSPRNG. If that source fails,
    /// the id is built from the current time, a per-generator sequence number
    /// and a pseudo-random suffix instead.
    #[derive(Debug, Default)]
    pub struct RandomIdGenerator {
        sequence: AtomicU64,
    }

    impl RandomIdGenerator {
        /// Creates a new generator
        #[must_use]
        pub const fn new() -> Self {
            Self {
                sequence: AtomicU64::new(0),
            }
        }

        /// Time-based id used when the OS random source is unavailable.
        pub(crate) fn fallback_id(&self, now: DateTime<Utc>) -> TodoId {
            let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
            let nanos = now.timestamp_nanos_opt().unwrap_or_default();
            let seed = nanos.unsigned_abs() ^ sequence.rotate_left(32);
            let suffix = StdRng::seed_from_u64(seed).next_u32();

            TodoId::new(format!(
                "{:x}-{sequence:x}-{suffix:08x}",
                now.timestamp_millis()
            ))
        }
    }

    impl IdGenerator for RandomIdGenerator {
        fn next_id(&self) -> TodoId {
            let mut bytes = [0u8; 16];
            match OsRng.try_fill_bytes(&mut bytes) {
                Ok(()) => TodoId::from_uuid(uuid::Builder::from_random_bytes(bytes).into_uuid()),
                Err(error) => {
                    tracing::warn!(%error, "OS random source unavailable, using time-based id");
                    self.fallback_id(Utc::now())
                },
            }
        }
    }

}
