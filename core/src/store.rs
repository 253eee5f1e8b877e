//! The todo store: single source of truth for the live collection.
//!
//! All mutation, id assignment and timestamping happens here. Every
//! successful mutation is followed by a full save through the
//! [`PersistenceAdapter`]; a failed save is reported to the caller while the
//! in-memory change stays in place.

use crate::environment::{Clock, IdGenerator, RandomIdGenerator, SystemClock};
use crate::error::{CorruptDataWarning, Result, TodoError};
use crate::persistence::PersistenceAdapter;
use crate::storage::KeyValueStorage;
use crate::types::{Todo, TodoId};
use std::sync::Arc;
use tracing::{debug, error};

/// Ids drawn from the environment before falling back to random ones.
const MAX_ID_ATTEMPTS: usize = 16;

/// Environment dependencies for the store
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of identifiers for new todos
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Wall clock and random ids
    #[must_use]
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(RandomIdGenerator::new()))
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Owns the todo collection.
///
/// The collection is kept in insertion order with the newest item first.
/// That order carries no meaning for display; see [`crate::view`].
#[derive(Debug)]
pub struct TodoStore<S> {
    persistence: PersistenceAdapter<S>,
    env: TodoEnvironment,
    todos: Vec<Todo>,
    unsaved: bool,
}

impl<S: KeyValueStorage> TodoStore<S> {
    /// Creates an empty store. Call [`TodoStore::init`] to hydrate it.
    #[must_use]
    pub const fn new(persistence: PersistenceAdapter<S>, env: TodoEnvironment) -> Self {
        Self {
            persistence,
            env,
            todos: Vec::new(),
            unsaved: false,
        }
    }

    /// Replaces the in-memory collection with the stored one.
    ///
    /// Calling it again re-hydrates and discards unsaved changes. Returns the
    /// warning produced when stored data was unreadable.
    pub fn init(&mut self) -> Option<CorruptDataWarning> {
        let loaded = self.persistence.load();
        self.todos = loaded.todos;
        self.unsaved = false;
        debug!(count = self.todos.len(), "store initialized");
        loaded.warning
    }

    /// Creates a todo from `raw_text` and saves the collection.
    ///
    /// # Errors
    ///
    /// - [`TodoError::Validation`] if the trimmed text is empty; nothing changes.
    /// - [`TodoError::StorageWrite`] if saving failed. The new record stays in
    ///   memory and is available through [`TodoError::unsaved_todo`].
    pub fn add(&mut self, raw_text: &str) -> Result<Todo> {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!("rejected empty todo text");
            return Err(TodoError::Validation);
        }

        let todo = Todo::new(
            self.fresh_id(),
            text.to_owned(),
            self.env.clock.now().timestamp_millis(),
        );
        self.todos.insert(0, todo.clone());
        debug!(id = %todo.id, "todo added");

        match self.persist() {
            Ok(()) => Ok(todo),
            Err(TodoError::StorageWrite { source, .. }) => Err(TodoError::StorageWrite {
                source,
                unsaved: Some(Box::new(todo)),
            }),
            Err(other) => Err(other),
        }
    }

    /// Flips the completion flag of the todo with `id`.
    ///
    /// Unknown ids are ignored without touching storage.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::StorageWrite`] if saving failed; the flag stays flipped.
    pub fn toggle(&mut self, id: &TodoId) -> Result<()> {
        let Some(todo) = self.todos.iter_mut().find(|t| &t.id == id) else {
            debug!(%id, "toggle ignored, unknown id");
            return Ok(());
        };

        todo.toggle();
        debug!(%id, completed = todo.completed, "todo toggled");
        self.persist()
    }

    /// Deletes the todo with `id`.
    ///
    /// Unknown ids are ignored without touching storage.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::StorageWrite`] if saving failed; the todo stays deleted.
    pub fn remove(&mut self, id: &TodoId) -> Result<()> {
        let Some(index) = self.todos.iter().position(|t| &t.id == id) else {
            debug!(%id, "remove ignored, unknown id");
            return Ok(());
        };

        self.todos.remove(index);
        debug!(%id, "todo removed");
        self.persist()
    }

    /// Returns a copy of the collection in insertion order.
    #[must_use]
    pub fn get_all(&self) -> Vec<Todo> {
        self.todos.clone()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    /// Returns the number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Whether the last save attempt failed and memory is ahead of storage.
    #[must_use]
    pub const fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Writes the current collection to storage.
    ///
    /// Mutations call this themselves; it is public so a caller can retry
    /// after a failed write.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::StorageWrite`] if the write failed.
    pub fn persist(&mut self) -> Result<()> {
        match self.persistence.save(&self.todos) {
            Ok(()) => {
                self.unsaved = false;
                Ok(())
            },
            Err(source) => {
                self.unsaved = true;
                error!(error = %source, count = self.todos.len(), "failed to save todos");
                Err(source.into())
            },
        }
    }

    /// Persistence adapter backing this store.
    #[must_use]
    pub const fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    // Guards against ids already present from loaded data. A generator that
    // keeps colliding is replaced by random ids after a few attempts.
    fn fresh_id(&self) -> TodoId {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.env.ids.next_id();
            if self.get(&id).is_none() {
                return id;
            }
            debug!(%id, "generated id already in use, retrying");
        }

        error!(attempts = MAX_ID_ATTEMPTS, "id generator keeps colliding, using random ids");
        let fallback = RandomIdGenerator::new();
        loop {
            let id = fallback.next_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
