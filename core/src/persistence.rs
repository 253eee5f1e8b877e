//! Persistence adapter: the whole todo collection as one JSON blob.
//!
//! The adapter is the only component that reads or writes storage. Loading is
//! infallible by contract: missing data is an empty list, unreadable data is
//! an empty list plus a [`CorruptDataWarning`]. Saving reports failures so the
//! caller knows the change was not made durable.

use crate::error::{CorruptDataWarning, StorageError};
use crate::storage::KeyValueStorage;
use crate::types::Todo;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Default storage key for the todo collection.
pub const STORAGE_KEY: &str = "todos";

/// Result of [`PersistenceAdapter::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loaded {
    /// Decoded collection, in stored order
    pub todos: Vec<Todo>,
    /// Set when stored data existed but could not be used
    pub warning: Option<CorruptDataWarning>,
}

/// Reads and writes the todo collection under a single key.
#[derive(Debug, Clone)]
pub struct PersistenceAdapter<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> PersistenceAdapter<S> {
    /// Creates an adapter that uses [`STORAGE_KEY`].
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    /// Creates an adapter that uses a custom key.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Key the collection is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the stored collection.
    ///
    /// Never fails. Records with blank text or a repeated id are dropped so
    /// the returned collection always satisfies the store's invariants.
    pub fn load(&self) -> Loaded {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored todos");
                return Loaded::default();
            },
            Err(error) => return self.corrupt(format!("read failed: {error}")),
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(error) => return self.corrupt(format!("not valid JSON: {error}")),
        };

        let todos: Vec<Todo> = match value {
            Value::Array(_) => match serde_json::from_value(value) {
                Ok(todos) => todos,
                Err(error) => return self.corrupt(format!("malformed record: {error}")),
            },
            other => return self.corrupt(format!("expected an array, found {}", json_kind(&other))),
        };

        let todos = self.sanitize(todos);
        debug!(key = %self.key, count = todos.len(), "loaded todos");
        Loaded {
            todos,
            warning: None,
        }
    }

    /// Writes the full collection in a single storage call.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value could not be encoded or the
    /// storage rejected the write.
    pub fn save(&self, todos: &[Todo]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(todos)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set_item(&self.key, &raw)?;
        debug!(key = %self.key, count = todos.len(), "saved todos");
        Ok(())
    }

    fn corrupt(&self, reason: String) -> Loaded {
        let warning = CorruptDataWarning {
            key: self.key.clone(),
            reason,
        };
        warn!(%warning, "discarding stored todos");
        Loaded {
            todos: Vec::new(),
            warning: Some(warning),
        }
    }

    fn sanitize(&self, todos: Vec<Todo>) -> Vec<Todo> {
        let mut seen = HashSet::with_capacity(todos.len());
        todos
            .into_iter()
            .filter_map(|mut todo| {
                let text = todo.text.trim();
                if text.is_empty() {
                    warn!(key = %self.key, id = %todo.id, "dropping stored todo with empty text");
                    return None;
                }
                if !seen.insert(todo.id.clone()) {
                    warn!(key = %self.key, id = %todo.id, "dropping stored todo with duplicate id");
                    return None;
                }
                if text.len() != todo.text.len() {
                    todo.text = text.to_owned();
                }
                Some(todo)
            })
            .collect()
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
