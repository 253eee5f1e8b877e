//! Error types for todo store and storage operations.

use crate::types::Todo;
use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, TodoError>;

/// Failures of the underlying key-value storage medium.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The store refused the write because it is full.
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// The storage medium is disabled or cannot be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the medium failed.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// The collection could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors surfaced by [`crate::store::TodoStore`] operations.
///
/// Unknown ids are not errors: toggling or removing a missing todo is a
/// silent no-op.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Submitted text was empty or whitespace only.
    #[error("todo text cannot be empty")]
    Validation,

    /// The mutation was applied in memory but could not be persisted.
    #[error("changes were not saved: {source}")]
    StorageWrite {
        /// Underlying storage failure
        #[source]
        source: StorageError,
        /// Record created by the failed `add`, if any
        unsaved: Option<Box<Todo>>,
    },
}

impl TodoError {
    /// Returns the record kept in memory by an `add` whose save failed.
    #[must_use]
    pub fn unsaved_todo(&self) -> Option<&Todo> {
        match self {
            Self::StorageWrite { unsaved, .. } => unsaved.as_deref(),
            Self::Validation => None,
        }
    }

    /// Whether only durability was lost and the session can continue as normal.
    #[must_use]
    pub const fn is_storage_write(&self) -> bool {
        matches!(self, Self::StorageWrite { .. })
    }
}

impl From<StorageError> for TodoError {
    fn from(source: StorageError) -> Self {
        Self::StorageWrite {
            source,
            unsaved: None,
        }
    }
}

/// Stored data could not be read back as a todo collection.
///
/// This is never returned as an error: the collection is reset to empty and
/// the warning is handed to the caller for logging.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("stored todos under `{key}` are unreadable: {reason}")]
pub struct CorruptDataWarning {
    /// Storage key that held the data
    pub key: String,
    /// What was wrong with it
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoId;

    #[test]
    fn storage_error_converts_without_record() {
        let error = TodoError::from(StorageError::QuotaExceeded);
        assert!(error.is_storage_write());
        assert_eq!(error.unsaved_todo(), None);
        assert_eq!(error.to_string(), "changes were not saved: storage quota exceeded");
    }

    #[test]
    fn storage_write_exposes_unsaved_record() {
        let todo = Todo::new(TodoId::new("1"), "Buy milk".to_string(), 0);
        let error = TodoError::StorageWrite {
            source: StorageError::QuotaExceeded,
            unsaved: Some(Box::new(todo.clone())),
        };
        assert_eq!(error.unsaved_todo(), Some(&todo));
    }

    #[test]
    fn validation_is_not_a_storage_failure() {
        assert!(!TodoError::Validation.is_storage_write());
        assert_eq!(TodoError::Validation.to_string(), "todo text cannot be empty");
    }
}
