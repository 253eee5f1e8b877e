//! Domain types for the todo list.
//!
//! A todo list is just a collection of [`Todo`] records that can be created,
//! toggled, and deleted. The serialized form of a record is the persisted
//! data format, so field names here are part of the storage contract.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique identifier for a todo item
///
/// Ids are strings so that collections written by other tools load without
/// conversion.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Wraps an existing identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id.to_string())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single todo item
///
/// Serializes to exactly four fields: `id`, `text`, `completed` and
/// `createdAt` (milliseconds since the Unix epoch). Unknown fields are
/// ignored when reading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Trimmed, non-empty text
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
    /// Creation time in milliseconds since the Unix epoch
    pub created_at: i64,
}

impl Todo {
    /// Creates a new, incomplete todo item
    #[must_use]
    pub const fn new(id: TodoId, text: String, created_at: i64) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at,
        }
    }

    /// Flips the completion flag
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_id_display() {
        let id = TodoId::new("abc-123");
        assert_eq!(format!("{id}"), "abc-123");
    }

    #[test]
    fn todo_new_is_incomplete() {
        let item = Todo::new(TodoId::new("1"), "Test todo".to_string(), 42);

        assert_eq!(item.text, "Test todo");
        assert!(!item.completed);
        assert_eq!(item.created_at, 42);
    }

    #[test]
    fn todo_toggle_flips_back_and_forth() {
        let mut item = Todo::new(TodoId::new("1"), "Test".to_string(), 0);
        item.toggle();
        assert!(item.completed);
        item.toggle();
        assert!(!item.completed);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn todo_serializes_with_storage_field_names() {
        let item = Todo::new(TodoId::new("a1"), "Buy milk".to_string(), 1_700_000_000_000);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "a1",
                "text": "Buy milk",
                "completed": false,
                "createdAt": 1_700_000_000_000_i64,
            })
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn todo_ignores_unknown_fields() {
        let raw = r#"{"id":"x","text":"Walk dog","completed":true,"createdAt":5,"color":"red"}"#;
        let item: Todo = serde_json::from_str(raw).unwrap();

        assert_eq!(item.id, TodoId::new("x"));
        assert!(item.completed);
        assert_eq!(item.created_at, 5);
    }
}
