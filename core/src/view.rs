//! Display ordering and list rendering.
//!
//! Both functions are pure. [`sort_for_display`] derives the ordered view of a
//! collection; [`render`] turns an ordered slice into a brand-new
//! [`ListView`] that replaces whatever was shown before. Nothing here holds
//! state between calls.
//!
//! # Display order
//!
//! 1. Incomplete todos before completed ones
//! 2. Within each group, newest `created_at` first
//! 3. Equal `created_at` keeps collection order. The store inserts new
//!    todos at the front, so same-millisecond todos show the most recently
//!    added one first.

use crate::types::{Todo, TodoId};
use std::cmp::Ordering;

/// Text shown when there is nothing to list.
pub const EMPTY_MESSAGE: &str = "Nothing to do yet";

/// Returns the todos in display order without modifying the input.
#[must_use]
pub fn sort_for_display(todos: &[Todo]) -> Vec<Todo> {
    let mut ordered = todos.to_vec();
    // stable sort: ties keep collection order
    ordered.sort_by(display_order);
    ordered
}

fn display_order(a: &Todo, b: &Todo) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Builds the list for an already ordered sequence of todos.
///
/// An empty sequence yields a single [`ListNode::Placeholder`].
#[must_use]
pub fn render(ordered: &[Todo]) -> ListView {
    if ordered.is_empty() {
        return ListView {
            nodes: vec![ListNode::Placeholder(Placeholder {
                message: EMPTY_MESSAGE.to_string(),
            })],
        };
    }

    ListView {
        nodes: ordered.iter().map(|todo| ListNode::Item(ItemNode::from(todo))).collect(),
    }
}

/// Sorts and renders in one step.
#[must_use]
pub fn render_collection(todos: &[Todo]) -> ListView {
    render(&sort_for_display(todos))
}

/// A fully built list, replacing the previous one wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListView {
    nodes: Vec<ListNode>,
}

impl ListView {
    /// Nodes in display order
    #[must_use]
    pub fn nodes(&self) -> &[ListNode] {
        &self.nodes
    }

    /// Number of nodes, counting the placeholder
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: an empty list renders a placeholder
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the view shows the empty-state placeholder
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self.nodes.as_slice(), [ListNode::Placeholder(_)])
    }

    /// Item nodes in display order
    pub fn items(&self) -> impl Iterator<Item = &ItemNode> {
        self.nodes.iter().filter_map(|node| match node {
            ListNode::Item(item) => Some(item),
            ListNode::Placeholder(_) => None,
        })
    }

    /// Texts of the item nodes in display order
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.items().map(|item| item.label.text.as_str()).collect()
    }
}

/// One row of the list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListNode {
    /// A todo
    Item(ItemNode),
    /// Empty-state row; carries no id so events can never target it
    Placeholder(Placeholder),
}

impl ListNode {
    /// Id routed back to the store for events on this node
    #[must_use]
    pub const fn id(&self) -> Option<&TodoId> {
        match self {
            Self::Item(item) => Some(&item.id),
            Self::Placeholder(_) => None,
        }
    }
}

/// Visual representation of a single todo
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemNode {
    /// Id of the todo this row represents
    pub id: TodoId,
    /// Completion checkbox
    pub toggle: ToggleControl,
    /// Todo text
    pub label: Label,
    /// Delete button
    pub delete: DeleteTrigger,
}

impl From<&Todo> for ItemNode {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            toggle: ToggleControl {
                checked: todo.completed,
            },
            label: Label {
                text: todo.text.clone(),
                style: if todo.completed {
                    TextStyle::Strikethrough
                } else {
                    TextStyle::Plain
                },
            },
            delete: DeleteTrigger {
                target: todo.id.clone(),
            },
        }
    }
}

/// Completion checkbox state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleControl {
    /// Reflects `completed`
    pub checked: bool,
}

/// Text of a row and how to draw it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
    /// Todo text
    pub text: String,
    /// Visual treatment
    pub style: TextStyle,
}

/// Visual treatment of a label
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    /// Open todo
    Plain,
    /// Completed todo
    Strikethrough,
}

/// Delete button for a row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteTrigger {
    /// Todo removed when triggered
    pub target: TodoId,
}

/// Empty-state row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    /// Text to show
    pub message: String,
}
