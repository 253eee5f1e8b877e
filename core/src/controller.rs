//! Controller: routes UI events to the store and rebuilds the view.
//!
//! The controller owns the store and the last rendered [`ListView`]. Every
//! event produces a fresh view; storage failures turn into a non-blocking
//! [`Feedback::NotSaved`] while the UI keeps showing the in-memory state.

use crate::error::TodoError;
use crate::storage::KeyValueStorage;
use crate::store::TodoStore;
use crate::types::TodoId;
use crate::view::{self, ListView};
use tracing::{info, warn};

/// User interactions the controller understands
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// Text submitted from the input field
    Submit(String),
    /// Completion checkbox clicked
    Toggle(TodoId),
    /// Delete button clicked
    Delete(TodoId),
}

/// Transient message to show next to the list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// Submitted text was blank
    InvalidInput,
    /// The change is visible but was not written to storage
    NotSaved(String),
}

/// Glue between UI events, the store and the renderer
#[derive(Debug)]
pub struct Controller<S> {
    store: TodoStore<S>,
    view: ListView,
}

impl<S: KeyValueStorage> Controller<S> {
    /// Wraps a store. Call [`Controller::start`] before dispatching.
    #[must_use]
    pub fn new(store: TodoStore<S>) -> Self {
        Self {
            store,
            view: view::render(&[]),
        }
    }

    /// Hydrates the store and renders the initial view.
    pub fn start(&mut self) -> &ListView {
        if let Some(warning) = self.store.init() {
            warn!(%warning, "starting with an empty list");
        }
        self.refresh();
        info!(count = self.store.len(), "todo list ready");
        &self.view
    }

    /// Applies one event and re-renders.
    pub fn dispatch(&mut self, event: UiEvent) -> Option<Feedback> {
        let result = match event {
            UiEvent::Submit(text) => self.store.add(&text).map(drop),
            UiEvent::Toggle(id) => self.store.toggle(&id),
            UiEvent::Delete(id) => self.store.remove(&id),
        };

        self.refresh();

        match result {
            Ok(()) => None,
            Err(TodoError::Validation) => Some(Feedback::InvalidInput),
            Err(error @ TodoError::StorageWrite { .. }) => {
                warn!(%error, "change kept in memory only");
                Some(Feedback::NotSaved(error.to_string()))
            },
        }
    }

    /// Currently displayed list
    #[must_use]
    pub const fn view(&self) -> &ListView {
        &self.view
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &TodoStore<S> {
        &self.store
    }

    fn refresh(&mut self) {
        self.view = view::render(&view::sort_for_display(&self.store.get_all()));
    }
}
