//! Terminal front end for the todo list.
//!
//! This crate is the composition root: it reads configuration, builds a
//! file-backed store, hands it to a [`todo_core::controller::Controller`] and
//! prints the rendered list after every command.
//!
//! # Quick Start
//!
//! ```bash
//! todo add Buy milk
//! todo add Walk dog
//! todo toggle 1a2b      # any unique id prefix works
//! todo rm 1a2b
//! todo                  # same as `todo list`
//! ```

pub mod cli;
pub mod terminal;

pub use cli::{Cli, Command, run};
