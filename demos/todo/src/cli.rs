//! Command-line parsing and dispatch.

use crate::terminal;
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use todo_core::config::TodoConfig;
use todo_core::controller::{Controller, Feedback, UiEvent};
use todo_core::store::{TodoEnvironment, TodoStore};
use todo_core::view::ListView;
use todo_core::TodoId;
use tracing::debug;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "A small persistent todo list")]
pub struct Cli {
    /// Directory holding the todo data (overrides TODO_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage key for the list (overrides TODO_STORAGE_KEY)
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// Print without ANSI styling
    #[arg(long, global = true)]
    pub plain: bool,

    /// What to do; defaults to `list`
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands, one per UI event
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the list
    List,
    /// Add a todo
    Add {
        /// Todo text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Mark a todo done, or not done again
    Toggle {
        /// Todo id or unique prefix
        id: String,
    },
    /// Delete a todo
    #[command(alias = "remove")]
    Rm {
        /// Todo id or unique prefix
        id: String,
    },
}

impl Cli {
    /// Applies command-line overrides on top of `base`.
    #[must_use]
    pub fn config(&self, base: TodoConfig) -> TodoConfig {
        let mut config = base;
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(key) = &self.key {
            config = config.with_storage_key(key);
        }
        config
    }
}

/// Runs one command and writes the resulting list to `out`.
///
/// # Errors
///
/// Returns an error if an id prefix is ambiguous or `out` cannot be written.
/// Storage failures are reported as a warning line, not an error.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = cli.config(TodoConfig::from_env());
    debug!(?config, "starting");

    let store = TodoStore::new(config.persistence(), TodoEnvironment::system());
    let mut controller = Controller::new(store);
    controller.start();

    let feedback = match cli.command.unwrap_or(Command::List) {
        Command::List => None,
        Command::Add { text } => controller.dispatch(UiEvent::Submit(text.join(" "))),
        Command::Toggle { id } => {
            let id = resolve_id(controller.view(), &id)?;
            controller.dispatch(UiEvent::Toggle(id))
        },
        Command::Rm { id } => {
            let id = resolve_id(controller.view(), &id)?;
            controller.dispatch(UiEvent::Delete(id))
        },
    };

    for line in terminal::render_lines(controller.view(), !cli.plain) {
        writeln!(out, "{line}")?;
    }

    match feedback {
        Some(Feedback::InvalidInput) => writeln!(out, "warning: todo text cannot be empty")?,
        Some(Feedback::NotSaved(reason)) => writeln!(out, "warning: {reason}")?,
        None => {},
    }

    Ok(())
}

/// Maps user input to a rendered id: exact match, then unique prefix.
///
/// Input matching nothing is passed through unchanged; the store ignores
/// unknown ids.
///
/// # Errors
///
/// Returns an error if the input is blank or the prefix matches more than
/// one todo.
pub fn resolve_id(view: &ListView, input: &str) -> Result<TodoId> {
    let input = input.trim();
    if input.is_empty() {
        bail!("todo id cannot be empty");
    }

    let ids: Vec<&TodoId> = view.items().map(|item| &item.id).collect();

    if let Some(exact) = ids.iter().find(|id| id.as_str() == input) {
        return Ok((*exact).clone());
    }

    let matches: Vec<&&TodoId> = ids.iter().filter(|id| id.as_str().starts_with(input)).collect();
    match matches.as_slice() {
        [only] => Ok((**only).clone()),
        [] => {
            debug!(input, "no todo matches");
            Ok(TodoId::new(input))
        },
        many => bail!("id prefix `{input}` matches {} todos", many.len()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use todo_core::types::Todo;
    use todo_core::view;

    fn view_of(ids: &[&str]) -> ListView {
        let todos: Vec<Todo> = ids
            .iter()
            .map(|id| Todo::new(TodoId::new(*id), (*id).to_string(), 0))
            .collect();
        view::render(&todos)
    }

    #[test]
    fn exact_id_wins_over_prefix() {
        let view = view_of(&["ab", "abc"]);
        assert_eq!(resolve_id(&view, "ab").unwrap(), TodoId::new("ab"));
    }

    #[test]
    fn unique_prefix_resolves() {
        let view = view_of(&["abc", "xyz"]);
        assert_eq!(resolve_id(&view, "x").unwrap(), TodoId::new("xyz"));
    }

    #[test]
    fn ambiguous_prefix_fails() {
        let view = view_of(&["abc", "abd"]);
        assert!(resolve_id(&view, "ab").is_err());
    }

    #[test]
    fn blank_input_is_rejected_even_with_one_todo() {
        let view = view_of(&["only"]);
        assert!(resolve_id(&view, "").is_err());
        assert!(resolve_id(&view, "  ").is_err());
    }

    #[test]
    fn unknown_input_passes_through() {
        let view = view_of(&[]);
        assert_eq!(resolve_id(&view, "gone").unwrap(), TodoId::new("gone"));
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["todo", "--data-dir", "/tmp/x", "--key", "work", "list"]);
        let config = cli.config(TodoConfig::default());
        assert_eq!(config, TodoConfig::new("/tmp/x").with_storage_key("work"));
    }

    #[test]
    fn add_joins_words() {
        let cli = Cli::parse_from(["todo", "add", "Buy", "milk"]);
        assert!(matches!(cli.command, Some(Command::Add { text }) if text == ["Buy", "milk"]));
    }
}
