//! Integration tests for the terminal front end
//!
//! Each test runs commands against a temporary data directory, the same way
//! separate invocations of the binary would.
#![allow(clippy::unwrap_used)]

use clap::Parser;
use std::path::Path;
use todo::{Cli, run};
use todo_core::persistence::PersistenceAdapter;
use todo_core::storage::FileStorage;
use todo_testing::init_tracing;

fn todo(dir: &Path, args: &[&str]) -> Vec<String> {
    init_tracing();
    let data_dir = dir.to_str().unwrap();
    let mut argv = vec!["todo", "--plain", "--data-dir", data_dir];
    argv.extend_from_slice(args);

    let mut out = Vec::new();
    run(Cli::parse_from(argv), &mut out).unwrap();
    String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
}

fn stored_ids(dir: &Path) -> Vec<String> {
    PersistenceAdapter::new(FileStorage::new(dir))
        .load()
        .todos
        .into_iter()
        .map(|t| t.id.to_string())
        .collect()
}

#[test]
fn test_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(todo(dir.path(), &[]), vec!["  Nothing to do yet"]);
}

#[test]
fn test_full_session_across_invocations() {
    let dir = tempfile::tempdir().unwrap();

    todo(dir.path(), &["add", "Buy", "milk"]);
    let lines = todo(dir.path(), &["add", "Walk dog"]);
    assert!(lines[0].starts_with("[ ] Walk dog"));
    assert!(lines[1].starts_with("[ ] Buy milk"));

    let ids = stored_ids(dir.path());
    let dog = &ids[0];
    let lines = todo(dir.path(), &["toggle", dog.as_str()]);
    assert!(lines[0].starts_with("[ ] Buy milk"));
    assert!(lines[1].starts_with("[✓] ~Walk dog~"));

    let milk = &ids[1];
    let lines = todo(dir.path(), &["rm", &milk[..8]]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("[✓] ~Walk dog~"));
}

#[test]
fn test_blank_add_warns() {
    let dir = tempfile::tempdir().unwrap();
    let lines = todo(dir.path(), &["add", "   "]);
    assert_eq!(lines, vec!["  Nothing to do yet", "warning: todo text cannot be empty"]);
}

#[test]
fn test_blank_id_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    todo(dir.path(), &["add", "Only item"]);

    for command in ["rm", "toggle"] {
        let data_dir = dir.path().to_str().unwrap();
        let argv = vec!["todo", "--plain", "--data-dir", data_dir, command, ""];
        assert!(run(Cli::parse_from(argv), &mut Vec::new()).is_err());
    }
    assert_eq!(stored_ids(dir.path()).len(), 1);
    assert!(todo(dir.path(), &["list"])[0].starts_with("[ ] Only item"));
}

#[test]
fn test_keys_that_differ_only_in_punctuation_stay_separate() {
    let dir = tempfile::tempdir().unwrap();
    todo(dir.path(), &["--key", "my app", "add", "Ship it"]);

    assert_eq!(todo(dir.path(), &["--key", "my_app"]), vec!["  Nothing to do yet"]);
    assert_eq!(todo(dir.path(), &["--key", "my app"]).len(), 1);
}

#[test]
fn test_unknown_id_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    todo(dir.path(), &["add", "Buy milk"]);

    let lines = todo(dir.path(), &["toggle", "does-not-exist"]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("[ ] Buy milk"));
}

#[test]
fn test_corrupt_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("todos.json"), "not json").unwrap();

    assert_eq!(todo(dir.path(), &["list"]), vec!["  Nothing to do yet"]);
    let lines = todo(dir.path(), &["add", "fresh start"]);
    assert_eq!(lines.len(), 1);
    assert_eq!(stored_ids(dir.path()).len(), 1);
}

#[test]
fn test_unwritable_dir_reports_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "x").unwrap();

    let lines = todo(&blocker.join("sub"), &["add", "Buy milk"]);
    assert!(lines[0].starts_with("[ ] Buy milk"));
    assert!(lines[1].starts_with("warning: changes were not saved"));
}

#[test]
fn test_separate_keys_are_separate_lists() {
    let dir = tempfile::tempdir().unwrap();
    todo(dir.path(), &["--key", "work", "add", "Ship it"]);

    assert_eq!(todo(dir.path(), &["list"]), vec!["  Nothing to do yet"]);
    assert_eq!(todo(dir.path(), &["--key", "work"]).len(), 1);
}
