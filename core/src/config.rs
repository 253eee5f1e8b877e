//! Application configuration.
//!
//! Values come from the composition root. [`TodoConfig::from_env`] reads
//! overrides from the process environment; everything else has a default.

use crate::persistence::{PersistenceAdapter, STORAGE_KEY};
use crate::storage::FileStorage;
use std::path::PathBuf;

/// Environment variable holding the data directory.
pub const DATA_DIR_ENV: &str = "TODO_DATA_DIR";

/// Environment variable holding the storage key.
pub const STORAGE_KEY_ENV: &str = "TODO_STORAGE_KEY";

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".todo";

/// Where and under which key the todo list is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Directory for [`FileStorage`].
    ///
    /// Default: `.todo`
    pub data_dir: PathBuf,

    /// Key the collection is stored under.
    ///
    /// Default: `todos`
    pub storage_key: String,
}

impl TodoConfig {
    /// Create configuration for a data directory.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            storage_key: STORAGE_KEY.to_string(),
        }
    }

    /// Set the storage key.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Defaults overridden by `TODO_DATA_DIR` and `TODO_STORAGE_KEY`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the variable names.
    ///
    /// Empty values are treated as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |name: &str| lookup(name).filter(|v: &String| !v.trim().is_empty());

        let mut config = Self::default();
        if let Some(dir) = value(DATA_DIR_ENV) {
            config = config.with_data_dir(dir);
        }
        if let Some(key) = value(STORAGE_KEY_ENV) {
            config = config.with_storage_key(key);
        }
        config
    }

    /// Persistence adapter for this configuration.
    #[must_use]
    pub fn persistence(&self) -> PersistenceAdapter<FileStorage> {
        PersistenceAdapter::with_key(FileStorage::new(&self.data_dir), &self.storage_key)
    }
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
