//! Synchronous key-value storage backends.
//!
//! [`KeyValueStorage`] mirrors the shape of a browser's local storage: string
//! keys, string values, and no partial writes. The store never talks to a
//! backend directly; it goes through [`crate::persistence::PersistenceAdapter`].

use crate::error::StorageError;
use std::fs::{self, File};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

/// A synchronous string key-value store.
///
/// Implementations must make `set_item` all-or-nothing from the caller's
/// point of view: after a failed write, `get_item` returns the previous value.
pub trait KeyValueStorage {
    /// Reads the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write did not happen, e.g. the medium
    /// is full or disabled.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

/// Directory-backed storage: one `<key>.json` file per key.
///
/// Writes go to a sibling temp file which is synced and then renamed over the
/// target, so readers see either the old or the new value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Creates storage rooted at `root`. The directory is created on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the value files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds the value for `key`.
    ///
    /// ASCII letters, digits, `-` and `.` are kept; every other byte is
    /// written as `_XX` hex, so distinct keys never share a file.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut file_name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.') {
                file_name.push(char::from(byte));
            } else {
                file_name.push_str(&format!("_{byte:02X}"));
            }
        }
        self.root.join(format!("{file_name}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(map_io_error(&error)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).map_err(|e| map_io_error(&e))?;

        let target = self.path_for(key);
        let tmp = target.with_extension("json.tmp");

        let write = || -> io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &target)
        };

        write().map_err(|error| {
            let _ = fs::remove_file(&tmp);
            map_io_error(&error)
        })
    }
}

fn map_io_error(error: &io::Error) -> StorageError {
    match error.kind() {
        io::ErrorKind::StorageFull => StorageError::QuotaExceeded,
        io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
            StorageError::Unavailable(error.to_string())
        },
        _ => StorageError::Io(error.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert_eq!(storage.get_item("todos").unwrap(), None);
    }

    #[test]
    fn write_then_read_returns_value() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.set_item("todos", "[]").unwrap();
        storage.set_item("todos", "[1]").unwrap();

        assert_eq!(storage.get_item("todos").unwrap().as_deref(), Some("[1]"));
        assert!(!storage.path_for("todos").with_extension("json.tmp").exists());
    }

    #[test]
    fn keys_are_escaped_into_file_names() {
        let storage = FileStorage::new("/data");
        assert_eq!(storage.path_for("todos"), PathBuf::from("/data/todos.json"));
        assert_eq!(
            storage.path_for("my app/todos"),
            PathBuf::from("/data/my_20app_2Ftodos.json")
        );
    }

    #[test]
    fn similar_keys_use_different_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_ne!(storage.path_for("my app"), storage.path_for("my_app"));

        storage.set_item("my app", "[1]").unwrap();
        assert_eq!(storage.get_item("my_app").unwrap(), None);
        assert_eq!(storage.get_item("my app").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn unwritable_root_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let storage = FileStorage::new(blocker.join("sub"));

        assert!(storage.set_item("todos", "[]").is_err());
    }
}
