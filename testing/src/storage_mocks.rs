//! In-memory key-value storage with failure injection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use todo_core::error::StorageError;
use todo_core::storage::KeyValueStorage;

/// Mock key-value storage.
///
/// Clones share the same data, so a test can keep a handle while the store
/// owns another. Reads and writes can be made to fail to simulate a full,
/// disabled or broken medium.
#[derive(Debug, Clone, Default)]
pub struct MockStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
    read_failure: Arc<Mutex<Option<StorageError>>>,
    write_failure: Arc<Mutex<Option<StorageError>>>,
    write_attempts: Arc<AtomicUsize>,
}

impl MockStorage {
    /// Create an empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value directly, bypassing failure injection and counters.
    pub fn seed(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    /// Raw value under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Make every following write fail with `error`.
    pub fn fail_writes(&self, error: StorageError) {
        *self.write_failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Make every following read fail with `error`.
    pub fn fail_reads(&self, error: StorageError) {
        *self.read_failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Let reads and writes succeed again.
    pub fn recover(&self) {
        *self.read_failure.lock().unwrap_or_else(PoisonError::into_inner) = None;
        *self.write_failure.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Number of `set_item` calls, failed ones included.
    #[must_use]
    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }
}

impl KeyValueStorage for MockStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if let Some(error) = self
            .read_failure
            .lock()
            .map_err(|_| StorageError::Unavailable("Mutex lock failed".to_string()))?
            .clone()
        {
            return Err(error);
        }

        let items = self
            .items
            .lock()
            .map_err(|_| StorageError::Unavailable("Mutex lock failed".to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self
            .write_failure
            .lock()
            .map_err(|_| StorageError::Unavailable("Mutex lock failed".to_string()))?
            .clone()
        {
            return Err(error);
        }

        self.items
            .lock()
            .map_err(|_| StorageError::Unavailable("Mutex lock failed".to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
