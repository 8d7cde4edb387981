//! In-memory settings store.
//!
//! # Why an in-memory store?
//!
//! The file store touches the real config directory, which tests must not
//! do and which a throwaway CLI session does not want.  `MemoryStore` keeps
//! every blob in a `Mutex<HashMap<..>>` so tests can seed and inspect the
//! stored bytes directly.
//!
//! # Failure switches
//!
//! Set `fail_reads`, `fail_writes`, or `missing_store` before handing the
//! store to a [`ConfigManager`](crate::ConfigManager) to exercise its
//! fallback paths without a broken disk.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::manage_config::{PersistenceStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    writes: AtomicUsize,
    /// When `true`, `get` returns [`StoreError::Unavailable`].
    pub fail_reads: AtomicBool,
    /// When `true`, `set` returns [`StoreError::Unavailable`] and stores nothing.
    pub fail_writes: AtomicBool,
    /// When `true`, `get` returns [`StoreError::NotFound`], as if the backing
    /// store had never been created.
    pub missing_store: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `key` with `value`, bypassing the failure switches.
    pub fn insert(&self, key: &str, value: impl Into<Vec<u8>>) {
        self.lock().insert(key.to_string(), value.into());
    }

    /// Returns a copy of the blob under `key`.
    pub fn blob(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().get(key).cloned()
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A poisoned map still holds consistent data: every mutation is a
        // single insert.
        self.blobs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.missing_store.load(Ordering::Relaxed) {
            return Err(StoreError::NotFound("in-memory store".to_string()));
        }
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("simulated read failure".to_string()));
        }
        Ok(self.blob(key))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("simulated write failure".to_string()));
        }
        self.lock().insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
