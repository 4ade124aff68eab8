use super::backend::StorageBackend;
use super::StorageKey;
use crate::error::{Result, SynthaxError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store has a single writer.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    entries: RefCell<HashMap<StorageKey, String>>,
    simulate_write_error: RefCell<bool>,
    failing_key: RefCell<Option<StorageKey>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Fail writes to one key only; `None` turns it off.
    pub fn set_failing_key(&self, key: Option<StorageKey>) {
        *self.failing_key.borrow_mut() = key;
    }

    /// Test helper to plant raw text under a key, bypassing serialization.
    pub fn put_raw(&self, key: StorageKey, raw: &str) {
        self.entries.borrow_mut().insert(key, raw.to_string());
    }

    pub fn contains(&self, key: StorageKey) -> bool {
        self.entries.borrow().contains_key(&key)
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(&key).cloned())
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(SynthaxError::Store("Simulated write error".to_string()));
        }
        if *self.failing_key.borrow() == Some(key) {
            return Err(SynthaxError::Store(format!("Simulated write error for '{}'", key)));
        }
        self.entries.borrow_mut().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        self.entries.borrow_mut().remove(&key);
        Ok(())
    }
}
