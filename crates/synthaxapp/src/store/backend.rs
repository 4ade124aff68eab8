use super::StorageKey;
use crate::error::Result;

/// Abstract interface for raw key-value I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while CollectionStore handles the "what" (typing, seeding, corruption reporting).
pub trait StorageBackend {
    /// Read the raw text stored under a key.
    /// Returns Ok(None) if nothing was ever written (or it was removed).
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, key: StorageKey) -> Result<Option<String>>;

    /// Replace the value stored under a key.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, key: StorageKey, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: StorageKey) -> Result<()>;
}
