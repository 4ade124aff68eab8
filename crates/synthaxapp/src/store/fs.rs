use super::collection_store::CollectionStore;
use super::fs_backend::FsBackend;
use crate::fixtures::Seed;
use std::path::PathBuf;

/// File-backed store: the production implementation.
pub type FileStore = CollectionStore<FsBackend>;

impl FileStore {
    pub fn new_fs(root: PathBuf) -> Self {
        CollectionStore::with_backend(FsBackend::new(root))
    }

    pub fn new_fs_with_seed(root: PathBuf, seed: Seed) -> Self {
        CollectionStore::with_seed(FsBackend::new(root), seed)
    }

    /// Rebuild the store with a different file-name prefix, keeping the seed.
    pub fn with_key_prefix(self, prefix: &str) -> Self {
        let CollectionStore { backend, seed } = self;
        CollectionStore::with_seed(backend.with_prefix(prefix), seed)
    }
}
