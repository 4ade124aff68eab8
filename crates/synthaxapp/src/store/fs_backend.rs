use super::backend::StorageBackend;
use super::StorageKey;
use crate::error::{Result, SynthaxError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_KEY_PREFIX: &str = "synthax";

/// File-per-key backend: `<root>/<prefix>_<key>.json`.
pub struct FsBackend {
    root: PathBuf,
    prefix: String,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('_');
        if !prefix.is_empty() {
            self.prefix = prefix.to_string();
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: StorageKey) -> PathBuf {
        self.root.join(format!("{}_{}.json", self.prefix, key.as_str()))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SynthaxError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(SynthaxError::Io)?;
        Ok(Some(content))
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<()> {
        self.ensure_dir()?;

        let target = self.key_path(key);
        let tmp = self
            .root
            .join(format!(".{}-{}.tmp", key.as_str(), Uuid::new_v4()));
        fs::write(&tmp, value).map_err(SynthaxError::Io)?;
        if let Err(err) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(SynthaxError::Io(err));
        }

        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path).map_err(SynthaxError::Io)?;
        }
        Ok(())
    }
}
