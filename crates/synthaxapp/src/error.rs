use crate::store::StorageKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthaxError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored value exists but can no longer be parsed.
    /// Kept apart from absence so corrupted data is never silently reseeded.
    #[error("Stored value for '{key}' is unreadable: {source}")]
    Corrupt {
        key: StorageKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, SynthaxError>;
