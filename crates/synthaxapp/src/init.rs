//! # Data Directory and Context Setup
//!
//! Everything Synthax persists lives in one data directory: one JSON file per
//! storage key plus the optional `synthax.toml`.
//!
//! ## Data Directory Resolution
//!
//! [`resolve_data_dir`] picks, in order:
//! 1. The explicit override (the CLI's `--data-dir`).
//! 2. The `SYNTHAX_DATA` environment variable (primarily for testing).
//! 3. The OS-appropriate data directory via the `directories` crate.
//!
//! ## Context
//!
//! [`initialize`] loads the configuration from the data directory, opens the
//! file-backed store with the configured key prefix, and restores the state
//! containers into a ready [`SynthaxApi`].

use crate::api::SynthaxApi;
use crate::config::SynthaxConfig;
use crate::error::{Result, SynthaxError};
use crate::state::theme::Theme;
use crate::store::fs::FileStore;
use crate::store::DataStore;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "synthax.toml";
pub const DATA_ENV: &str = "SYNTHAX_DATA";

pub struct SynthaxContext {
    pub api: SynthaxApi<FileStore>,
    pub config: SynthaxConfig,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "synthaxsphere", "synthax")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SynthaxError::Config("Could not determine data directory".to_string()))
}

/// Load `synthax.toml` from `data_dir`, falling back to defaults when it is absent
/// or unreadable.
pub fn load_config(data_dir: PathBuf) -> SynthaxConfig {
    Clapfig::builder()
        .app_name("synthax")
        .file_name(CONFIG_FILE)
        .search_paths(vec![SearchPath::Path(data_dir)])
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default()
}

/// Build the file-backed API for a data directory.
///
/// `initial_theme` is only used when no theme has been saved yet.
pub fn initialize(data_override: Option<PathBuf>, initial_theme: Theme) -> Result<SynthaxContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = load_config(data_dir.clone());
    tracing::debug!(
        data_dir = %data_dir.display(),
        simulate_latency = config.simulate_latency,
        key_prefix = config.key_prefix(),
        "initializing"
    );

    let store = FileStore::new_fs(data_dir.clone()).with_key_prefix(config.key_prefix());
    let api = SynthaxApi::with_initial_theme(store, config.simulate_latency, initial_theme)?;

    Ok(SynthaxContext {
        api,
        config,
        data_dir,
    })
}

/// Remove every stored key in a data directory without restoring the auth and
/// theme containers, so unreadable container files can still be cleared.
pub fn clear_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = load_config(data_dir.clone());
    let mut store = FileStore::new_fs(data_dir.clone()).with_key_prefix(config.key_prefix());
    store.clear_all()?;
    tracing::info!(data_dir = %data_dir.display(), "all stored data cleared");
    Ok(data_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_override_wins() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_data_dir(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(resolved, dir.path());
    }

    #[test]
    fn test_missing_config_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_config(dir.path().to_path_buf()), SynthaxConfig::default());
    }

    #[test]
    fn test_config_file_is_read() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "simulate_latency = true\nkey_prefix = \"demo\"\n",
        )
        .unwrap();

        let config = load_config(dir.path().to_path_buf());
        assert!(config.simulate_latency);
        assert_eq!(config.key_prefix(), "demo");
    }

    #[test]
    fn test_initialize_uses_key_prefix() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "key_prefix = \"demo\"\n").unwrap();

        let mut ctx = initialize(Some(dir.path().to_path_buf()), Theme::Dark).unwrap();
        ctx.api.courses().unwrap();

        assert!(dir.path().join("demo_courses.json").exists());
        assert!(!dir.path().join("synthax_courses.json").exists());
    }

    #[test]
    fn test_clear_recovers_from_unreadable_theme() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("synthax_theme.json"), "{not json").unwrap();
        assert!(matches!(
            initialize(Some(dir.path().to_path_buf()), Theme::Dark),
            Err(SynthaxError::Corrupt { .. })
        ));

        clear_data_dir(Some(dir.path().to_path_buf())).unwrap();

        let ctx = initialize(Some(dir.path().to_path_buf()), Theme::Dark).unwrap();
        assert_eq!(ctx.api.theme().theme(), Theme::Dark);
        assert!(!dir.path().join("synthax_theme.json").exists());
    }
}
