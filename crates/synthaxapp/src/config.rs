//! # Configuration
//!
//! Synthax configuration is managed by [`clapfig`], which handles layered loading
//! from TOML files, environment variables, and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `SYNTHAX__SIMULATE_LATENCY`, `SYNTHAX__KEY_PREFIX`.
//! 2. **Data-dir Config**: `<data dir>/synthax.toml`.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `simulate_latency` | `false` | Pause before each endpoint the way a slow backend would |
//! | `key_prefix` | `synthax` | File-name prefix of every persisted key |

use crate::store::fs_backend::DEFAULT_KEY_PREFIX;
use confique::Config;
use serde::{Deserialize, Serialize};

/// Configuration for synthax, stored in `synthax.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SynthaxConfig {
    /// Pause before each endpoint call for the endpoint's nominal delay.
    #[config(default = false)]
    pub simulate_latency: bool,

    /// Prefix for persisted file names, e.g. `synthax_courses.json`.
    #[config(default = "synthax")]
    pub key_prefix: String,
}

impl Default for SynthaxConfig {
    fn default() -> Self {
        Self {
            simulate_latency: false,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl SynthaxConfig {
    /// The key prefix, falling back to the default when blank.
    pub fn key_prefix(&self) -> &str {
        let prefix = self.key_prefix.trim();
        if prefix.is_empty() {
            DEFAULT_KEY_PREFIX
        } else {
            prefix
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SynthaxConfig::default();
        assert!(!config.simulate_latency);
        assert_eq!(config.key_prefix(), "synthax");
    }

    #[test]
    fn test_blank_prefix_falls_back() {
        let config = SynthaxConfig {
            key_prefix: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.key_prefix(), "synthax");
    }

    #[test]
    fn test_custom_prefix_is_trimmed() {
        let config = SynthaxConfig {
            key_prefix: " demo ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.key_prefix(), "demo");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SynthaxConfig {
            simulate_latency: true,
            key_prefix: "demo".to_string(),
        };
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("simulate_latency = true"));

        let parsed: SynthaxConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
