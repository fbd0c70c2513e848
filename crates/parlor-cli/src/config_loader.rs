//! Configuration file discovery and loading.
//!
//! The config lives at `~/.parlor/config.toml`; every key can be
//! overridden by a `PARLOR_*` environment variable. A missing file is
//! not an error by itself -- validation against the selected feature set
//! happens at startup and produces the fail-fast notice.

use std::path::{Path, PathBuf};

use parlor_types::config::RelayConfig;
use parlor_types::error::ConfigError;

/// Default config file location under the user's home directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".parlor").join("config.toml"))
}

/// Load configuration from the given path (if it exists) and apply
/// environment overrides.
pub fn load_from_path(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(p) if p.exists() => {
            let raw = std::fs::read_to_string(p).map_err(|e| ConfigError::Io(e.to_string()))?;
            RelayConfig::from_toml_str(&raw)?
        }
        _ => RelayConfig::default(),
    };

    config.apply_env_overrides(std::env::vars());
    Ok(config)
}

/// Load configuration from the default location.
pub fn load() -> Result<RelayConfig, ConfigError> {
    load_from_path(default_config_path().as_deref())
}
