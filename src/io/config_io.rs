use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Error type for reading config.toml
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

const APP_DIR: &str = "pantry";

/// Get the config file path: `$PANTRY_CONFIG`, else
/// `$XDG_CONFIG_HOME/pantry/config.toml`, else `~/.config/pantry/config.toml`
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("PANTRY_CONFIG") {
        return PathBuf::from(path);
    }
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join(APP_DIR).join("config.toml")
}

/// Get the data directory: `$PANTRY_DATA_DIR`, else
/// `$XDG_DATA_HOME/pantry`, else `~/.local/share/pantry`
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PANTRY_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let data_home = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".local").join("share"));
    data_home.join(APP_DIR)
}

/// Data directory and config file for this run. Flags win over the
/// environment and XDG defaults.
pub fn resolve_locations(
    data_dir_flag: Option<&str>,
    config_flag: Option<&str>,
) -> (PathBuf, PathBuf) {
    let data = data_dir_flag.map(PathBuf::from).unwrap_or_else(data_dir);
    let config = config_flag.map(PathBuf::from).unwrap_or_else(config_path);
    (data, config)
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read config from a specific path. A missing file yields the defaults.
pub fn read_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Read config and apply environment overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let mut config = read_config_from(path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Endpoint overrides, mostly for pointing tests at a local or dead address
pub fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(url) = var("PANTRY_MEALDB_URL").filter(|v| !v.is_empty()) {
        config.mealdb.base_url = url;
    }
    if let Some(url) = var("PANTRY_AI_URL").filter(|v| !v.is_empty()) {
        config.ai.base_url = url;
    }
}
