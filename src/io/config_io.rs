use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Environment variable that overrides the database location
pub const DB_ENV_VAR: &str = "LOGBOOK_DB";

/// Error type for reading the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the config directory, respecting XDG_CONFIG_HOME
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    base.join("logbook")
}

/// Default location of config.toml
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read the config from a specific path. A missing file yields the defaults.
pub fn read_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

/// Pick the database path: explicit flag, then $LOGBOOK_DB, then the config
/// file, then logbook.db next to the config.
pub fn resolve_db_path(flag: Option<&Path>, config: &Config) -> PathBuf {
    let env = std::env::var(DB_ENV_VAR).ok();
    resolve_db_path_with(flag, env.as_deref(), config, &config_dir())
}

fn resolve_db_path_with(
    flag: Option<&Path>,
    env: Option<&str>,
    config: &Config,
    dir: &Path,
) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Some(value) = env.map(str::trim).filter(|v| !v.is_empty()) {
        return PathBuf::from(value);
    }
    if let Some(path) = &config.database.path {
        return path.clone();
    }
    dir.join("logbook.db")
}

/// Where the log file goes when `[log] file` is not set
pub fn default_log_path() -> PathBuf {
    config_dir().join("lb.log")
}
