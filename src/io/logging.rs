use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::model::config::LogConfig;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV_VAR: &str = "LOGBOOK_LOG";

/// Build the filter: $LOGBOOK_LOG wins, then `[log] level`, then "info".
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    let from_env = std::env::var(LOG_ENV_VAR).ok();
    filter_from(from_env.as_deref(), &config.level)
}

fn filter_from(env_directives: Option<&str>, level: &str) -> EnvFilter {
    env_directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Send tracing output to a log file. The terminal belongs to the TUI, so
/// nothing is ever written to stdout or stderr. Returns the file in use.
pub fn init_logging(config: &LogConfig, default_path: &Path) -> io::Result<PathBuf> {
    let path = config.file.clone().unwrap_or_else(|| default_path.to_path_buf());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    // A subscriber may already be installed (tests, repeated init)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_log_file_under_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("logs").join("lb.log");
        let config = LogConfig {
            level: "debug".into(),
            file: Some(target.clone()),
        };
        let used = init_logging(&config, &tmp.path().join("unused.log")).unwrap();
        assert_eq!(used, target);
        assert!(target.exists());
    }

    #[test]
    fn test_bad_level_falls_back() {
        assert_eq!(filter_from(None, "lb=verbose").to_string(), "info");
    }

    #[test]
    fn test_filter_precedence() {
        assert_eq!(filter_from(None, "debug").to_string(), "debug");
        assert_eq!(filter_from(Some("trace"), "debug").to_string(), "trace");
        // A bad environment value falls through to the configured level
        assert_eq!(filter_from(Some("lb=verbose"), "warn").to_string(), "warn");
    }
}
