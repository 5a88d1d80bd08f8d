//! Runtime configuration for core callers.
//!
//! # Responsibility
//! - Resolve where the slot database and log files live.
//! - Pick the log level for the current build mode.
//!
//! # Invariants
//! - `data_dir` is absolute once resolved, so `log_dir()` is accepted by
//!   `init_logging`.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Default database file name inside the data directory.
pub const DEFAULT_DB_FILE_NAME: &str = "staffdesk.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub db_file_name: String,
    pub log_level: String,
}

impl CoreConfig {
    /// Builds a config rooted at `data_dir` with default file name and level.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
            log_level: default_log_level().to_string(),
        }
    }

    /// Resolves the config from optional caller overrides.
    ///
    /// Precedence: explicit override, then the platform data directory, then
    /// `./.staffdesk` under the current directory.
    pub fn resolve(data_dir: Option<PathBuf>, log_level: Option<String>) -> Self {
        let data_dir = data_dir
            .map(absolutize)
            .or_else(platform_data_dir)
            .unwrap_or_else(|| absolutize(PathBuf::from(".staffdesk")));

        let mut config = Self::new(data_dir);
        if let Some(level) = log_level.filter(|level| !level.trim().is_empty()) {
            config.log_level = level;
        }
        config
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file_name)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

fn platform_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "staffdesk").map(|dirs| dirs.data_dir().to_path_buf())
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DEFAULT_DB_FILE_NAME};
    use std::path::PathBuf;

    #[test]
    fn paths_derive_from_data_dir() {
        let config = CoreConfig::new("/var/lib/staffdesk");
        assert_eq!(
            config.db_path(),
            PathBuf::from("/var/lib/staffdesk").join(DEFAULT_DB_FILE_NAME)
        );
        assert_eq!(config.log_dir(), PathBuf::from("/var/lib/staffdesk/logs"));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = CoreConfig::resolve(
            Some(PathBuf::from("/tmp/staffdesk-test")),
            Some("warn".to_string()),
        );
        assert_eq!(config.data_dir, PathBuf::from("/tmp/staffdesk-test"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn relative_override_becomes_absolute() {
        let config = CoreConfig::resolve(Some(PathBuf::from("rel-dir")), None);
        assert!(config.data_dir.is_absolute());
        assert!(config.data_dir.ends_with("rel-dir"));
    }

    #[test]
    fn blank_log_level_keeps_build_default() {
        let config = CoreConfig::resolve(Some(PathBuf::from("/tmp/x")), Some("  ".to_string()));
        assert_eq!(config.log_level, CoreConfig::new("/tmp/x").log_level);
    }
}
