//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve the storage location and logging settings from the environment.
//!
//! # Invariants
//! - Blank environment values behave as if unset.
//! - The storage location always resolves to a path; it defaults to
//!   `notes.db` in the working directory.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Default database filename, relative to the working directory.
pub const DEFAULT_DB_FILE_NAME: &str = "notes.db";

pub const ENV_DB_PATH: &str = "QUICKNOTE_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "QUICKNOTE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "QUICKNOTE_LOG_DIR";

/// Resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the SQLite notes database.
    pub db_path: PathBuf,
    /// Log level passed to [`crate::init_logging`].
    pub log_level: String,
    /// Absolute log directory; file logging is off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(ENV_DB_PATH).map_or(defaults.db_path, PathBuf::from),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }

    /// Returns a copy pointing at another database file.
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, DEFAULT_DB_FILE_NAME, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn resolve_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        Config::resolve(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = resolve_from(&[]);
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert!(config.log_dir.is_none());
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = resolve_from(&[(ENV_DB_PATH, "   "), (ENV_LOG_DIR, "")]);
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn explicit_values_are_trimmed_and_used() {
        let config = resolve_from(&[
            (ENV_DB_PATH, " /var/lib/quicknote/notes.db "),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_LOG_DIR, "/var/log/quicknote"),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/var/lib/quicknote/notes.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/quicknote")));
    }
}
