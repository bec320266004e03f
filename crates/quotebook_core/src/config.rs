//! Core configuration.
//!
//! # Invariants
//! - `max_projects` is at least 1.
//! - A logging section, when present, carries an absolute directory.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const DEFAULT_MAX_PROJECTS: usize = 100;

/// Where the collection database lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseLocation {
    #[default]
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    pub dir: String,
}

fn default_level() -> String {
    default_log_level().to_string()
}

/// Settings consumed by [`crate::registry::Registry::init`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub database: DatabaseLocation,
    pub logging: Option<LoggingConfig>,
    /// Upper bound enforced when creating projects.
    pub max_projects: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            database: DatabaseLocation::Memory,
            logging: None,
            max_projects: DEFAULT_MAX_PROJECTS,
        }
    }
}

impl CoreConfig {
    /// In-memory configuration without file logging, used by tests and tools.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_database_file(path: impl Into<PathBuf>) -> Self {
        Self {
            database: DatabaseLocation::File(path.into()),
            ..Self::default()
        }
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_projects == 0 {
            return Err(ConfigError::Invalid(
                "max_projects must be greater than zero".to_string(),
            ));
        }
        if let Some(logging) = &self.logging {
            if logging.dir.trim().is_empty() {
                return Err(ConfigError::Invalid("logging.dir cannot be empty".to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, DatabaseLocation};
    use std::path::PathBuf;

    #[test]
    fn empty_document_uses_defaults() {
        let config = CoreConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.max_projects, 100);
    }

    #[test]
    fn file_database_and_logging_parse() {
        let config = CoreConfig::from_json_str(
            r#"{"database": {"file": "/tmp/q.db"}, "logging": {"dir": "/tmp/logs"}, "max_projects": 3}"#,
        )
        .unwrap();
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from("/tmp/q.db"))
        );
        assert_eq!(config.max_projects, 3);
        assert!(!config.logging.unwrap().level.is_empty());
    }

    #[test]
    fn memory_database_is_a_bare_string() {
        let config = CoreConfig::from_json_str(r#"{"database": "memory"}"#).unwrap();
        assert_eq!(config.database, DatabaseLocation::Memory);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = CoreConfig::from_json_str(r#"{"max_projects": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
