//! Timetable configuration
//!
//! Default source and schema locations live here instead of in
//! process-wide constants. The struct is passed into the loader, the
//! validator and the pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::UnknownDayPolicy;

/// Default location of the timetable document
pub const DEFAULT_SOURCE_PATH: &str = "data/timetable.xml";

/// Default location of the XSD schema
pub const DEFAULT_SCHEMA_PATH: &str = "data/timetable.xsd";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {reason}")]
    Unreadable { path: String, reason: String },

    #[error("invalid config JSON in '{path}': {reason}")]
    InvalidJson { path: String, reason: String },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Timetable XML document (default: data/timetable.xml)
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,

    /// XSD schema used to gate the document (default: data/timetable.xsd)
    #[serde(default = "default_schema_path")]
    pub schema_path: PathBuf,

    /// What grouping does with days outside Monday..Friday (default: drop)
    #[serde(default)]
    pub unknown_days: UnknownDayPolicy,
}

fn default_source_path() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_PATH)
}

fn default_schema_path() -> PathBuf {
    PathBuf::from(DEFAULT_SCHEMA_PATH)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            schema_path: default_schema_path(),
            unknown_days: UnknownDayPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        config.validate()?;

        Ok(config)
    }

    /// Replace the source path
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    /// Replace the schema path
    pub fn with_schema_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_path = path.into();
        self
    }

    /// Replace the unknown-day policy
    pub fn with_unknown_days(mut self, policy: UnknownDayPolicy) -> Self {
        self.unknown_days = policy;
        self
    }

    /// Reject empty paths
    pub fn validate(&self) -> ConfigResult<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("source_path must not be empty".into()));
        }
        if self.schema_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("schema_path must not be empty".into()));
        }
        Ok(())
    }
}
