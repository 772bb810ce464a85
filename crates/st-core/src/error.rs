//! Error types for st-core

use thiserror::Error;

/// Core error type for Strata
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Migration version string is empty
    #[error("[E004] Invalid migration version: {reason}")]
    InvalidVersion { reason: String },

    /// E005: Migration filename does not follow `{date}_{time}_{name}`
    #[error("[E005] Malformed migration filename '{file_name}': expected {{date}}_{{time}}_{{name}}")]
    MalformedMigrationName { file_name: String },

    /// E006: The migrations directory itself could not be read
    #[error("[E006] Failed to read migrations directory {path}: {source}")]
    DirectoryRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// E007: A migration file could not be written
    #[error("[E007] Failed to write migration file {path}: {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// E008: No database target was configured
    #[error("[E008] No database configured: pass --database, set STRATA_DATABASE, or add database.path to strata.yml")]
    MisconfiguredDatabase,

    /// E009: Migration name cannot be turned into a filename
    #[error("[E009] Invalid migration name '{name}': {reason}")]
    InvalidMigrationName { name: String, reason: String },

    /// IO error with file path context
    #[error("IO error at {path}: {source}")]
    IoWithPath {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}
