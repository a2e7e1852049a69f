//! Error types for rh-core

use thiserror::Error;

/// Core error type for the migrator
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config: {0}")]
    ConfigParseError(#[from] serde_yaml::Error),

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: IO error with file path context
    #[error("[C004] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C005: Unknown meal type discriminant
    #[error("[C005] Unknown meal type value: {0}")]
    UnknownMealType(i64),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
