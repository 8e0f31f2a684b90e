//! Error types for the config crate

use platformer_core::CoreError;
use std::path::PathBuf;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    /// A setting had a value that could not be parsed
    #[error("Invalid value for '{key}': {value}")]
    InvalidValue { key: String, value: String },

    /// Tile table in YAML form failed to deserialize
    #[error("Tile table error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Tile table in JSON form failed to deserialize
    #[error("Tile table error: {0}")]
    Json(#[from] serde_json::Error),

    /// Tile table file extension is not recognised
    #[error("Unsupported tile table format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

impl From<ConfigError> for CoreError {
    fn from(err: ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
