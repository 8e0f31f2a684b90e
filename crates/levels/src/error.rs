//! Error types for the levels crate

use platformer_core::{CoreError, TileTypeId};
use std::path::PathBuf;

/// Level-specific error types
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// File I/O error
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    /// Invalid level file format
    #[error("Invalid level format: {0}")]
    InvalidFormat(String),

    /// Stream ended in the middle of a record
    #[error("Unexpected end of file: expected {expected} bytes, got {found}")]
    UnexpectedEof { expected: usize, found: usize },

    /// Numeric field too wide to fit the decoder
    #[error("Numeric field of {width} bytes overflows")]
    NumericOverflow { width: usize },

    /// Grid coordinate outside the representable world
    #[error("Coordinate out of range: {0}")]
    ValueOutOfRange(i64),

    /// Tile id missing from the tile table
    #[error("Unknown tile type: {0}")]
    UnknownTileType(TileTypeId),

    /// Level not found
    #[error("Level not found: {}", .0.display())]
    NotFound(PathBuf),
}

impl From<LevelError> for CoreError {
    fn from(err: LevelError) -> Self {
        match err {
            LevelError::FileError(e) => CoreError::Io(e),
            LevelError::NotFound(path) => CoreError::NotFound(path.display().to_string()),
            other => CoreError::Format(other.to_string()),
        }
    }
}

/// Result type for level operations
pub type Result<T> = std::result::Result<T, LevelError>;
