//! Error types for the game crate

use platformer_config::ConfigError;
use platformer_core::CoreError;
use platformer_levels::LevelError;

/// Runtime errors
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A level failed to load; the previous level stays live
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    /// Configuration or tile table problem
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<GameError> for CoreError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::Level(e) => e.into(),
            GameError::Config(e) => e.into(),
        }
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, GameError>;
