//! Platformer Configuration Management
//!
//! Loads runtime settings from a `settings.txt` file (`key = value` lines)
//! and the tile type table referenced by it.

pub mod error;
pub mod tiles;

pub use error::{ConfigError, Result};
pub use tiles::{TileTable, TileType};

use platformer_core::Geometry;
use std::fs;
use std::path::{Path, PathBuf};

/// Complete game configuration
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Tile and screen dimensions (from "tile_size", "screen_width", "screen_height")
    pub geometry: Geometry,

    /// Directory that transition targets are resolved against (from "map_dir")
    pub map_dir: PathBuf,

    /// Tile type table (from "tiles_file")
    pub tiles_file: PathBuf,

    /// Level loaded at startup, empty level when unset (from "start_level")
    pub start_level: Option<String>,

    /// Draw transition and death zone outlines (from "show_zones")
    pub show_zones: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            map_dir: PathBuf::from("maps"),
            tiles_file: PathBuf::from("tiles.yml"),
            start_level: None,
            show_zones: true,
        }
    }
}

impl GameConfig {
    /// Load configuration from a settings file.
    ///
    /// Relative `map_dir` and `tiles_file` entries are resolved against the
    /// directory containing the settings file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;

        if let Some(base) = path.parent() {
            config.map_dir = base.join(&config.map_dir);
            config.tiles_file = base.join(&config.tiles_file);
        }

        Ok(config)
    }

    /// Parse settings file content
    pub fn parse(content: &str) -> Result<Self> {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(eq_pos) = line.find('=') {
                let key = line[..eq_pos].trim();
                let value = line[eq_pos + 1..].trim();

                config.parse_option(key, value)?;
            }
        }

        Ok(config)
    }

    fn parse_option(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "tile_size" => self.geometry.tile_size = parse_dimension(key, value)?,
            "screen_width" => self.geometry.screen_width = parse_dimension(key, value)?,
            "screen_height" => self.geometry.screen_height = parse_dimension(key, value)?,
            "map_dir" => self.map_dir = PathBuf::from(value),
            "tiles_file" => self.tiles_file = PathBuf::from(value),
            "start_level" => {
                self.start_level = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "show_zones" => {
                self.show_zones = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.into(),
                    value: value.into(),
                })?;
            }
            _ => {
                tracing::debug!("Unknown config option: {} = {}", key, value);
            }
        }
        Ok(())
    }

    /// Path of a level file inside the map directory
    pub fn level_path(&self, name: &str) -> PathBuf {
        self.map_dir.join(name)
    }

    /// Load the tile table named by `tiles_file`
    pub fn load_tile_table(&self) -> Result<TileTable> {
        TileTable::load(&self.tiles_file)
    }

    /// Display configuration summary
    pub fn display(&self) {
        tracing::info!("Configuration:");
        tracing::info!("    Tile size: {}", self.geometry.tile_size);
        tracing::info!(
            "    Screen: {}x{}",
            self.geometry.screen_width,
            self.geometry.screen_height
        );
        tracing::info!("    Map dir: {}", self.map_dir.display());
        tracing::info!("    Tiles file: {}", self.tiles_file.display());
        match &self.start_level {
            Some(level) => tracing::info!("    Start level: {}", level),
            None => tracing::info!("    Start level: (empty level)"),
        }
        tracing::info!("    Show zones: {}", self.show_zones);
    }
}

fn parse_dimension(key: &str, value: &str) -> Result<i32> {
    match value.parse::<i32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.geometry.tile_size, 16);
        assert_eq!(config.geometry.screen_height, 600);
        assert!(config.start_level.is_none());
        assert!(config.show_zones);
    }

    #[test]
    fn test_parse_simple_config() {
        let config_text = r#"
# dimensions
tile_size = 32
screen_width = 800
start_level = level1.lvl
show_zones = false
unknown_key = whatever
"#;
        let config = GameConfig::parse(config_text).unwrap();
        assert_eq!(config.geometry.tile_size, 32);
        assert_eq!(config.geometry.screen_width, 800);
        assert_eq!(config.geometry.screen_height, 600);
        assert_eq!(config.start_level.as_deref(), Some("level1.lvl"));
        assert!(!config.show_zones);
    }

    #[test]
    fn test_invalid_dimension() {
        let result = GameConfig::parse("tile_size = zero\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        let result = GameConfig::parse("screen_height = -5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = dir.path().join("settings.txt");
        std::fs::write(&settings, "map_dir = levels\ntiles_file = t.yml\n").unwrap();

        let config = GameConfig::load_from_file(&settings).unwrap();
        assert_eq!(config.map_dir, dir.path().join("levels"));
        assert_eq!(config.tiles_file, dir.path().join("t.yml"));
        assert_eq!(config.level_path("a.lvl"), dir.path().join("levels").join("a.lvl"));
    }
}
