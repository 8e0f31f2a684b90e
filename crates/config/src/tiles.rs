//! Tile type table
//!
//! Maps the one-byte tile ids used in level files to their size (in grid
//! cells) and sprite name. Loaded once by the host from `tiles.yml` or
//! `tiles.json` and passed by reference to the level parser.

use crate::error::{ConfigError, Result};
use platformer_core::TileTypeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Description of one tile type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileType {
    /// Width in grid cells
    pub width: i32,

    /// Height in grid cells
    pub height: i32,

    /// Sprite reference (`name` or `sheet:index`), resolved by the renderer
    #[serde(default)]
    pub sprite: String,
}

/// Lookup from tile id to tile type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileTable {
    types: BTreeMap<TileTypeId, TileType>,
}

impl TileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table, picking the format from the file extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let table = match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Self::from_yaml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        tracing::debug!("Loaded {} tile types from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Add or replace a tile type
    pub fn insert(&mut self, id: TileTypeId, tile_type: TileType) {
        self.types.insert(id, tile_type);
    }

    pub fn get(&self, id: TileTypeId) -> Option<&TileType> {
        self.types.get(&id)
    }

    /// Size in pixels of a tile type
    pub fn size_of(&self, id: TileTypeId, tile_size: i32) -> Option<(i32, i32)> {
        self.get(id)
            .map(|t| (t.width * tile_size, t.height * tile_size))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
