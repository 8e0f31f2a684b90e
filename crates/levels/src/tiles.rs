//! Tiles placed in a level
//!
//! A tile's position is fixed at parse time from its grid cell; afterwards it
//! only moves horizontally as the camera scrolls.

use crate::error::{LevelError, Result};
use platformer_config::TileTable;
use platformer_core::{Rect, TileTypeId, WorldPosition};

/// A single placed tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Tile type (index into the tile table)
    pub type_id: TileTypeId,

    /// Top-left corner in world pixels
    pub position: WorldPosition,

    /// Width and height in pixels
    pub size: (i32, i32),
}

impl Tile {
    /// Create a tile, looking its size up in the tile table
    pub fn new(
        position: WorldPosition,
        type_id: TileTypeId,
        table: &TileTable,
        tile_size: i32,
    ) -> Result<Self> {
        let size = table
            .size_of(type_id, tile_size)
            .ok_or(LevelError::UnknownTileType(type_id))?;

        Ok(Self { type_id, position, size })
    }

    /// World rectangle covered by this tile
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::at(self.position, self.size.0, self.size.1)
    }

    /// Move horizontally by `dx` pixels
    #[inline]
    pub fn shift(&mut self, dx: i32) {
        self.position = self.position.shifted(dx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platformer_config::TileType;

    fn table() -> TileTable {
        let mut table = TileTable::new();
        table.insert(
            TileTypeId(3),
            TileType { width: 2, height: 1, sprite: "ledge".into() },
        );
        table
    }

    #[test]
    fn test_tile_creation() {
        let tile = Tile::new(WorldPosition::new(32, 536), TileTypeId(3), &table(), 16).unwrap();
        assert_eq!(tile.size, (32, 16));
        assert_eq!(tile.rect(), Rect::new(32, 536, 32, 16));
    }

    #[test]
    fn test_unknown_tile_type() {
        let result = Tile::new(WorldPosition::new(0, 0), TileTypeId(9), &table(), 16);
        assert!(matches!(result, Err(LevelError::UnknownTileType(TileTypeId(9)))));
    }

    #[test]
    fn test_tile_shift() {
        let mut tile = Tile::new(WorldPosition::new(32, 536), TileTypeId(3), &table(), 16).unwrap();
        tile.shift(-10);
        tile.shift(4);
        assert_eq!(tile.position, WorldPosition::new(26, 536));
    }
}
