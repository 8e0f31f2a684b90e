//! Level file parser
//!
//! Parses level files in either encoding into a [`LevelState`].

use crate::level::{DeathZone, LevelState, TransitionZone};
use crate::reader::LevelReader;
use crate::tiles::Tile;
use crate::{LevelError, Result};
use platformer_config::TileTable;
use platformer_core::{Geometry, GridPosition, TileTypeId};
use std::fs;
use std::path::Path;

/// Record types in a level file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// Length-prefixed bytes that are skipped
    Comment = 0,
    /// Tile id and grid cell
    Tile = 1,
    /// Player spawn grid cell
    PlayerSpawn = 2,
    /// Zone rectangle and target level name
    Transition = 3,
    /// Zone rectangle
    DeathZone = 4,
}

impl ElementType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Comment),
            1 => Some(Self::Tile),
            2 => Some(Self::PlayerSpawn),
            3 => Some(Self::Transition),
            4 => Some(Self::DeathZone),
            _ => None,
        }
    }
}

/// Level file parser
///
/// Holds the geometry and tile table needed to place parsed records.
#[derive(Debug, Clone, Copy)]
pub struct LevelLoader<'a> {
    geometry: Geometry,
    tile_table: &'a TileTable,
}

impl<'a> LevelLoader<'a> {
    pub fn new(geometry: Geometry, tile_table: &'a TileTable) -> Self {
        Self { geometry, tile_table }
    }

    /// Load a level from a file
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<LevelState> {
        let path = path.as_ref();

        let data = fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LevelError::NotFound(path.to_path_buf()),
            _ => LevelError::FileError(e),
        })?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let mut level = self.parse(data, name)?;
        level.source = Some(path.to_path_buf());

        tracing::info!(
            "Loaded level '{}': {} tiles, {} transitions, {} death zones",
            level.name,
            level.tiles.len(),
            level.transitions.len(),
            level.death_zones.len()
        );

        Ok(level)
    }

    /// Parse level data from bytes
    pub fn parse(&self, data: impl Into<bytes::Bytes>, name: String) -> Result<LevelState> {
        let mut reader = LevelReader::new(data)?;
        let mut level = LevelState::new(name);
        let mut spawns = 0usize;

        let p_size = match reader.read(1).into_bytes().first() {
            Some(&b) => b as usize,
            None => return Err(LevelError::UnexpectedEof { expected: 1, found: 0 }),
        };

        loop {
            let chunk = reader.read(1);
            if chunk.is_empty() {
                break;
            }
            let value = chunk.into_bytes()[0];

            match ElementType::from_u8(value) {
                Some(ElementType::Comment) => Self::skip_comment(&mut reader)?,
                Some(ElementType::Tile) => {
                    let tile = self.parse_tile(&mut reader, p_size)?;
                    level.tiles.push(tile);
                }
                Some(ElementType::PlayerSpawn) => {
                    let x = self.grid_value(reader.read_num(p_size)?)?;
                    let y = self.grid_value(reader.read_num(p_size)?)?;
                    spawns += 1;
                    if spawns > 1 {
                        tracing::warn!(
                            "Level '{}' declares more than one player spawn, using the last",
                            level.name
                        );
                    }
                    level.player_spawn = self.geometry.cell_to_world(GridPosition::new(x, y));
                    tracing::debug!("Player spawn at {:?}", level.player_spawn);
                }
                Some(ElementType::Transition) => {
                    let zone = self.parse_transition(&mut reader, p_size)?;
                    tracing::debug!("Transition {:?} -> {}", zone.rect, zone.target);
                    level.transitions.push(zone);
                }
                Some(ElementType::DeathZone) => {
                    let [a, b, c, d] = self.read_zone(&mut reader, p_size)?;
                    let zone = DeathZone { rect: self.geometry.zone_rect(a, b, c, d) };
                    tracing::debug!("Death zone {:?}", zone.rect);
                    level.death_zones.push(zone);
                }
                None => {
                    tracing::warn!("Unknown element type: {}", value);
                }
            }
        }

        Ok(level)
    }

    /// Skip a comment record; a wildcard length runs to the end of the line
    fn skip_comment(reader: &mut LevelReader) -> Result<()> {
        let length = reader.read_num(2)?;
        if length < 0 {
            reader.read_all_remaining();
        } else {
            reader.read(length as usize);
        }
        Ok(())
    }

    fn parse_tile(&self, reader: &mut LevelReader, p_size: usize) -> Result<Tile> {
        let type_id = match reader.read(1).into_bytes().first() {
            Some(&b) => TileTypeId(b),
            None => return Err(LevelError::UnexpectedEof { expected: 1, found: 0 }),
        };
        let x = self.grid_value(reader.read_num(p_size)?)?;
        let y = self.grid_value(reader.read_num(p_size)?)?;

        let position = self.geometry.cell_to_world(GridPosition::new(x, y));
        Tile::new(position, type_id, self.tile_table, self.geometry.tile_size)
    }

    fn parse_transition(&self, reader: &mut LevelReader, p_size: usize) -> Result<TransitionZone> {
        let [x, y, w, h] = self.read_zone(reader, p_size)?;

        let name_len = reader.read_num(1)?;
        let (chunk, truncated) = reader.read_chunk(name_len as usize);
        let name = chunk.into_bytes();
        if truncated {
            return Err(LevelError::UnexpectedEof {
                expected: name_len as usize,
                found: name.len(),
            });
        }
        if !name.is_ascii() {
            return Err(LevelError::InvalidFormat(format!(
                "Transition target is not ASCII: {:?}",
                String::from_utf8_lossy(&name)
            )));
        }
        let target = name.iter().map(|&b| b as char).collect();

        Ok(TransitionZone {
            rect: self.geometry.zone_rect(x, y, w, h),
            target,
        })
    }

    /// Read the four grid values of a zone rectangle
    fn read_zone(&self, reader: &mut LevelReader, p_size: usize) -> Result<[i32; 4]> {
        let mut values = [0i32; 4];
        for value in &mut values {
            *value = self.grid_value(reader.read_num(p_size)?)?;
        }
        Ok(values)
    }

    /// Check that a decoded grid value can be scaled into world space
    fn grid_value(&self, value: i64) -> Result<i32> {
        let limit = (i32::MAX as i64 - self.geometry.screen_height as i64)
            / self.geometry.tile_size as i64
            - 1;
        if value > limit || value < -limit {
            return Err(LevelError::ValueOutOfRange(value));
        }
        Ok(value as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platformer_config::TileType;
    use platformer_core::{Rect, WorldPosition};

    fn table() -> TileTable {
        let mut table = TileTable::new();
        table.insert(TileTypeId(0), TileType { width: 1, height: 1, sprite: "grass".into() });
        table.insert(TileTypeId(5), TileType { width: 2, height: 2, sprite: "crate".into() });
        table
    }

    fn geometry() -> Geometry {
        Geometry::new(16, 1200, 600)
    }

    /// p_size 1: tile, spawn, transition "next", death zone
    const RECORDS: &[u8] = &[
        0x01, // p_size
        0x01, 0x05, 0x02, 0x03, // tile 5 at (2,3)
        0x02, 0x01, 0x01, // spawn at (1,1)
        0x03, 0x0a, 0x04, 0x02, 0x03, 0x04, b'n', b'e', b'x', b't', // transition
        0x04, 0x00, 0x01, 0x0a, 0x01, // death zone
    ];

    fn raw_level() -> Vec<u8> {
        let mut data = vec![0x00];
        data.extend_from_slice(RECORDS);
        data
    }

    fn hex_level() -> Vec<u8> {
        let mut text = String::from("0\n");
        for (i, b) in RECORDS.iter().enumerate() {
            text.push_str(&format!("{:02X}", b));
            text.push(if i % 4 == 3 { '\n' } else { ' ' });
        }
        text.into_bytes()
    }

    fn parse(data: Vec<u8>) -> Result<LevelState> {
        let table = table();
        LevelLoader::new(geometry(), &table).parse(data, "test.lvl".to_string())
    }

    #[test]
    fn test_parse_raw_level() {
        let level = parse(raw_level()).unwrap();

        assert_eq!(level.name, "test.lvl");
        assert_eq!(level.tiles.len(), 1);
        assert_eq!(level.tiles[0].type_id, TileTypeId(5));
        assert_eq!(level.tiles[0].position, WorldPosition::new(32, 536));
        assert_eq!(level.tiles[0].size, (32, 32));

        assert_eq!(level.player_spawn, WorldPosition::new(16, 568));

        assert_eq!(level.transitions.len(), 1);
        assert_eq!(level.transitions[0].rect, Rect::new(160, 536, 32, 48));
        assert_eq!(level.transitions[0].target, "next");

        assert_eq!(level.death_zones, vec![DeathZone { rect: Rect::new(0, 584, 160, 16) }]);
    }

    #[test]
    fn test_raw_and_hex_agree() {
        let raw = parse(raw_level()).unwrap();
        let hex = parse(hex_level()).unwrap();

        assert_eq!(raw.tiles, hex.tiles);
        assert_eq!(raw.player_spawn, hex.player_spawn);
        assert_eq!(raw.transitions, hex.transitions);
        assert_eq!(raw.death_zones, hex.death_zones);
    }

    #[test]
    fn test_empty_body_is_blank_level() {
        let level = parse(vec![0x00, 0x01]).unwrap();
        assert!(level.is_blank());
        assert_eq!(level.player_spawn, WorldPosition::new(0, 0));
    }

    #[test]
    fn test_invalid_mode_byte() {
        let result = parse(vec![b'X', 0x01, 0x01, 0x00, 0x00, 0x00]);
        assert!(matches!(result, Err(LevelError::InvalidFormat(_))));
    }

    #[test]
    fn test_missing_p_size() {
        assert!(matches!(parse(vec![0x00]), Err(LevelError::UnexpectedEof { .. })));
    }

    #[test]
    fn test_comment_is_skipped() {
        let data = vec![
            0x00, 0x01, // raw, p_size 1
            0x00, 0x00, 0x03, 0xde, 0xad, 0x01, // comment of 3 bytes
            0x02, 0x02, 0x00, // spawn at (2,0)
        ];
        let level = parse(data).unwrap();
        assert_eq!(level.player_spawn, WorldPosition::new(32, 584));
        assert!(level.tiles.is_empty());
    }

    #[test]
    fn test_hex_wildcard_comment_runs_to_end_of_line() {
        let text = "0\n01\n00 ???? this text has hex digits: ab cd 01 02\n02 0200\n";
        let level = parse(text.as_bytes().to_vec()).unwrap();
        assert_eq!(level.player_spawn, WorldPosition::new(32, 584));
    }

    #[test]
    fn test_wildcard_zone_fields() {
        // p_size 2, death zone with the x field left unspecified
        let text = "0\n02\n04 ???? 0001 0002 0001\n";
        let level = parse(text.as_bytes().to_vec()).unwrap();
        assert_eq!(level.death_zones[0].rect, Rect::new(-16, 584, 32, 16));
    }

    #[test]
    fn test_unknown_element_is_skipped() {
        let data = vec![0x00, 0x01, 0x09, 0x02, 0x01, 0x00];
        let level = parse(data).unwrap();
        assert_eq!(level.player_spawn, WorldPosition::new(16, 584));
    }

    #[test]
    fn test_last_spawn_wins() {
        let data = vec![0x00, 0x01, 0x02, 0x01, 0x00, 0x02, 0x03, 0x00];
        let level = parse(data).unwrap();
        assert_eq!(level.player_spawn, WorldPosition::new(48, 584));
    }

    #[test]
    fn test_truncated_record() {
        let data = vec![0x00, 0x01, 0x01, 0x00, 0x02];
        assert!(matches!(parse(data), Err(LevelError::UnexpectedEof { .. })));
    }

    #[test]
    fn test_unknown_tile_type() {
        let data = vec![0x00, 0x01, 0x01, 0x63, 0x00, 0x00];
        assert!(matches!(parse(data), Err(LevelError::UnknownTileType(TileTypeId(0x63)))));
    }

    #[test]
    fn test_non_ascii_transition_name() {
        let data = vec![0x00, 0x01, 0x03, 0, 0, 1, 1, 0x01, 0xe9];
        assert!(matches!(parse(data), Err(LevelError::InvalidFormat(_))));
    }

    #[test]
    fn test_wide_positions() {
        let data = vec![0x00, 0x02, 0x01, 0x00, 0x01, 0x02, 0x00, 0x00];
        let level = parse(data).unwrap();
        assert_eq!(level.tiles[0].position, WorldPosition::new(258 * 16, 584));
    }

    #[test]
    fn test_out_of_range_position() {
        let data = vec![0x00, 0x04, 0x02, 0x7f, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00];
        assert!(matches!(parse(data), Err(LevelError::ValueOutOfRange(_))));
    }

    #[test]
    fn test_largest_zone_collides_without_overflow() {
        // p_size 4, death zone x = w = 134217689 cells (the largest accepted), y = h = 1
        let data = vec![
            0x00, 0x04, 0x04,
            0x07, 0xff, 0xff, 0xd9,
            0x00, 0x00, 0x00, 0x01,
            0x07, 0xff, 0xff, 0xd9,
            0x00, 0x00, 0x00, 0x01,
        ];
        let level = parse(data).unwrap();
        let zone = level.death_zones[0].rect;
        assert_eq!(zone, Rect::new(2147483024, 584, 2147483024, 16));

        assert!(level.death_zone_hit(&Rect::new(i32::MAX - 8, 590, 16, 16)).is_some());
        assert!(level.death_zone_hit(&Rect::new(0, 584, 16, 16)).is_none());

        // One cell further is rejected
        let data = vec![
            0x00, 0x04, 0x04,
            0x07, 0xff, 0xff, 0xda,
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x01,
        ];
        assert!(matches!(parse(data), Err(LevelError::ValueOutOfRange(134217690))));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("level1.lvl");
        std::fs::write(&path, raw_level()).unwrap();

        let table = table();
        let level = LevelLoader::new(geometry(), &table).load_file(&path).unwrap();
        assert_eq!(level.name, "level1.lvl");
        assert_eq!(level.source.as_deref(), Some(path.as_path()));
        assert_eq!(level.tiles.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let table = table();
        let result = LevelLoader::new(geometry(), &table).load_file(dir.path().join("nope.lvl"));
        assert!(matches!(result, Err(LevelError::NotFound(_))));
    }
}
