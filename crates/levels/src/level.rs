//! Level structure
//!
//! Represents one loaded level: its tiles, player spawn, transition zones and
//! death zones, plus the horizontal scroll applied since it was loaded.

use crate::tiles::Tile;
use platformer_core::{Rect, WorldPosition};
use std::path::PathBuf;

/// A region that loads another level when the player enters it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionZone {
    /// Zone rectangle in local (unscrolled) world space
    pub rect: Rect,

    /// File name of the target level, relative to the map directory
    pub target: String,
}

/// A region that rolls the level back to its checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathZone {
    /// Zone rectangle in local (unscrolled) world space
    pub rect: Rect,
}

/// A single loaded level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelState {
    /// Level name (file name, or empty for the empty level)
    pub name: String,

    /// File the level was parsed from
    pub source: Option<PathBuf>,

    /// Placed tiles, in file order
    pub tiles: Vec<Tile>,

    /// Where the player is constructed
    pub player_spawn: WorldPosition,

    /// Transition zones in declaration order
    pub transitions: Vec<TransitionZone>,

    /// Death zones in declaration order
    pub death_zones: Vec<DeathZone>,

    /// Horizontal camera displacement for the current tick
    pub world_shift: i32,

    /// Accumulated scroll since load; `absolute = local + current_x` for zones
    pub current_x: i32,
}

impl LevelState {
    /// Create a new level with no content
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The empty level: no tiles or zones, player spawning at the origin
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Move every tile horizontally by `dx`
    pub fn shift_tiles(&mut self, dx: i32) {
        for tile in &mut self.tiles {
            tile.shift(dx);
        }
    }

    /// Convert an absolute (on-screen) rect to the level's local frame
    pub fn to_local(&self, rect: Rect) -> Rect {
        rect.translated_x(-self.current_x)
    }

    /// Convert a local zone rect to absolute (on-screen) coordinates
    pub fn to_absolute(&self, rect: Rect) -> Rect {
        rect.translated_x(self.current_x)
    }

    /// First death zone that `local` touches
    pub fn death_zone_hit(&self, local: &Rect) -> Option<&DeathZone> {
        self.death_zones.iter().find(|zone| local.intersects(&zone.rect))
    }

    /// First transition, in declaration order, that `local` touches
    pub fn transition_hit(&self, local: &Rect) -> Option<&TransitionZone> {
        self.transitions.iter().find(|zone| local.intersects(&zone.rect))
    }

    /// Whether the level has no tiles and no zones
    pub fn is_blank(&self) -> bool {
        self.tiles.is_empty() && self.transitions.is_empty() && self.death_zones.is_empty()
    }
}
