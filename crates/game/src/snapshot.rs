//! Level checkpoint
//!
//! Captured once right after a level is loaded and restored whenever the
//! player touches a death zone. The checkpoint owns its own copies of every
//! collection, so later scrolling never leaks into it.

use crate::player::Player;
use platformer_core::Rect;
use platformer_levels::{DeathZone, LevelState, Tile, TransitionZone};

/// Immutable copy of the rollback-relevant level state
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    current_x: i32,
    transitions: Vec<TransitionZone>,
    death_zones: Vec<DeathZone>,
    player_rect: Rect,
    tiles: Vec<Tile>,
}

impl Checkpoint {
    /// Snapshot `level` and the player's rectangle
    pub fn capture(level: &LevelState, player_rect: Rect) -> Self {
        Self {
            current_x: level.current_x,
            transitions: level.transitions.clone(),
            death_zones: level.death_zones.clone(),
            player_rect,
            tiles: level.tiles.clone(),
        }
    }

    /// Roll `level` and `player` back to this checkpoint.
    ///
    /// The pending world shift is dropped so the next tick starts from rest.
    pub fn restore(&self, level: &mut LevelState, player: &mut dyn Player) {
        level.current_x = self.current_x;
        level.world_shift = 0;
        level.tiles = self.tiles.clone();
        level.transitions = self.transitions.clone();
        level.death_zones = self.death_zones.clone();
        player.set_rect(self.player_rect);
    }

    pub fn current_x(&self) -> i32 {
        self.current_x
    }

    pub fn player_rect(&self) -> Rect {
        self.player_rect
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
