//! Collision checks between the player and level zones

use platformer_core::Rect;
use platformer_levels::LevelState;

/// Outcome of a collision check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collision {
    /// Player touched a death zone
    Death,
    /// Player entered a transition to the named level
    Transition(String),
}

/// Tests the player against a level's zones
pub struct CollisionEngine;

impl CollisionEngine {
    /// Check `player` (absolute coordinates) against `level`.
    ///
    /// Death zones take priority; transitions are tested in declaration
    /// order only when no death zone was hit.
    pub fn check(level: &LevelState, player: Rect) -> Option<Collision> {
        let local = level.to_local(player);

        if level.death_zone_hit(&local).is_some() {
            return Some(Collision::Death);
        }

        level
            .transition_hit(&local)
            .map(|zone| Collision::Transition(zone.target.clone()))
    }
}
