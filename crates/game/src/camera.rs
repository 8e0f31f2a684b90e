//! # Camera Controller
//!
//! Keeps the player between the quarter and three-quarter lines of the
//! screen. When the player crosses a line, the player is pinned to it and the
//! world is shifted by the overshoot instead.

use platformer_core::{Geometry, Rect};

/// Result of one scroll step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollUpdate {
    /// Horizontal displacement to apply to the world next tick
    pub world_shift: i32,

    /// Whether the player was pinned to a scroll line
    pub clamped: bool,
}

/// Horizontal scroll controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraController {
    /// Left scroll line (screen x)
    left: i32,

    /// Right scroll line (screen x)
    right: i32,
}

impl CameraController {
    pub fn new(geometry: &Geometry) -> Self {
        Self {
            left: geometry.scroll_left(),
            right: geometry.scroll_right(),
        }
    }

    /// Compute the world shift for the player's rect and pin it if needed
    pub fn scroll(&self, player: &mut Rect) -> ScrollUpdate {
        let center_x = player.center_x();

        if center_x < self.left {
            player.set_center_x(self.left);
            ScrollUpdate { world_shift: self.left - center_x, clamped: true }
        } else if center_x > self.right {
            player.set_center_x(self.right);
            ScrollUpdate { world_shift: self.right - center_x, clamped: true }
        } else {
            ScrollUpdate { world_shift: 0, clamped: false }
        }
    }
}
