//! Draw request seam
//!
//! The runtime never rasterizes; it hands positioned objects to a
//! [`Renderer`] supplied by the host.

use crate::particles::ParticleEffect;
use platformer_core::Rect;
use platformer_levels::Tile;

/// Outline style for zone overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineColor {
    /// Transition zones (white)
    Transition,
    /// Death zones (red)
    DeathZone,
}

impl OutlineColor {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Transition => (255, 255, 255),
            Self::DeathZone => (255, 0, 0),
        }
    }
}

/// Receives draw requests in back-to-front order
pub trait Renderer {
    fn draw_particle(&mut self, effect: &ParticleEffect);

    fn draw_tile(&mut self, tile: &Tile);

    fn draw_player(&mut self, rect: Rect);

    /// One-pixel outline in absolute coordinates
    fn draw_outline(&mut self, rect: Rect, color: OutlineColor);
}
