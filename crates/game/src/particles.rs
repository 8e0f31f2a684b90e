//! Dust particles
//!
//! The level keeps at most one dust effect alive. Players spawn them through a
//! [`ParticleSpawner`] handed to them at construction; the runtime scrolls and
//! draws them.

use parking_lot::Mutex;
use platformer_core::PixelPosition;
use std::sync::Arc;

/// Offset from the jump position to the dust anchor
const JUMP_OFFSET: (f32, f32) = (10.0, 5.0);

/// Kind of particle effect, selects the animation on the render side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Jump,
}

/// A single particle effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleEffect {
    pub position: PixelPosition,
    pub kind: ParticleKind,
}

impl ParticleEffect {
    pub fn new(position: PixelPosition, kind: ParticleKind) -> Self {
        Self { position, kind }
    }

    pub fn shift(&mut self, dx: i32) {
        self.position.x += dx as f32;
    }
}

/// Holds the single live dust effect
#[derive(Debug, Clone, Default)]
pub struct DustGroup {
    sprite: Option<ParticleEffect>,
}

impl DustGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `effect`, replacing any previous one
    pub fn add(&mut self, effect: ParticleEffect) {
        self.sprite = Some(effect);
    }

    pub fn sprite(&self) -> Option<&ParticleEffect> {
        self.sprite.as_ref()
    }

    pub fn shift(&mut self, dx: i32) {
        if let Some(effect) = &mut self.sprite {
            effect.shift(dx);
        }
    }

    pub fn clear(&mut self) {
        self.sprite = None;
    }
}

/// Jump particle callback given to player entities
#[derive(Debug, Clone)]
pub struct ParticleSpawner {
    dust: Arc<Mutex<DustGroup>>,
}

impl ParticleSpawner {
    pub fn new(dust: Arc<Mutex<DustGroup>>) -> Self {
        Self { dust }
    }

    /// Spawn jump dust behind the player's feet
    pub fn spawn_jump(&self, pos: PixelPosition, facing_right: bool) {
        let (dx, dy) = JUMP_OFFSET;
        let anchor = if facing_right {
            PixelPosition::new(pos.x - dx, pos.y - dy)
        } else {
            PixelPosition::new(pos.x + dx, pos.y - dy)
        };

        tracing::trace!("Jump dust at ({}, {})", anchor.x, anchor.y);
        self.dust.lock().add(ParticleEffect::new(anchor, ParticleKind::Jump));
    }
}
