//! # Player Entity
//!
//! The runtime drives the player through the [`Player`] trait and builds it
//! through a [`PlayerFactory`]. Physics, input and animation live behind
//! these traits; [`KinematicPlayer`] is a constant-velocity implementation
//! used by the headless runner and tests.

use crate::particles::ParticleSpawner;
use platformer_core::{PixelPosition, Rect, WorldPosition};
use platformer_levels::Tile;

/// Player entity driven by the runtime
pub trait Player {
    /// Current rectangle in absolute (on-screen) coordinates
    fn rect(&self) -> Rect;

    /// Replace the rectangle (camera pinning, checkpoint restore)
    fn set_rect(&mut self, rect: Rect);

    /// Advance one frame of movement against the level's tiles
    fn update(&mut self, tiles: &[Tile]);

    /// Return to normal speed (called while the camera holds still)
    fn reset_speed(&mut self);
}

/// Builds the player when a level is loaded
pub trait PlayerFactory {
    /// Create a player at `position`; `particles` spawns jump dust
    fn spawn(&self, position: WorldPosition, particles: ParticleSpawner) -> Box<dyn Player>;
}

/// Player that moves at a fixed velocity and optionally jumps periodically
#[derive(Debug, Clone)]
pub struct KinematicPlayer {
    /// Current rectangle
    rect: Rect,

    /// Pixels moved per tick at normal speed
    velocity: (i32, i32),

    /// Speed multiplier
    speed: i32,

    /// Ticks between jumps, 0 for never
    jump_every: u32,

    /// Ticks since spawn
    ticks: u32,

    /// Jump dust callback
    particles: ParticleSpawner,
}

impl KinematicPlayer {
    pub fn new(rect: Rect, velocity: (i32, i32), jump_every: u32, particles: ParticleSpawner) -> Self {
        Self {
            rect,
            velocity,
            speed: 1,
            jump_every,
            ticks: 0,
            particles,
        }
    }

    pub fn facing_right(&self) -> bool {
        self.velocity.0 >= 0
    }

    pub fn set_speed(&mut self, speed: i32) {
        self.speed = speed;
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }
}

impl Player for KinematicPlayer {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn update(&mut self, _tiles: &[Tile]) {
        self.rect.x += self.velocity.0 * self.speed;
        self.rect.y += self.velocity.1 * self.speed;
        self.ticks += 1;

        if self.jump_every > 0 && self.ticks % self.jump_every == 0 {
            let feet = PixelPosition::new(
                self.rect.center_x() as f32,
                (self.rect.y + self.rect.h) as f32,
            );
            self.particles.spawn_jump(feet, self.facing_right());
        }
    }

    fn reset_speed(&mut self) {
        self.speed = 1;
    }
}

/// Factory for [`KinematicPlayer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KinematicPlayerFactory {
    /// Player width and height in pixels
    pub size: (i32, i32),

    /// Pixels moved per tick
    pub velocity: (i32, i32),

    /// Ticks between jumps, 0 for never
    pub jump_every: u32,
}

impl Default for KinematicPlayerFactory {
    fn default() -> Self {
        Self {
            size: (16, 32),
            velocity: (0, 0),
            jump_every: 0,
        }
    }
}

impl PlayerFactory for KinematicPlayerFactory {
    fn spawn(&self, position: WorldPosition, particles: ParticleSpawner) -> Box<dyn Player> {
        tracing::debug!("Spawning player at ({}, {})", position.x, position.y);

        let rect = Rect::at(position, self.size.0, self.size.1);
        Box::new(KinematicPlayer::new(rect, self.velocity, self.jump_every, particles))
    }
}
