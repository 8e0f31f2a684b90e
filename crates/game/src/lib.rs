//! # Platformer Game Logic Layer
//!
//! This crate runs a loaded level frame by frame.
//!
//! ## Modules
//!
//! - `camera` - Horizontal scrolling that keeps the player in the middle band
//! - `collision` - Player tests against death zones and transitions
//! - `snapshot` - Post-load checkpoint used for death rollback
//! - `particles` - Dust effects spawned by the player
//! - `player` - Player entity seam and a kinematic stand-in
//! - `render` - Draw request seam
//! - `runtime` - Load / tick / draw entry points

pub mod error;
pub mod camera;
pub mod collision;
pub mod snapshot;
pub mod particles;
pub mod player;
pub mod render;
pub mod runtime;

// Re-export commonly used types
pub use error::{GameError, Result};
pub use camera::{CameraController, ScrollUpdate};
pub use collision::{Collision, CollisionEngine};
pub use snapshot::Checkpoint;
pub use particles::{DustGroup, ParticleEffect, ParticleKind, ParticleSpawner};
pub use player::{KinematicPlayer, KinematicPlayerFactory, Player, PlayerFactory};
pub use render::{OutlineColor, Renderer};
pub use runtime::{LevelRuntime, TickOutcome};
