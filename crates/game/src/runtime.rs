//! # Level Runtime
//!
//! Owns the live level, the player and the checkpoint, and advances them one
//! frame per [`LevelRuntime::tick`].
//!
//! A frame runs in this order:
//! 1. dust and tiles move by the previous frame's world shift
//! 2. the player updates
//! 3. `current_x` absorbs the previous frame's world shift
//! 4. the camera computes a new world shift and pins the player
//! 5. the player is tested against death zones, then transitions

use crate::camera::CameraController;
use crate::collision::{Collision, CollisionEngine};
use crate::particles::{DustGroup, ParticleSpawner};
use crate::player::{Player, PlayerFactory};
use crate::render::{OutlineColor, Renderer};
use crate::snapshot::Checkpoint;
use crate::Result;
use parking_lot::Mutex;
use platformer_config::{GameConfig, TileTable};
use platformer_core::{Geometry, Rect};
use platformer_levels::{LevelLoader, LevelState};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What happened during a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing triggered
    Continued,
    /// A death zone was hit and the level rolled back to its checkpoint
    Died,
    /// A transition was hit and the named level is now live
    Transitioned { target: String },
}

/// Frame-driven runtime for one live level
pub struct LevelRuntime<F: PlayerFactory> {
    geometry: Geometry,
    map_dir: PathBuf,
    show_zones: bool,
    tile_table: TileTable,
    factory: F,
    camera: CameraController,
    dust: Arc<Mutex<DustGroup>>,
    level: LevelState,
    player: Box<dyn Player>,
    checkpoint: Checkpoint,
}

impl<F: PlayerFactory> LevelRuntime<F> {
    /// Build a runtime and load its first level (the empty level for `None`)
    pub fn new(
        config: &GameConfig,
        tile_table: TileTable,
        factory: F,
        path: Option<&Path>,
    ) -> Result<Self> {
        let dust = Arc::new(Mutex::new(DustGroup::new()));
        let loader = LevelLoader::new(config.geometry, &tile_table);
        let (level, player, checkpoint) = Self::build(&loader, &factory, &dust, path)?;

        Ok(Self {
            geometry: config.geometry,
            map_dir: config.map_dir.clone(),
            show_zones: config.show_zones,
            camera: CameraController::new(&config.geometry),
            tile_table,
            factory,
            dust,
            level,
            player,
            checkpoint,
        })
    }

    /// Build a runtime from configuration alone: the tile table comes from
    /// `tiles_file` and the first level from `start_level`.
    pub fn from_config(config: &GameConfig, factory: F) -> Result<Self> {
        let tile_table = config.load_tile_table()?;
        let start = config.start_level.as_deref().map(|name| config.level_path(name));
        Self::new(config, tile_table, factory, start.as_deref())
    }

    /// Replace the live level with the one at `path` (the empty level for `None`).
    ///
    /// The new level, player and checkpoint are built completely before any of
    /// them is installed; on error the current level stays live.
    pub fn load(&mut self, path: Option<&Path>) -> Result<()> {
        let loader = LevelLoader::new(self.geometry, &self.tile_table);
        let (level, player, checkpoint) = Self::build(&loader, &self.factory, &self.dust, path)?;

        self.level = level;
        self.player = player;
        self.checkpoint = checkpoint;
        Ok(())
    }

    fn build(
        loader: &LevelLoader<'_>,
        factory: &F,
        dust: &Arc<Mutex<DustGroup>>,
        path: Option<&Path>,
    ) -> Result<(LevelState, Box<dyn Player>, Checkpoint)> {
        let level = match path {
            Some(path) => loader.load_file(path)?,
            None => {
                tracing::info!("Setting up empty level");
                LevelState::empty()
            }
        };

        let player = factory.spawn(level.player_spawn, ParticleSpawner::new(Arc::clone(dust)));
        let checkpoint = Checkpoint::capture(&level, player.rect());

        Ok((level, player, checkpoint))
    }

    /// Advance one frame
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let shift = self.level.world_shift;
        self.dust.lock().shift(shift);
        self.level.shift_tiles(shift);

        self.player.update(&self.level.tiles);

        self.level.current_x += shift;

        let mut rect = self.player.rect();
        let update = self.camera.scroll(&mut rect);
        self.player.set_rect(rect);
        self.level.world_shift = update.world_shift;
        if !update.clamped {
            self.player.reset_speed();
        }

        match CollisionEngine::check(&self.level, rect) {
            Some(Collision::Death) => {
                tracing::info!("Death zone hit in '{}', restoring checkpoint", self.level.name);
                self.reset();
                Ok(TickOutcome::Died)
            }
            Some(Collision::Transition(target)) => {
                tracing::info!("Transition from '{}' to '{}'", self.level.name, target);
                let path = self.map_dir.join(&target);
                self.load(Some(&path))?;
                Ok(TickOutcome::Transitioned { target })
            }
            None => Ok(TickOutcome::Continued),
        }
    }

    /// Roll the level back to its post-load checkpoint
    pub fn reset(&mut self) {
        self.checkpoint.restore(&mut self.level, self.player.as_mut());
    }

    /// Emit draw requests for the current frame
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        if let Some(effect) = self.dust.lock().sprite() {
            renderer.draw_particle(effect);
        }

        for tile in &self.level.tiles {
            renderer.draw_tile(tile);
        }

        renderer.draw_player(self.player.rect());

        if self.show_zones {
            for zone in &self.level.transitions {
                renderer.draw_outline(self.level.to_absolute(zone.rect), OutlineColor::Transition);
            }
            for zone in &self.level.death_zones {
                renderer.draw_outline(self.level.to_absolute(zone.rect), OutlineColor::DeathZone);
            }
        }
    }

    pub fn state(&self) -> &LevelState {
        &self.level
    }

    pub fn player_rect(&self) -> Rect {
        self.player.rect()
    }

    pub fn world_shift(&self) -> i32 {
        self.level.world_shift
    }

    pub fn current_x(&self) -> i32 {
        self.level.current_x
    }

    pub fn checkpoint(&self) -> &Checkpoint {
        &self.checkpoint
    }

    pub fn dust(&self) -> Arc<Mutex<DustGroup>> {
        Arc::clone(&self.dust)
    }
}
