//! levelrun - headless level runner
//!
//! Loads the configuration and a level, then ticks the runtime with a
//! constant-velocity player, logging deaths and transitions.

use anyhow::Context;
use clap::Parser;
use platformer_config::{GameConfig, TileTable};
use platformer_core::{CoreError, Rect};
use platformer_game::{
    KinematicPlayerFactory, LevelRuntime, OutlineColor, ParticleEffect, PlayerFactory, Renderer,
    TickOutcome,
};
use platformer_levels::Tile;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "levelrun", about = "Run a platformer level headlessly")]
struct Args {
    /// Settings file
    #[arg(long, default_value = "settings.txt")]
    config: PathBuf,

    /// Level file to start with (overrides start_level)
    #[arg(long)]
    level: Option<PathBuf>,

    /// Number of frames to run
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Horizontal player speed in pixels per frame
    #[arg(long, default_value_t = 4, allow_hyphen_values = true)]
    speed: i32,

    /// Frames between jumps, 0 to never jump
    #[arg(long, default_value_t = 0)]
    jump_every: u32,
}

/// Renderer that only counts draw requests
#[derive(Debug, Default)]
struct HeadlessRenderer {
    particles: usize,
    tiles: usize,
    players: usize,
    outlines: usize,
}

impl Renderer for HeadlessRenderer {
    fn draw_particle(&mut self, effect: &ParticleEffect) {
        tracing::trace!("particle {:?} at ({}, {})", effect.kind, effect.position.x, effect.position.y);
        self.particles += 1;
    }

    fn draw_tile(&mut self, _tile: &Tile) {
        self.tiles += 1;
    }

    fn draw_player(&mut self, rect: Rect) {
        tracing::trace!("player at ({}, {})", rect.x, rect.y);
        self.players += 1;
    }

    fn draw_outline(&mut self, rect: Rect, color: OutlineColor) {
        tracing::trace!("outline {:?} {:?} at ({}, {})", color, color.rgb(), rect.x, rect.y);
        self.outlines += 1;
    }
}

/// What happened over a run
#[derive(Debug, Default)]
struct RunStats {
    frames: u32,
    deaths: u32,
    transitions: u32,
    /// Error that ended the run early
    failure: Option<CoreError>,
}

/// Build the runtime for the chosen start level
fn build_runtime(
    args: &Args,
    config: &GameConfig,
) -> platformer_core::Result<LevelRuntime<KinematicPlayerFactory>> {
    let tile_table = match config.load_tile_table() {
        Ok(table) => table,
        Err(e) => {
            warn!("Failed to load tile table {}: {}", config.tiles_file.display(), e);
            TileTable::new()
        }
    };

    let start = args
        .level
        .clone()
        .or_else(|| config.start_level.as_deref().map(|name| config.level_path(name)));

    let factory = KinematicPlayerFactory {
        velocity: (args.speed, 0),
        jump_every: args.jump_every,
        ..Default::default()
    };

    Ok(LevelRuntime::new(config, tile_table, factory, start.as_deref())?)
}

/// Tick and draw up to `ticks` frames.
///
/// The first failed tick ends the run. A transition whose target does not
/// load leaves the player inside the zone, so later frames would retry it.
fn run<F: PlayerFactory>(
    runtime: &mut LevelRuntime<F>,
    ticks: u32,
    renderer: &mut dyn Renderer,
) -> RunStats {
    let mut stats = RunStats::default();

    for frame in 0..ticks {
        stats.frames += 1;
        match runtime.tick() {
            Ok(TickOutcome::Continued) => {}
            Ok(TickOutcome::Died) => {
                stats.deaths += 1;
                info!("Frame {}: died, back at checkpoint", frame);
            }
            Ok(TickOutcome::Transitioned { target }) => {
                stats.transitions += 1;
                info!("Frame {}: entered {}", frame, target);
            }
            Err(e) => {
                error!("Frame {}: {}, stopping", frame, e);
                stats.failure = Some(e.into());
                break;
            }
        }
        runtime.draw(renderer);
    }

    stats
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("Loading configuration from {}...", args.config.display());
    let config = match GameConfig::load_from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load {}: {}", args.config.display(), e);
            warn!("Using default configuration");
            GameConfig::default()
        }
    };
    config.display();

    let mut runtime = build_runtime(&args, &config).context("setting up the start level")?;

    let mut renderer = HeadlessRenderer::default();
    let stats = run(&mut runtime, args.ticks, &mut renderer);

    info!(
        "Ran {} frames in '{}': {} deaths, {} transitions, scroll offset {}",
        stats.frames,
        runtime.state().name,
        stats.deaths,
        stats.transitions,
        runtime.current_x()
    );
    info!(
        "Draw requests: {} tiles, {} players, {} particles, {} outlines",
        renderer.tiles, renderer.players, renderer.particles, renderer.outlines
    );

    match stats.failure {
        Some(e) => Err(anyhow::Error::new(e).context("run stopped early")),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(level: Option<PathBuf>) -> Args {
        Args {
            config: PathBuf::from("settings.txt"),
            level,
            ticks: 10,
            speed: 0,
            jump_every: 0,
        }
    }

    fn config(dir: &TempDir) -> GameConfig {
        GameConfig {
            map_dir: dir.path().to_path_buf(),
            tiles_file: dir.path().join("tiles.yml"),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_empty_level_runs_every_frame() {
        let dir = TempDir::new().unwrap();
        let mut runtime = build_runtime(&args(None), &config(&dir)).unwrap();
        let mut renderer = HeadlessRenderer::default();

        let stats = run(&mut runtime, 5, &mut renderer);
        assert_eq!(stats.frames, 5);
        assert_eq!(stats.deaths, 0);
        assert!(stats.failure.is_none());
        assert_eq!(renderer.players, 5);
    }

    #[test]
    fn test_failed_transition_stops_run() {
        let dir = TempDir::new().unwrap();
        // Spawn at (20,10) inside a transition to a file that does not exist
        let mut data = vec![0x00, 0x01, 0x02, 20, 10, 0x03, 19, 12, 3, 4, 8];
        data.extend_from_slice(b"gone.lvl");
        let path = dir.path().join("a.lvl");
        std::fs::write(&path, data).unwrap();

        let mut runtime = build_runtime(&args(Some(path)), &config(&dir)).unwrap();
        let mut renderer = HeadlessRenderer::default();

        let stats = run(&mut runtime, 10, &mut renderer);
        assert_eq!(stats.frames, 1);
        assert_eq!(stats.transitions, 0);
        assert!(matches!(stats.failure, Some(CoreError::NotFound(_))));
        assert_eq!(renderer.players, 0);
        assert_eq!(runtime.state().name, "a.lvl");
    }

    #[test]
    fn test_missing_start_level_is_core_not_found() {
        let dir = TempDir::new().unwrap();
        let result = build_runtime(&args(Some(dir.path().join("nope.lvl"))), &config(&dir));
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }
}
