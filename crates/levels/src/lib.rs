//! # Platformer Levels System
//!
//! This crate handles level loading and the in-memory level representation.
//!
//! ## Features
//! - Level file parser for the compact record format
//! - Raw binary and hex-text encodings (with `?` wildcards and comments)
//! - Grid to world coordinate transform
//! - Transition and death zones
//!
//! ## Level Format
//!
//! - **Mode byte**: `0x00` for raw binary, `'0'` plus one marker byte for hex text
//! - **p_size**: byte width of every position field
//! - **Records**: `{type, payload}` until end of file
//!   - `0` comment, `1` tile, `2` player spawn, `3` transition, `4` death zone

pub mod error;
pub mod reader;
pub mod tiles;
pub mod level;
pub mod parser;

pub use error::{LevelError, Result};
pub use reader::{Chunk, Encoding, LevelReader, WILDCARD};
pub use tiles::Tile;
pub use level::{DeathZone, LevelState, TransitionZone};
pub use parser::{ElementType, LevelLoader};
