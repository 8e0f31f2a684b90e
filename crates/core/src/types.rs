//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tile type identifier (one byte in level files)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileTypeId(pub u8);

impl From<u8> for TileTypeId {
    fn from(id: u8) -> Self {
        Self(id)
    }
}

impl fmt::Display for TileTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
