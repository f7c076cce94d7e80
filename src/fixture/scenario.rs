//! Fixture document types
//!
//! Field order on [`Fixture`] is the order of keys in the emitted JSON, which
//! keeps generated files stable under diff review.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer voxel-grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The cell a body resting here would stand on
    pub const fn below(self) -> Self {
        Self {
            x: self.x,
            y: self.y - 1,
            z: self.z,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One terrain block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voxel {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// Packed RGB; absent when an unknown palette name was used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
}

impl Voxel {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }
}

/// A finished, serializable test map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mechanic: String,
    #[serde(default = "default_player_start")]
    pub player_start: Position,
    #[serde(default)]
    pub goal: Option<Position>,
    #[serde(default)]
    pub voxels: Vec<Voxel>,
    #[serde(default)]
    pub expected_inputs: Vec<String>,
    /// Runner-interpreted options; keys serialize in sorted order
    #[serde(default)]
    pub constraints: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub notes: String,
}

/// Name given to fixtures built without one
pub const UNNAMED: &str = "Unnamed Test";

fn default_name() -> String {
    UNNAMED.to_string()
}

pub(crate) fn default_player_start() -> Position {
    Position::new(0, 1, 0)
}

impl Fixture {
    /// Empty draft with documented defaults
    pub fn draft(name: Option<&str>) -> Self {
        Self {
            name: name.unwrap_or(UNNAMED).to_string(),
            description: String::new(),
            mechanic: String::new(),
            player_start: default_player_start(),
            goal: None,
            voxels: Vec::new(),
            expected_inputs: Vec::new(),
            constraints: serde_json::Map::new(),
            notes: String::new(),
        }
    }

    /// Whether any block occupies `pos`
    pub fn has_block_at(&self, pos: Position) -> bool {
        self.voxels.iter().any(|v| v.position() == pos)
    }

    /// Canonical text form: fixed key order, two-space indentation
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a fixture document
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
