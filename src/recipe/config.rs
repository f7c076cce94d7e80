//! Recipe file types
//!
//! Defines the data structures for deserializing YAML fixture recipes.

use serde::Deserialize;

use crate::fixture::{Color, Position};

/// A fixture described declaratively in a YAML file
#[derive(Deserialize, Debug)]
pub struct Recipe {
    /// Fixture name; also the runner's `?test=` value
    pub name: Option<String>,
    /// Optional description of what the fixture exercises
    pub description: Option<String>,
    /// Movement mechanic under test
    pub mechanic: Option<String>,
    /// Free-form notes carried into the document
    pub notes: Option<String>,
    /// Player spawn cell (default: 0, 1, 0)
    pub player_start: Option<Position>,
    /// Goal cell, if the run should end on one
    pub goal: Option<Position>,
    /// Terrain shapes, applied in order
    #[serde(default)]
    pub terrain: Vec<TerrainStep>,
    /// Keys the player is expected to press
    #[serde(default)]
    pub expected_inputs: Vec<String>,
    /// Options passed through to the runner untouched
    #[serde(default)]
    pub constraints: serde_json::Map<String, serde_json::Value>,
}

/// One terrain shape. Omitted colors fall back to the shape's default.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TerrainStep {
    /// A single block
    Voxel {
        x: i32,
        y: i32,
        z: i32,
        color: Color,
    },
    /// A block at ground level (y = 0), green by default
    GroundTile {
        x: i32,
        z: i32,
        color: Option<Color>,
    },
    /// A raised block, orange by default
    PlatformTile {
        x: i32,
        y: i32,
        z: i32,
        color: Option<Color>,
    },
    /// Vertical pillar from `start_y` to `end_y` inclusive, gray by default
    Column {
        x: i32,
        z: i32,
        start_y: i32,
        end_y: i32,
        color: Option<Color>,
    },
    /// Filled rectangle at height `y`, green by default
    FlatPlatform {
        start_x: i32,
        end_x: i32,
        start_z: i32,
        end_z: i32,
        y: i32,
        color: Option<Color>,
    },
    /// Solid staircase ascending along +x, orange by default
    Stairs {
        start_x: i32,
        end_x: i32,
        start_y: i32,
        z: i32,
        color: Option<Color>,
    },
}
