//! Voxel test fixtures
//!
//! A fixture describes one test map for a movement mechanic: where the player
//! starts, where the goal is, the terrain, the keys a player is expected to
//! press, and runner constraints. Fixtures are assembled with
//! [`FixtureBuilder`] and only leave it once every invariant holds.

mod builder;
pub mod input;
pub mod palette;
mod scenario;

pub use builder::{fixture_path, FixtureBuilder, ValidationError, ValidationReport, Violation};
pub use input::InputToken;
pub use palette::Color;
pub use scenario::{Fixture, Position, Voxel, UNNAMED};
