//! Fluent fixture builder
//!
//! A builder accumulates a draft [`Fixture`] through chained calls. Nothing is
//! checked while accumulating; [`FixtureBuilder::validate`] re-derives every
//! invariant from the current draft and [`FixtureBuilder::build`] refuses to
//! emit a document unless all of them hold.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::input::InputToken;
use super::palette::Color;
use super::scenario::{Fixture, Position, Voxel};
use crate::common::{Error, Result};

/// A single broken invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MissingMechanic,
    NoTerrain,
    UnsupportedStart(Position),
    UnsupportedGoal(Position),
    InvalidInput { index: usize, token: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingMechanic => f.write_str("Mechanic ID is required"),
            Violation::NoTerrain => f.write_str("At least one voxel is required"),
            Violation::UnsupportedStart(pos) => {
                write!(f, "Player start {pos} has no ground below")
            }
            Violation::UnsupportedGoal(pos) => write!(f, "Goal {pos} has no ground below"),
            Violation::InvalidInput { index, token } => {
                write!(f, "Invalid input at index {index}: {token:?}")
            }
        }
    }
}

/// Outcome of [`FixtureBuilder::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<Violation>,
}

impl ValidationReport {
    /// Human-readable messages, one per violation
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Raised by `build` when any invariant fails
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Fixture '{name}' failed validation: {}", summary(.violations))]
pub struct ValidationError {
    pub name: String,
    pub violations: Vec<Violation>,
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Chainable builder for one fixture
#[derive(Debug, Clone)]
#[must_use]
pub struct FixtureBuilder {
    draft: Fixture,
}

impl Default for FixtureBuilder {
    fn default() -> Self {
        Self::new(None)
    }
}

impl FixtureBuilder {
    /// Start a draft. `None` uses the placeholder name.
    pub fn new(name: Option<&str>) -> Self {
        Self {
            draft: Fixture::draft(name),
        }
    }

    /// Start a named draft
    pub fn named(name: &str) -> Self {
        Self::new(Some(name))
    }

    /// Resume from an existing document, e.g. one loaded from disk
    pub fn from_fixture(fixture: Fixture) -> Self {
        Self { draft: fixture }
    }

    /// Current draft state
    pub fn draft(&self) -> &Fixture {
        &self.draft
    }

    pub fn set_mechanic(mut self, mechanic: impl Into<String>) -> Self {
        self.draft.mechanic = mechanic.into();
        self
    }

    pub fn set_description(mut self, description: impl Into<String>) -> Self {
        self.draft.description = description.into();
        self
    }

    /// Set the notes field, replacing any earlier notes
    pub fn add_notes(mut self, notes: impl Into<String>) -> Self {
        self.draft.notes = notes.into();
        self
    }

    pub fn set_player_start(mut self, x: i32, y: i32, z: i32) -> Self {
        self.draft.player_start = Position::new(x, y, z);
        self
    }

    pub fn set_goal(mut self, x: i32, y: i32, z: i32) -> Self {
        self.draft.goal = Some(Position::new(x, y, z));
        self
    }

    /// Append one block. Palette names are resolved now; an unknown name
    /// leaves the block without a color.
    pub fn add_voxel(mut self, x: i32, y: i32, z: i32, color: impl Into<Color>) -> Self {
        self.push(x, y, z, &color.into());
        self
    }

    fn push(&mut self, x: i32, y: i32, z: i32, color: &Color) {
        let resolved = color.resolve();
        if resolved.is_none() {
            tracing::warn!(?color, x, y, z, "unknown palette color, voxel left uncolored");
        }
        self.draft.voxels.push(Voxel {
            x,
            y,
            z,
            color: resolved,
        });
    }

    pub fn add_ground_tile(self, x: i32, z: i32) -> Self {
        self.add_ground_tile_colored(x, z, Color::GROUND)
    }

    pub fn add_ground_tile_colored(self, x: i32, z: i32, color: impl Into<Color>) -> Self {
        self.add_voxel(x, 0, z, color)
    }

    pub fn add_platform_tile(self, x: i32, y: i32, z: i32) -> Self {
        self.add_platform_tile_colored(x, y, z, Color::PLATFORM)
    }

    pub fn add_platform_tile_colored(
        self,
        x: i32,
        y: i32,
        z: i32,
        color: impl Into<Color>,
    ) -> Self {
        self.add_voxel(x, y, z, color)
    }

    pub fn add_column(self, x: i32, z: i32, start_y: i32, end_y: i32) -> Self {
        self.add_column_colored(x, z, start_y, end_y, Color::COLUMN)
    }

    /// One block per `y` in `start_y..=end_y`; nothing when the range is empty.
    pub fn add_column_colored(
        mut self,
        x: i32,
        z: i32,
        start_y: i32,
        end_y: i32,
        color: impl Into<Color>,
    ) -> Self {
        let color = color.into();
        for y in start_y..=end_y {
            self.push(x, y, z, &color);
        }
        tracing::debug!(x, z, start_y, end_y, "added column");
        self
    }

    pub fn add_flat_platform(self, start_x: i32, end_x: i32, start_z: i32, end_z: i32, y: i32) -> Self {
        self.add_flat_platform_colored(start_x, end_x, start_z, end_z, y, Color::GROUND)
    }

    /// Fill the rectangle `[start_x, end_x] x [start_z, end_z]` at height `y`.
    pub fn add_flat_platform_colored(
        mut self,
        start_x: i32,
        end_x: i32,
        start_z: i32,
        end_z: i32,
        y: i32,
        color: impl Into<Color>,
    ) -> Self {
        let color = color.into();
        for x in start_x..=end_x {
            for z in start_z..=end_z {
                self.push(x, y, z, &color);
            }
        }
        tracing::debug!(start_x, end_x, start_z, end_z, y, "added flat platform");
        self
    }

    pub fn add_stairs(self, start_x: i32, end_x: i32, start_y: i32, z: i32) -> Self {
        self.add_stairs_colored(start_x, end_x, start_y, z, Color::PLATFORM)
    }

    /// Solid staircase rising by one block per step along +x. The first step
    /// is `start_y` high and every step is filled down to `y = 0`.
    pub fn add_stairs_colored(
        mut self,
        start_x: i32,
        end_x: i32,
        start_y: i32,
        z: i32,
        color: impl Into<Color>,
    ) -> Self {
        let color = color.into();
        let mut height = start_y;
        for x in start_x..=end_x {
            for y in 0..=height {
                self.push(x, y, z, &color);
            }
            height += 1;
        }
        tracing::debug!(start_x, end_x, start_y, z, "added stairs");
        self
    }

    /// Replace the expected input sequence
    pub fn set_expected_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.draft.expected_inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    /// Merge options into the constraint map; existing keys are overwritten.
    pub fn set_constraints<I, K, V>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        for (key, value) in constraints {
            self.draft.constraints.insert(key.into(), value.into());
        }
        self
    }

    /// Check every invariant against the current draft. Does not stop at
    /// the first failure.
    pub fn validate(&self) -> ValidationReport {
        let draft = &self.draft;
        let mut errors = Vec::new();

        if draft.mechanic.is_empty() {
            errors.push(Violation::MissingMechanic);
        }

        if draft.voxels.is_empty() {
            errors.push(Violation::NoTerrain);
        }

        let start = draft.player_start;
        if start.y > 0 && !draft.has_block_at(start.below()) {
            errors.push(Violation::UnsupportedStart(start));
        }

        if let Some(goal) = draft.goal {
            if goal.y > 0 && !draft.has_block_at(goal.below()) {
                errors.push(Violation::UnsupportedGoal(goal));
            }
        }

        for (index, token) in draft.expected_inputs.iter().enumerate() {
            if !InputToken::is_valid(token) {
                errors.push(Violation::InvalidInput {
                    index,
                    token: token.clone(),
                });
            }
        }

        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Validate and freeze the draft
    pub fn build_fixture(self) -> std::result::Result<Fixture, ValidationError> {
        let report = self.validate();
        if !report.valid {
            tracing::error!(fixture = %self.draft.name, "fixture validation failed");
            for violation in &report.errors {
                tracing::error!(fixture = %self.draft.name, "  - {}", violation);
            }
            return Err(ValidationError {
                name: self.draft.name,
                violations: report.errors,
            });
        }
        Ok(self.draft)
    }

    /// Validate and serialize to the canonical JSON document
    pub fn build(self) -> Result<String> {
        let fixture = self.build_fixture()?;
        Ok(fixture.to_json()?)
    }

    /// Build, then write `<dir>/<name>.json`. Nothing is written when
    /// validation fails.
    pub async fn save_to_file(self, dir: &Path) -> Result<String> {
        let fixture = self.build_fixture()?;
        let json = fixture.to_json()?;
        let path = fixture_path(dir, &fixture.name)?;

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Error::file_write(dir, e))?;
        tokio::fs::write(&path, &json)
            .await
            .map_err(|e| Error::file_write(&path, e))?;

        tracing::info!(path = %path.display(), voxels = fixture.voxels.len(), "generated fixture");
        Ok(json)
    }
}

/// File a fixture named `name` is stored under in `dir`
pub fn fixture_path(dir: &Path, name: &str) -> Result<PathBuf> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(Error::Config(format!(
            "Fixture name '{}' cannot be used as a file name",
            name
        )));
    }
    Ok(dir.join(format!("{}.json", name)))
}
