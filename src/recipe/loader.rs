//! Recipe loading
//!
//! Recipes are replayed through [`FixtureBuilder`] so a recipe is valid
//! exactly when the equivalent chain of builder calls is.

use std::path::Path;

use crate::common::{Error, Result};
use crate::fixture::{Color, Fixture, FixtureBuilder};

use super::config::{Recipe, TerrainStep};

/// Read and parse a recipe file
pub fn load_recipe(path: &Path) -> Result<Recipe> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Recipe(format!(
            "Failed to read recipe '{}': {}",
            path.display(),
            e
        ))
    })?;

    parse_recipe(&content)
        .map_err(|e| Error::Recipe(format!("Failed to parse recipe '{}': {}", path.display(), e)))
}

/// Parse recipe YAML text
pub fn parse_recipe(content: &str) -> std::result::Result<Recipe, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Load a recipe and build it into a fixture
pub fn build_recipe(path: &Path) -> Result<Fixture> {
    let recipe = load_recipe(path)?;
    tracing::debug!(path = %path.display(), steps = recipe.terrain.len(), "loaded recipe");
    Ok(recipe.into_builder().build_fixture()?)
}

impl Recipe {
    /// Replay the recipe through a builder without validating it
    pub fn into_builder(self) -> FixtureBuilder {
        let mut builder = FixtureBuilder::new(self.name.as_deref());

        if let Some(mechanic) = self.mechanic {
            builder = builder.set_mechanic(mechanic);
        }
        if let Some(description) = self.description {
            builder = builder.set_description(description);
        }
        if let Some(notes) = self.notes {
            builder = builder.add_notes(notes);
        }
        if let Some(start) = self.player_start {
            builder = builder.set_player_start(start.x, start.y, start.z);
        }
        if let Some(goal) = self.goal {
            builder = builder.set_goal(goal.x, goal.y, goal.z);
        }

        for step in self.terrain {
            builder = step.apply(builder);
        }

        builder
            .set_expected_inputs(self.expected_inputs)
            .set_constraints(self.constraints)
    }
}

impl TerrainStep {
    /// Add this shape's blocks to `builder`
    pub fn apply(self, builder: FixtureBuilder) -> FixtureBuilder {
        let paint = |color: Option<Color>, default: &str| color.unwrap_or_else(|| default.into());

        match self {
            TerrainStep::Voxel { x, y, z, color } => builder.add_voxel(x, y, z, color),
            TerrainStep::GroundTile { x, z, color } => {
                builder.add_ground_tile_colored(x, z, paint(color, Color::GROUND))
            }
            TerrainStep::PlatformTile { x, y, z, color } => {
                builder.add_platform_tile_colored(x, y, z, paint(color, Color::PLATFORM))
            }
            TerrainStep::Column {
                x,
                z,
                start_y,
                end_y,
                color,
            } => builder.add_column_colored(x, z, start_y, end_y, paint(color, Color::COLUMN)),
            TerrainStep::FlatPlatform {
                start_x,
                end_x,
                start_z,
                end_z,
                y,
                color,
            } => builder.add_flat_platform_colored(
                start_x,
                end_x,
                start_z,
                end_z,
                y,
                paint(color, Color::GROUND),
            ),
            TerrainStep::Stairs {
                start_x,
                end_x,
                start_y,
                z,
                color,
            } => builder.add_stairs_colored(start_x, end_x, start_y, z, paint(color, Color::PLATFORM)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Position;

    const STAIRS: &str = r#"
name: testAutoClimbStairs
mechanic: auto_climb
description: Auto-climb up stairs
player_start: { x: -2, y: 1, z: 0 }
goal: { x: 2, y: 5, z: 0 }
terrain:
  - shape: stairs
    start_x: -2
    end_x: 2
    start_y: 0
    z: 0
expected_inputs: [w, w, w, w]
constraints:
  autoClimbRequired: true
"#;

    #[test]
    fn test_parse_stairs_recipe() {
        let recipe = parse_recipe(STAIRS).unwrap();
        assert_eq!(recipe.name.as_deref(), Some("testAutoClimbStairs"));
        assert_eq!(recipe.goal, Some(Position::new(2, 5, 0)));
        assert!(matches!(recipe.terrain[0], TerrainStep::Stairs { color: None, .. }));
    }

    #[test]
    fn test_recipe_builds() {
        let fixture = parse_recipe(STAIRS)
            .unwrap()
            .into_builder()
            .build_fixture()
            .unwrap();
        assert_eq!(fixture.voxels.len(), 1 + 2 + 3 + 4 + 5);
        assert!(fixture.voxels.iter().all(|v| v.color == Some(0xFFA500)));
        assert_eq!(fixture.constraints["autoClimbRequired"], serde_json::json!(true));
    }

    #[test]
    fn test_color_forms() {
        let recipe = parse_recipe(
            r#"
mechanic: m
player_start: { x: 0, y: 0, z: 0 }
terrain:
  - { shape: ground_tile, x: 0, z: 0, color: red }
  - { shape: voxel, x: 1, y: 0, z: 0, color: 2263842 }
  - { shape: column, x: 2, z: 0, start_y: 0, end_y: 1 }
"#,
        )
        .unwrap();
        let fixture = recipe.into_builder().build_fixture().unwrap();
        let colors: Vec<_> = fixture.voxels.iter().map(|v| v.color).collect();
        assert_eq!(
            colors,
            vec![Some(0xFF0000), Some(2263842), Some(0xAAAAAA), Some(0xAAAAAA)]
        );
    }

    #[test]
    fn test_missing_mechanic_fails_at_build() {
        let recipe = parse_recipe("terrain: []").unwrap();
        let err = recipe.into_builder().build_fixture().unwrap_err();
        assert_eq!(err.name, "Unnamed Test");
        assert_eq!(err.violations.len(), 3);
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        let result = parse_recipe("terrain:\n  - { shape: pyramid, x: 0 }\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_recipe(Path::new("/nonexistent/recipe.yaml")).unwrap_err();
        assert!(matches!(err, Error::Recipe(_)));
    }
}
