//! Built-in sample fixtures
//!
//! Reference maps for the core movement mechanics. They double as usage
//! examples for [`FixtureBuilder`].

use serde_json::json;

use crate::fixture::FixtureBuilder;

/// Metadata for a sample fixture
#[derive(Debug, Clone)]
pub struct SampleInfo {
    /// Fixture name, used as the runner's `?test=` value
    pub name: &'static str,
    /// Mechanic the sample exercises
    pub mechanic: &'static str,
    /// Brief description
    pub description: &'static str,
}

static SAMPLES: &[SampleInfo] = &[
    SampleInfo {
        name: "testBasicMovement",
        mechanic: "basic_movement",
        description: "Walk forward on flat terrain",
    },
    SampleInfo {
        name: "testAutoClimbStairs",
        mechanic: "auto_climb",
        description: "Auto-climb up stairs",
    },
    SampleInfo {
        name: "testDiagonalOnly",
        mechanic: "diagonal_movement",
        description: "Only allow diagonal movement",
    },
    SampleInfo {
        name: "testDescendOneBlock",
        mechanic: "descend",
        description: "Player can descend 1 block",
    },
];

/// All samples, in presentation order
pub fn all_samples() -> &'static [SampleInfo] {
    SAMPLES
}

/// Builder for the named sample, ready to build
pub fn sample(name: &str) -> Option<FixtureBuilder> {
    let info = SAMPLES.iter().find(|s| s.name == name)?;
    let base = FixtureBuilder::named(info.name)
        .set_mechanic(info.mechanic)
        .set_description(info.description);

    let builder = match info.name {
        "testBasicMovement" => base
            .set_player_start(0, 1, 0)
            .set_goal(2, 1, 0)
            .add_flat_platform(-2, 2, -2, 2, 0)
            .set_expected_inputs(["w", "w"]),

        "testAutoClimbStairs" => base
            .set_player_start(-2, 1, 0)
            .set_goal(2, 5, 0)
            .add_stairs(-2, 2, 0, 0)
            .set_expected_inputs(["w", "w", "w", "w"])
            .set_constraints([("autoClimbRequired", true)]),

        "testDiagonalOnly" => base
            .set_player_start(0, 1, 0)
            .set_goal(2, 1, 2)
            .add_flat_platform(0, 2, 0, 2, 0)
            .set_expected_inputs(["w+d", "w+d"])
            .set_constraints([
                ("allowedInputs", json!(["w+d", "w+a", "s+d", "s+a"])),
                ("blockCardinal", json!(true)),
            ]),

        "testDescendOneBlock" => base
            .set_player_start(0, 2, 0)
            .set_goal(0, 1, 0)
            .add_flat_platform(-1, 1, -1, 1, 0)
            .add_platform_tile(0, 1, 0)
            .set_expected_inputs(["Shift"])
            .add_notes("Player stands on a raised tile and drops onto the ground layer"),

        _ => return None,
    };

    Some(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_samples_has_entries() {
        assert!(!all_samples().is_empty());
    }

    #[test]
    fn test_every_sample_builds() {
        for info in all_samples() {
            let builder = sample(info.name).unwrap();
            let report = builder.validate();
            assert!(report.valid, "{}: {:?}", info.name, report.messages());
            assert!(builder.build().is_ok());
        }
    }

    #[test]
    fn test_get_sample() {
        assert!(sample("testBasicMovement").is_some());
        assert!(sample("nonexistent").is_none());
    }

    #[test]
    fn test_basic_movement_shape() {
        let fixture = sample("testBasicMovement").unwrap().build_fixture().unwrap();
        assert_eq!(fixture.voxels.len(), 25);
        assert_eq!(fixture.goal, Some(crate::fixture::Position::new(2, 1, 0)));
    }
}
