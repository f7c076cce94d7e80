//! Fixture file linting
//!
//! Catches the mistakes that show up in hand-edited maps: hex colors, colors
//! stored as strings or floats, and (for movement fixtures) broken invariants.

mod hex;

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::fixture::{Fixture, FixtureBuilder};

pub use hex::{convert_hex, find_hex_values, fix_hex_colors, hex_to_decimal, HexFix};

/// Problems found in one file
#[derive(Debug, Clone)]
pub struct LintReport {
    pub path: PathBuf,
    pub findings: Vec<String>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Lint a file on disk
pub fn lint_file(path: &Path) -> LintReport {
    let findings = match std::fs::read_to_string(path) {
        Ok(content) => lint_text(&content, &path.display().to_string()),
        Err(e) => vec![format!("Cannot read file: {}", e)],
    };
    LintReport {
        path: path.to_path_buf(),
        findings,
    }
}

/// Lint document text. `source` is only used in repair hints.
pub fn lint_text(content: &str, source: &str) -> Vec<String> {
    let mut findings = Vec::new();

    let hex_values = find_hex_values(content);
    if let Some(first) = hex_values.first() {
        let sample: Vec<&str> = hex_values.iter().take(3).copied().collect();
        findings.push(format!("Found hex notation (invalid JSON): {:?}", sample));
        if let Some(decimal) = hex_to_decimal(first) {
            findings.push(format!("  → Convert to decimal: {} = {}", first, decimal));
        }
        findings.push(format!("  → Run: voxtest fix-hex {}", source));
    }

    let data: Value = match serde_json::from_str(content) {
        Ok(data) => data,
        Err(e) => {
            findings.push(format!("JSON parse error: {}", e));
            return findings;
        }
    };

    if let Some(voxels) = data.get("voxels").and_then(Value::as_array) {
        for (i, voxel) in voxels.iter().enumerate() {
            if let Some(color) = voxel.get("color") {
                if !is_integer(color) {
                    findings.push(format!(
                        "Voxel {}: color must be integer (decimal), got {}",
                        i,
                        type_name(color)
                    ));
                }
            }
        }
    }

    let characters = data
        .get("characterGroup")
        .and_then(|group| group.get("characters"))
        .and_then(Value::as_array);
    for character in characters.into_iter().flatten() {
        let id = character
            .get("id")
            .map(|id| id.as_str().map_or_else(|| id.to_string(), str::to_string))
            .unwrap_or_default();
        if let Some(colors) = character.get("colors").and_then(Value::as_object) {
            for (key, color) in colors {
                if !is_integer(color) {
                    findings.push(format!(
                        "Character {}: {} must be integer, got {}",
                        id,
                        key,
                        type_name(color)
                    ));
                }
            }
        }
    }

    // Movement fixtures also get the builder's invariant checks. Bad colors
    // are already reported and play no part in them.
    if data.get("mechanic").is_some() {
        match serde_json::from_value::<Fixture>(without_bad_colors(data)) {
            Ok(fixture) => {
                let report = FixtureBuilder::from_fixture(fixture).validate();
                findings.extend(report.messages());
            }
            Err(e) => findings.push(format!("Fixture structure error: {}", e)),
        }
    }

    findings
}

fn without_bad_colors(mut data: Value) -> Value {
    if let Some(voxels) = data.get_mut("voxels").and_then(Value::as_array_mut) {
        for voxel in voxels.iter_mut().filter_map(Value::as_object_mut) {
            if voxel.get("color").is_some_and(|color| !is_integer(color)) {
                voxel.remove("color");
            }
        }
    }
    data
}

fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_clean_fixture() {
        let json = catalog::sample("testBasicMovement").unwrap().build().unwrap();
        assert!(lint_text(&json, "basic.json").is_empty());
    }

    #[test]
    fn test_hex_notation() {
        let findings = lint_text(r#"{"voxels": [{"color": 0x228b22}]}"#, "map.json");
        assert_eq!(findings[0], r#"Found hex notation (invalid JSON): ["0x228b22"]"#);
        assert_eq!(findings[1], "  → Convert to decimal: 0x228b22 = 2263842");
        assert_eq!(findings[2], "  → Run: voxtest fix-hex map.json");
        assert!(findings[3].starts_with("JSON parse error"));
    }

    #[test]
    fn test_non_integer_colors() {
        let text = r#"{
            "voxels": [{"color": 1}, {"color": "green"}, {"color": 1.5}, {"x": 0}],
            "characterGroup": {"characters": [{"id": "hero", "colors": {"body": "red", "eyes": 255}}]}
        }"#;
        let findings = lint_text(text, "map.json");
        assert_eq!(
            findings,
            vec![
                "Voxel 1: color must be integer (decimal), got string",
                "Voxel 2: color must be integer (decimal), got float",
                "Character hero: body must be integer, got string",
            ]
        );
    }

    #[test]
    fn test_invariants_rechecked() {
        let text = r#"{
            "name": "floating",
            "mechanic": "basic_movement",
            "playerStart": {"x": 0, "y": 5, "z": 0},
            "voxels": [{"x": 3, "y": 0, "z": 3, "color": 65280}],
            "expectedInputs": ["w+"]
        }"#;
        let findings = lint_text(text, "floating.json");
        assert_eq!(
            findings,
            vec![
                "Player start (0, 5, 0) has no ground below",
                "Invalid input at index 0: \"w+\"",
            ]
        );
    }

    #[test]
    fn test_nameless_fixture_is_rechecked() {
        let text = r#"{
            "mechanic": "m",
            "playerStart": {"x": 0, "y": 0, "z": 0},
            "voxels": [{"x": 0, "y": 0, "z": 0, "color": 65280}]
        }"#;
        assert!(lint_text(text, "nameless.json").is_empty());
    }

    #[test]
    fn test_bad_color_and_broken_invariant_reported_together() {
        let text = r#"{
            "name": "mixed",
            "mechanic": "basic_movement",
            "playerStart": {"x": 0, "y": 5, "z": 0},
            "voxels": [{"x": 0, "y": 0, "z": 0, "color": "green"}]
        }"#;
        assert_eq!(
            lint_text(text, "mixed.json"),
            vec![
                "Voxel 0: color must be integer (decimal), got string",
                "Player start (0, 5, 0) has no ground below",
            ]
        );
    }

    #[test]
    fn test_story_geometry_skips_invariants() {
        let text = r#"{"voxels": [{"x": 0, "y": 9, "z": 0, "color": 9127187}]}"#;
        assert!(lint_text(text, "bridge.json").is_empty());
    }

    #[test]
    fn test_unreadable_file() {
        let report = lint_file(Path::new("/nonexistent/map.json"));
        assert!(!report.is_clean());
        assert!(report.findings[0].starts_with("Cannot read file"));
    }
}
