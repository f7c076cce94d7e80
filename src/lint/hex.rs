//! Hex color repair
//!
//! Hand-written maps often carry colors as `0x228b22`, which JSON does not
//! allow. These helpers find such literals and rewrite them as decimals.

use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::common::{Error, Result};

static HEX_VALUE: OnceLock<Regex> = OnceLock::new();
static HEX_LITERAL: OnceLock<Regex> = OnceLock::new();

/// Hex literal used as an object value, e.g. `"color": 0xFF0000`
fn hex_value() -> &'static Regex {
    HEX_VALUE.get_or_init(|| Regex::new(r":\s*(0x[0-9a-fA-F]+)").expect("hex value pattern"))
}

/// Any hex literal
fn hex_literal() -> &'static Regex {
    HEX_LITERAL.get_or_init(|| Regex::new(r"0x([0-9a-fA-F]+)").expect("hex literal pattern"))
}

/// Hex literals appearing as object values, in document order
pub fn find_hex_values(content: &str) -> Vec<&str> {
    hex_value()
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Decimal rendering of a `0x...` literal, if it fits in 64 bits
pub fn hex_to_decimal(literal: &str) -> Option<u64> {
    let digits = literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"))
        .unwrap_or(literal);
    u64::from_str_radix(digits, 16).ok()
}

/// Replace every hex literal with its decimal value.
///
/// Returns the rewritten text and the number of literals converted.
pub fn convert_hex(content: &str) -> (String, usize) {
    let mut count = 0;
    let converted = hex_literal().replace_all(content, |caps: &Captures<'_>| {
        match u64::from_str_radix(&caps[1], 16) {
            Ok(value) => {
                count += 1;
                value.to_string()
            }
            Err(_) => caps[0].to_string(),
        }
    });
    (converted.into_owned(), count)
}

/// Outcome of [`fix_hex_colors`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexFix {
    /// Number of literals converted
    pub converted: usize,
    /// Whether the file was rewritten
    pub written: bool,
}

/// Convert hex literals in a JSON file to decimal.
///
/// The converted text must parse as JSON before anything is written. Only the
/// literals change, so key order and layout are kept. Files without hex
/// literals are left untouched.
pub fn fix_hex_colors(path: &Path, dry_run: bool) -> Result<HexFix> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;

    let (converted, count) = convert_hex(&content);
    if count == 0 {
        return Ok(HexFix {
            converted: 0,
            written: false,
        });
    }

    serde_json::from_str::<serde_json::Value>(&converted).map_err(|e| {
        Error::Config(format!(
            "'{}' is still invalid JSON after conversion: {}",
            path.display(),
            e
        ))
    })?;

    if dry_run {
        tracing::info!(path = %path.display(), count, "dry run, not saving");
        return Ok(HexFix {
            converted: count,
            written: false,
        });
    }

    std::fs::write(path, &converted).map_err(|e| Error::file_write(path, e))?;
    tracing::info!(path = %path.display(), count, "converted hex colors");

    Ok(HexFix {
        converted: count,
        written: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_find_hex_values() {
        let text = r#"{"voxels": [{"color": 0x228b22}, {"color":0xFF0000}], "id": "0xabc"}"#;
        assert_eq!(find_hex_values(text), vec!["0x228b22", "0xFF0000"]);
    }

    #[test]
    fn test_hex_to_decimal() {
        assert_eq!(hex_to_decimal("0x228b22"), Some(2263842));
        assert_eq!(hex_to_decimal("0xzz"), None);
    }

    #[test]
    fn test_convert_hex() {
        let (text, count) = convert_hex(r#"{"a": 0xFF, "b": [0x10, 3]}"#);
        assert_eq!(text, r#"{"a": 255, "b": [16, 3]}"#);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_fix_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.json");
        std::fs::write(&path, r#"{"voxels": [{"x": 0, "y": 0, "z": 0, "color": 0x00FF00}]}"#)
            .unwrap();

        let dry = fix_hex_colors(&path, true).unwrap();
        assert_eq!(dry, HexFix { converted: 1, written: false });
        assert!(std::fs::read_to_string(&path).unwrap().contains("0x00FF00"));

        let fixed = fix_hex_colors(&path, false).unwrap();
        assert!(fixed.written);
        let data: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(data["voxels"][0]["color"], 65280);
    }

    #[test]
    fn test_fix_keeps_key_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("testBasicMovement.json");
        let json = crate::catalog::sample("testBasicMovement")
            .unwrap()
            .build()
            .unwrap()
            .replacen("65280", "0x00FF00", 1);
        std::fs::write(&path, &json).unwrap();

        let fix = fix_hex_colors(&path, false).unwrap();
        assert_eq!(fix.converted, 1);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("{\n  \"name\": \"testBasicMovement\","));
        assert_eq!(written, json.replacen("0x00FF00", "65280", 1));
    }

    #[test]
    fn test_fix_file_without_hex() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clean.json");
        std::fs::write(&path, "{\"a\": 1}").unwrap();
        let fix = fix_hex_colors(&path, false).unwrap();
        assert_eq!(fix.converted, 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_fix_still_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"a\": 0x1,}").unwrap();
        assert!(matches!(fix_hex_colors(&path, false), Err(Error::Config(_))));
    }
}
