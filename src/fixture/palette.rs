//! Named terrain colors
//!
//! Colors are stored in fixtures as packed `0xRRGGBB` integers. Authors may
//! refer to a handful of them by name; everything else is given as a raw
//! packed value.

use serde::Deserialize;

/// Read-only name to packed-RGB table shared by every builder.
pub const PALETTE: [(&str, u32); 7] = [
    ("green", 0x00FF00),
    ("orange", 0xFFA500),
    ("gray", 0xAAAAAA),
    ("darkGray", 0x404040),
    ("red", 0xFF0000),
    ("blue", 0x0000FF),
    ("yellow", 0xFFFF00),
];

/// Look up a palette entry by its exact (case-sensitive) name.
pub fn lookup(name: &str) -> Option<u32> {
    PALETTE
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, rgb)| *rgb)
}

/// A color as written by a fixture author
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Color {
    /// Raw packed RGB value
    Packed(u32),
    /// Palette name, resolved when the voxel is added
    Named(String),
}

impl Color {
    /// Default color for ground tiles and flat platforms
    pub const GROUND: &'static str = "green";
    /// Default color for raised platform tiles and stairs
    pub const PLATFORM: &'static str = "orange";
    /// Default color for columns
    pub const COLUMN: &'static str = "gray";

    /// Resolve to a packed value. Unknown names yield `None`.
    pub fn resolve(&self) -> Option<u32> {
        match self {
            Color::Packed(rgb) => Some(*rgb),
            Color::Named(name) => lookup(name),
        }
    }
}

impl From<u32> for Color {
    fn from(rgb: u32) -> Self {
        Color::Packed(rgb)
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Color::Named(name.to_string())
    }
}

impl From<String> for Color {
    fn from(name: String) -> Self {
        Color::Named(name)
    }
}
