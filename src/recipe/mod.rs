//! Fixture recipes
//!
//! A recipe is a YAML file that names a fixture's metadata and lists its
//! terrain as a sequence of shapes. Recipes are how fixtures are kept under
//! version control; the JSON document is generated from them.

mod config;
mod loader;

pub use config::*;
pub use loader::{build_recipe, load_recipe, parse_recipe};
