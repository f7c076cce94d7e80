//! voxtest - declarative voxel-terrain test fixtures
//!
//! This library builds and validates the JSON fixtures a voxel game's
//! browser tests load, one test map per movement mechanic.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod common;
pub mod fixture;
pub mod harness;
pub mod lint;
pub mod recipe;

// Re-export commonly used types
pub use common::{Error, Result};
pub use fixture::{Fixture, FixtureBuilder, ValidationError};
