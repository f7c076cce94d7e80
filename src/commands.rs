//! CLI command definitions
//!
//! Defines the clap commands for the fixture CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Build a fixture from a YAML recipe
    Build {
        /// Path to the recipe file
        recipe: PathBuf,

        /// Write <name>.json into this directory instead of printing
        #[arg(long, short)]
        out: Option<PathBuf>,

        /// Write into the configured fixtures directory
        #[arg(long, conflicts_with = "out")]
        save: bool,
    },

    /// Emit the built-in sample fixtures
    Samples {
        /// Only this sample
        name: Option<String>,

        /// List sample names and descriptions
        #[arg(long)]
        list: bool,

        /// Write <name>.json files into this directory instead of printing
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Lint fixture JSON files
    Check {
        /// Files to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Convert hex color literals in a JSON file to decimal
    FixHex {
        /// File to repair in place
        path: PathBuf,

        /// Report what would change without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the runner URL that loads a fixture
    Url {
        /// Fixture name
        name: String,
    },

    /// Print the effective browser runner settings as JSON
    Runner {
        /// Resolve CI settings regardless of the CI variable
        #[arg(long)]
        ci: bool,
    },

    /// Show or create the configuration file
    Config {
        /// Write a configuration file with default values
        #[arg(long)]
        init: bool,
    },
}
