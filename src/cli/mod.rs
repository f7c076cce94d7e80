//! CLI command handling
//!
//! Dispatches CLI commands and formats their output.

use std::path::Path;

use colored::Colorize;

use crate::catalog;
use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{is_ci, paths, Error, Result};
use crate::fixture::{FixtureBuilder, ValidationError};
use crate::harness::RunnerSettings;
use crate::lint::{self, LintReport};
use crate::recipe;

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Build { recipe, out, save } => {
            let builder = recipe::load_recipe(&recipe)?.into_builder();
            let out = out.or_else(|| save.then(|| config.output.fixtures_dir.clone()));
            emit(builder, out.as_deref()).await
        }

        Commands::Samples { name, list, out } => {
            if list {
                for info in catalog::all_samples() {
                    println!(
                        "{} {} {}",
                        format!("{:<24}", info.name).white().bold(),
                        format!("{:<20}", info.mechanic).cyan(),
                        info.description.dimmed()
                    );
                }
                return Ok(());
            }

            let names: Vec<&str> = match &name {
                Some(name) => vec![name.as_str()],
                None => catalog::all_samples().iter().map(|s| s.name).collect(),
            };

            for name in names {
                let builder = catalog::sample(name).ok_or_else(|| {
                    let available: Vec<&str> =
                        catalog::all_samples().iter().map(|s| s.name).collect();
                    Error::unknown_sample(name, &available)
                })?;
                emit(builder, out.as_deref()).await?;
            }
            Ok(())
        }

        Commands::Check { paths: files } => {
            let total = files.len();
            let mut failed = 0;

            for path in &files {
                let report = lint::lint_file(path);
                print_lint_report(&report);
                if !report.is_clean() {
                    failed += 1;
                }
            }

            println!("\n{}/{} files valid", total - failed, total);
            if failed > 0 {
                return Err(Error::LintFailed { failed, total });
            }
            Ok(())
        }

        Commands::FixHex { path, dry_run } => {
            println!("Checking: {}", path.display());
            let fix = lint::fix_hex_colors(&path, dry_run)?;

            if fix.converted == 0 {
                println!("{} No hex values found", "✓".green());
            } else {
                println!(
                    "{} Converted {} hex values to decimal",
                    "✓".green(),
                    fix.converted
                );
                if fix.written {
                    println!("  File updated: {}", path.display());
                } else {
                    println!("  {}", "Dry run - would convert but not saving".dimmed());
                }
            }
            Ok(())
        }

        Commands::Url { name } => {
            let settings = RunnerSettings::resolve(&config.runner, is_ci());
            println!("{}", settings.fixture_url(&name));
            Ok(())
        }

        Commands::Runner { ci } => {
            let settings = RunnerSettings::resolve(&config.runner, ci || is_ci());
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }

        Commands::Config { init } => {
            let path = paths::config_path()
                .ok_or_else(|| Error::Config("No configuration directory on this platform".into()))?;

            if init {
                if path.exists() {
                    println!("Configuration already exists: {}", path.display());
                    return Ok(());
                }
                if let Some(dir) = path.parent() {
                    std::fs::create_dir_all(dir)?;
                }
                std::fs::write(&path, Config::template())
                    .map_err(|e| Error::file_write(&path, e))?;
                println!("{} Wrote {}", "✓".green(), path.display());
            } else {
                let state = if path.exists() { "" } else { " (not created, using defaults)" };
                println!("{}{}", path.display(), state.dimmed());
            }
            Ok(())
        }
    }
}

/// Build a fixture and print it, or save it under `out`
async fn emit(builder: FixtureBuilder, out: Option<&Path>) -> Result<()> {
    let name = builder.draft().name.clone();
    let result = match out {
        Some(dir) => builder.save_to_file(dir).await.map(|_| ()),
        None => builder.build().map(|json| println!("{}", json)),
    };

    match result {
        Ok(()) => {
            if let Some(dir) = out {
                println!("{} {} → {}", "✓".green(), name.white().bold(), dir.display());
            }
            Ok(())
        }
        Err(Error::Validation(err)) => {
            print_validation_error(&err);
            Err(Error::Validation(err))
        }
        Err(e) => Err(e),
    }
}

fn print_validation_error(err: &ValidationError) {
    eprintln!("{} {}", "✗".red(), err.name.white().bold());
    for violation in &err.violations {
        eprintln!("  - {}", violation);
    }
}

fn print_lint_report(report: &LintReport) {
    if report.is_clean() {
        println!("{} {}", "✓".green(), report.path.display());
    } else {
        println!("{} {}:", "✗".red(), report.path.display());
        for finding in &report.findings {
            println!("   {}", finding);
        }
    }
}
