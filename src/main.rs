//! voxtest - declarative voxel-terrain test fixtures
//!
//! Builds fixture JSON from recipes, lints hand-written maps and prints the
//! settings the browser test runner needs.

use clap::Parser;
use commands::Commands;
use voxtest::common::{config::Config, logging};
use voxtest::{cli, commands};

#[derive(Parser)]
#[command(name = "voxtest", about = "Voxel movement test fixture tool")]
#[command(version, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose);

    let result = match Config::load() {
        Ok(config) => cli::dispatch(cli.command, &config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
