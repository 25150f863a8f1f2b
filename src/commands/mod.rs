//! Command-line front end for the calculator.

pub mod benchmarks;
pub mod calculate;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::calculator::{resolve_benchmarks, ConsumptionEngine};
use crate::error::HidricaError;

/// Household water consumption calculator.
///
/// Estimates monthly water use from daily and weekly habits and compares it
/// with a sustainable benchmark for the household's size.
#[derive(Parser, Debug)]
#[command(name = "hidrica")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Calculate monthly consumption for a household
    Calculate(calculate::CalculateArgs),
    /// Show the sustainable range table in use
    Benchmarks(OutputArgs),
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Benchmark tables to use instead of the per-user file or built-in defaults
    #[arg(long, value_name = "PATH")]
    pub benchmarks: Option<PathBuf>,
}

/// Run a parsed command line, writing reports to stdout.
pub fn dispatch(cli: Cli) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.command {
        Command::Calculate(args) => calculate::run(args, &mut out),
        Command::Benchmarks(args) => benchmarks::run(args, &mut out),
    };

    match result.and_then(|()| out.flush().map_err(HidricaError::from)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Validation problems were already written by the report
            if !matches!(err, HidricaError::Validation(_)) {
                eprintln!("Error: {}", err);
            }
            ExitCode::from(err.exit_code())
        }
    }
}

/// Build the engine from the benchmark file the user asked for.
pub fn load_engine(path: Option<&Path>) -> Result<ConsumptionEngine, HidricaError> {
    let config = resolve_benchmarks(path).map_err(|e| HidricaError::Config(format!("{:#}", e)))?;
    info!(
        "Using {} benchmark ranges ({:?} beyond the table)",
        config.ranges.len(),
        config.out_of_table
    );
    ConsumptionEngine::new(config).map_err(|e| HidricaError::Config(format!("{:#}", e)))
}

/// Output options pinned to the shipped tables so tests ignore any per-user file.
#[cfg(test)]
pub(crate) fn shipped_output(json: bool) -> OutputArgs {
    OutputArgs {
        json,
        benchmarks: Some(
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("config")
                .join("benchmarks.toml"),
        ),
    }
}
