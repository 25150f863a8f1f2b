pub mod calculator;
mod commands;
mod error;
pub mod form;
pub mod report;

use std::process::ExitCode;

use clap::Parser;

pub use calculator::{
    default_benchmarks, validate, ConsumptionEngine, ConsumptionResult, StatusTier, UsageInput,
    ValidationError,
};
pub use error::HidricaError;
pub use form::FormInput;
pub use report::{JsonReport, ResultConsumer, TextReport};

pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    commands::dispatch(commands::Cli::parse())
}
