//! TOML benchmark loading for the consumption engine.
//!
//! Provides three loading methods:
//! - `default_benchmarks()` - Loads the embedded tables compiled into the binary
//! - `load_benchmarks(path)` - Loads custom tables from a file path
//! - `resolve_benchmarks(path)` - Explicit path, then the per-user file, then the defaults

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::{BenchmarkConfig, SustainableRange};

/// Default benchmarks embedded in the binary at compile time.
/// These are loaded from `config/benchmarks.toml`.
const DEFAULT_BENCHMARKS: &str = include_str!("../../config/benchmarks.toml");

/// Parse and check benchmark tables from TOML text.
pub fn parse_benchmarks(text: &str) -> Result<BenchmarkConfig> {
    let config: BenchmarkConfig = toml::from_str(text)?;
    check_benchmarks(&config)?;
    Ok(config)
}

/// Load benchmark tables from a TOML file at the given path.
///
/// # Returns
/// * `Ok(BenchmarkConfig)` - Parsed and checked configuration
/// * `Err` - If the file cannot be read, the TOML is invalid, or a table
///   would let the engine divide by zero
pub fn load_benchmarks(path: &Path) -> Result<BenchmarkConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read benchmarks from {}", path.display()))?;
    let config = parse_benchmarks(&content)
        .with_context(|| format!("Invalid benchmarks in {}", path.display()))?;
    debug!(
        "Loaded {} benchmark ranges from {:?}",
        config.ranges.len(),
        path
    );
    Ok(config)
}

/// Get the default benchmarks embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_benchmarks() -> BenchmarkConfig {
    parse_benchmarks(DEFAULT_BENCHMARKS).expect("embedded benchmarks.toml must be valid")
}

/// Per-user benchmark file, e.g. `~/.config/hidrica/benchmarks.toml` on Linux.
pub fn user_benchmarks_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hidrica").join("benchmarks.toml"))
}

/// Pick the benchmark tables for a run.
///
/// An explicit path must load; the per-user file is only used when it exists.
pub fn resolve_benchmarks(explicit: Option<&Path>) -> Result<BenchmarkConfig> {
    if let Some(path) = explicit {
        return load_benchmarks(path);
    }

    if let Some(path) = user_benchmarks_path().filter(|p| p.is_file()) {
        return load_benchmarks(&path);
    }

    debug!("Using embedded benchmarks");
    Ok(default_benchmarks())
}

/// Reject tables the engine cannot divide by or classify against.
pub(crate) fn check_benchmarks(config: &BenchmarkConfig) -> Result<()> {
    let rates = &config.rates;
    let named_rates = [
        ("shower_per_minute", rates.shower_per_minute),
        ("per_flush", rates.per_flush),
        ("per_laundry_load", rates.per_laundry_load),
        ("dishes_per_minute", rates.dishes_per_minute),
        ("per_car_wash", rates.per_car_wash),
    ];
    for (name, rate) in named_rates {
        if !rate.is_finite() || rate < 0.0 {
            bail!("rate {} must be a non-negative number, got {}", name, rate);
        }
    }

    check_range("per_person", &config.per_person)?;

    if config.ranges.is_empty() {
        bail!("at least one household range is required");
    }

    let mut seen = HashSet::new();
    for entry in &config.ranges {
        if entry.people < 1 {
            bail!("household size in ranges must be at least 1");
        }
        if !seen.insert(entry.people) {
            bail!("household size {} appears more than once", entry.people);
        }
        check_range(&format!("range for {} people", entry.people), &entry.range())?;
    }

    if !seen.contains(&config.fallback_household_size) {
        bail!(
            "fallback household size {} has no range",
            config.fallback_household_size
        );
    }

    Ok(())
}

fn check_range(label: &str, range: &SustainableRange) -> Result<()> {
    if !(range.min.is_finite() && range.max.is_finite()) {
        bail!("{} must have finite bounds", label);
    }
    if range.min <= 0.0 || range.min >= range.max {
        bail!(
            "{} must satisfy 0 < min < max, got min={} max={}",
            label,
            range.min,
            range.max
        );
    }
    Ok(())
}
