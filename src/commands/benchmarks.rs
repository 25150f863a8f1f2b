use std::io::Write;

use serde::Serialize;

use super::{load_engine, OutputArgs};
use crate::calculator::{ConsumptionEngine, OutOfTablePolicy};
use crate::error::HidricaError;
use crate::report::format_liters;

/// One household size of the benchmark table, as displayed.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkRow {
    pub people: u32,
    pub min_liters: u64,
    pub ideal_liters: u64,
    pub max_liters: u64,
}

/// Print the sustainable range table of the active benchmarks.
pub fn run(args: &OutputArgs, out: &mut impl Write) -> Result<(), HidricaError> {
    let engine = load_engine(args.benchmarks.as_deref())?;
    let rows = benchmark_rows(&engine);

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &rows).map_err(std::io::Error::from)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{:>6}  {:>10}  {:>10}  {:>10}", "People", "Min L", "Ideal L", "Max L")?;
    for row in &rows {
        writeln!(
            out,
            "{:>6}  {:>10}  {:>10}  {:>10}",
            row.people,
            format_liters(row.min_liters),
            format_liters(row.ideal_liters),
            format_liters(row.max_liters)
        )?;
    }

    let config = engine.config();
    match config.out_of_table {
        OutOfTablePolicy::Fallback => writeln!(
            out,
            "Other household sizes use the range for {} people.",
            config.fallback_household_size
        )?,
        OutOfTablePolicy::Extrapolate => writeln!(
            out,
            "Other household sizes scale {} to {} L per person.",
            format_liters(config.per_person.min.round() as u64),
            format_liters(config.per_person.max.round() as u64)
        )?,
    }

    Ok(())
}

pub fn benchmark_rows(engine: &ConsumptionEngine) -> Vec<BenchmarkRow> {
    engine
        .benchmark_table()
        .map(|(people, range)| BenchmarkRow {
            people,
            min_liters: range.min.round() as u64,
            ideal_liters: range.ideal().round() as u64,
            max_liters: range.max.round() as u64,
        })
        .collect()
}
