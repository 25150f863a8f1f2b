//! Presentation of calculation results.
//!
//! The calculator core hands its results to a `ResultConsumer` and never
//! formats anything itself. Status copy and number formatting live here.

use std::io::{self, Write};

use serde_json::json;

use crate::calculator::{Activity, ConsumptionResult, StatusTier, ValidationError};

/// Receives the outcome of one calculation request.
pub trait ResultConsumer {
    /// Show a successful calculation.
    fn present(&mut self, result: &ConsumptionResult) -> io::Result<()>;

    /// Show every reason the input was rejected.
    fn reject(&mut self, errors: &[ValidationError]) -> io::Result<()>;
}

/// Message shown to the household for each status tier.
pub fn status_message(status: StatusTier) -> &'static str {
    match status {
        StatusTier::WithinLimit => {
            "Congratulations! Your consumption is within the sustainable limit. Keep it up!"
        }
        StatusTier::NearLimit => {
            "Your consumption is close to the limit. A few tips can help you save."
        }
        StatusTier::OverLimit => {
            "Your consumption is above the ideal. It is important to adopt more sustainable habits."
        }
    }
}

/// Short label for a status tier.
pub fn status_label(status: StatusTier) -> &'static str {
    match status {
        StatusTier::WithinLimit => "within limit",
        StatusTier::NearLimit => "near limit",
        StatusTier::OverLimit => "over limit",
    }
}

/// Display name for an activity.
pub fn activity_label(activity: Activity) -> &'static str {
    match activity {
        Activity::Shower => "Showers",
        Activity::Flush => "Toilet flushes",
        Activity::Laundry => "Laundry",
        Activity::Dishes => "Dish washing",
        Activity::CarWash => "Car washing",
    }
}

/// Group thousands with `.` as in pt-BR: `21140` -> `21.140`.
pub fn format_liters(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Signed percentage: `+10.1%`, `-40.5%`, `0%`.
pub fn format_deviation(deviation: f64) -> String {
    let sign = if deviation > 0.0 { "+" } else { "" };
    format!("{}{}%", sign, deviation)
}

/// Range bounds are whole liters in every shipped table.
fn format_bound(value: f64) -> String {
    format_liters(value.round().max(0.0) as u64)
}

/// Human-readable report written to any `Write` sink.
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultConsumer for TextReport<W> {
    fn present(&mut self, result: &ConsumptionResult) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(
            out,
            "Monthly consumption: {} L",
            format_liters(result.total_liters)
        )?;
        writeln!(
            out,
            "Sustainable ideal:   {} L (range {} to {} L)",
            format_liters(result.ideal_liters),
            format_bound(result.range.min),
            format_bound(result.range.max)
        )?;
        writeln!(
            out,
            "Difference:          {}",
            format_deviation(result.deviation_percent)
        )?;
        writeln!(out, "Status:              {}", status_label(result.status))?;
        writeln!(out)?;
        writeln!(out, "{}", status_message(result.status))?;
        writeln!(out)?;
        writeln!(out, "Breakdown:")?;
        for (activity, liters) in result.breakdown.iter() {
            writeln!(
                out,
                "  {:<16} {:>10} L",
                activity_label(activity),
                format_liters(liters)
            )?;
        }
        Ok(())
    }

    fn reject(&mut self, errors: &[ValidationError]) -> io::Result<()> {
        writeln!(self.out, "Could not calculate consumption:")?;
        for error in errors {
            writeln!(self.out, "  - {}", error)?;
        }
        Ok(())
    }
}

/// Pretty-printed JSON written to any `Write` sink.
pub struct JsonReport<W: Write> {
    out: W,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultConsumer for JsonReport<W> {
    fn present(&mut self, result: &ConsumptionResult) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, result)?;
        writeln!(self.out)
    }

    fn reject(&mut self, errors: &[ValidationError]) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &json!({ "errors": errors }))?;
        writeln!(self.out)
    }
}
