use std::io::Write;

use clap::Args;
use tracing::{info, warn};

use super::{load_engine, OutputArgs};
use crate::calculator::ConsumptionEngine;
use crate::error::HidricaError;
use crate::form::FormInput;
use crate::report::{JsonReport, ResultConsumer, TextReport};

/// Household habits, taken as typed. Omitted values use the form defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct CalculateArgs {
    /// Number of people in the household [default: 4]
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub people: Option<String>,

    /// Showers per day [default: 1]
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub showers: Option<String>,

    /// Minutes per shower, 1-60 [default: 10]
    #[arg(long, value_name = "MIN", allow_hyphen_values = true)]
    pub shower_minutes: Option<String>,

    /// Toilet flushes per person per day [default: 5]
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub flushes: Option<String>,

    /// Laundry loads per week [default: 3]
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub laundry: Option<String>,

    /// Dish-washing sessions per day [default: 2]
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub dishes: Option<String>,

    /// Minutes per dish-washing session, 1-60 [default: 15]
    #[arg(long, value_name = "MIN", allow_hyphen_values = true)]
    pub dishes_minutes: Option<String>,

    /// Car washes per week [default: 1]
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub car_washes: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl CalculateArgs {
    pub fn to_form(&self) -> FormInput {
        FormInput {
            people: self.people.clone(),
            showers: self.showers.clone(),
            shower_minutes: self.shower_minutes.clone(),
            flushes: self.flushes.clone(),
            laundry: self.laundry.clone(),
            dishes: self.dishes.clone(),
            dishes_minutes: self.dishes_minutes.clone(),
            car_washes: self.car_washes.clone(),
        }
    }
}

/// Calculate consumption for the household described by `args`.
pub fn run(args: &CalculateArgs, out: &mut impl Write) -> Result<(), HidricaError> {
    let engine = load_engine(args.output.benchmarks.as_deref())?;
    let form = args.to_form();

    if args.output.json {
        deliver(&engine, &form, &mut JsonReport::new(out))
    } else {
        deliver(&engine, &form, &mut TextReport::new(out))
    }
}

/// Parse, validate and calculate, handing the outcome to `consumer`.
pub fn deliver(
    engine: &ConsumptionEngine,
    form: &FormInput,
    consumer: &mut impl ResultConsumer,
) -> Result<(), HidricaError> {
    match form.parse() {
        Ok(input) => {
            let result = engine.calculate(&input);
            info!(
                "Household of {} uses {} L/month ({:?})",
                input.people, result.total_liters, result.status
            );
            consumer.present(&result)?;
            Ok(())
        }
        Err(errors) => {
            warn!("Rejected usage input with {} problem(s)", errors.len());
            consumer.reject(&errors)?;
            Err(HidricaError::Validation(errors))
        }
    }
}
