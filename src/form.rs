//! Raw form fields for the calculator.
//!
//! Values arrive as text (command-line flags, a web form, a query string) and
//! are coerced into a `UsageInput` here, so the engine only ever sees whole,
//! non-negative numbers.

use serde::Deserialize;
use tracing::debug;

use crate::calculator::{validate, UsageInput, ValidationError};

/// The calculator's form, one optional text value per field.
///
/// Blank or missing fields take the form's default value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormInput {
    pub people: Option<String>,
    pub showers: Option<String>,
    pub shower_minutes: Option<String>,
    pub flushes: Option<String>,
    pub laundry: Option<String>,
    pub dishes: Option<String>,
    pub dishes_minutes: Option<String>,
    pub car_washes: Option<String>,
}

impl FormInput {
    /// Coerce the form into a `UsageInput` and run the validator on it.
    ///
    /// Returns every field problem and every validation problem together.
    pub fn parse(&self) -> Result<UsageInput, Vec<ValidationError>> {
        let (input, mut errors) = self.read();
        errors.extend(validate(&input));

        if errors.is_empty() {
            Ok(input)
        } else {
            Err(errors)
        }
    }

    /// Coerce each field, substituting the default for fields that are blank
    /// or unreadable. Unreadable fields are reported in the returned list.
    pub fn read(&self) -> (UsageInput, Vec<ValidationError>) {
        let defaults = UsageInput::default();
        let mut errors = Vec::new();

        let input = UsageInput {
            people: read_count(
                &self.people,
                "people",
                "Household size",
                defaults.people,
                &mut errors,
            ),
            shower_sessions_per_day: read_count(
                &self.showers,
                "shower_sessions_per_day",
                "Showers per day",
                defaults.shower_sessions_per_day,
                &mut errors,
            ),
            shower_minutes_per_session: read_count(
                &self.shower_minutes,
                "shower_minutes_per_session",
                "Shower duration",
                defaults.shower_minutes_per_session,
                &mut errors,
            ),
            flushes_per_person_per_day: read_count(
                &self.flushes,
                "flushes_per_person_per_day",
                "Flushes per person per day",
                defaults.flushes_per_person_per_day,
                &mut errors,
            ),
            laundry_loads_per_week: read_count(
                &self.laundry,
                "laundry_loads_per_week",
                "Laundry loads per week",
                defaults.laundry_loads_per_week,
                &mut errors,
            ),
            dish_wash_sessions_per_day: read_count(
                &self.dishes,
                "dish_wash_sessions_per_day",
                "Dish-washing sessions per day",
                defaults.dish_wash_sessions_per_day,
                &mut errors,
            ),
            dish_wash_minutes_per_session: read_count(
                &self.dishes_minutes,
                "dish_wash_minutes_per_session",
                "Dish-washing duration",
                defaults.dish_wash_minutes_per_session,
                &mut errors,
            ),
            car_washes_per_week: read_count(
                &self.car_washes,
                "car_washes_per_week",
                "Car washes per week",
                defaults.car_washes_per_week,
                &mut errors,
            ),
        };

        (input, errors)
    }
}

fn read_count(
    raw: &Option<String>,
    field: &str,
    label: &str,
    default: u32,
    errors: &mut Vec<ValidationError>,
) -> u32 {
    let text = match raw.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return default,
    };

    match text.parse::<u32>() {
        Ok(value) => value,
        Err(e) => {
            debug!("Field {} rejected {:?}: {}", field, text, e);
            errors.push(ValidationError::for_field(
                field,
                format!("{} must be a non-negative whole number", label),
            ));
            default
        }
    }
}
