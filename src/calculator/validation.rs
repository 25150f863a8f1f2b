use serde::Serialize;
use thiserror::Error;

use super::types::UsageInput;

/// Shortest accepted shower or dish-washing session, in minutes.
pub const MIN_SESSION_MINUTES: u32 = 1;
/// Longest accepted shower or dish-washing session, in minutes.
pub const MAX_SESSION_MINUTES: u32 = 60;
/// Largest household the calculator accepts.
pub const MAX_PEOPLE: u32 = 100;
/// Most shower or dish-washing sessions accepted per day.
pub const MAX_SESSIONS_PER_DAY: u32 = 24;
/// Most toilet flushes accepted per person per day.
pub const MAX_FLUSHES_PER_PERSON_PER_DAY: u32 = 50;
/// Most laundry loads accepted per week.
pub const MAX_LAUNDRY_LOADS_PER_WEEK: u32 = 50;
/// Most car washes accepted per week.
pub const MAX_CAR_WASHES_PER_WEEK: u32 = 14;

/// A problem with the usage input, reported back to the caller for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The `UsageInput` field at fault, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable description of the problem
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    pub fn for_field(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            message: message.into(),
        }
    }
}

/// Check usage input against the calculator's domain bounds.
/// Returns every problem found; an empty list means the input can be calculated.
pub fn validate(input: &UsageInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if input.people < 1 {
        errors.push(ValidationError::for_field(
            "people",
            "household size must be at least 1",
        ));
    }

    let counts = [
        ("people", "household size", input.people, MAX_PEOPLE),
        (
            "shower_sessions_per_day",
            "showers per day",
            input.shower_sessions_per_day,
            MAX_SESSIONS_PER_DAY,
        ),
        (
            "flushes_per_person_per_day",
            "flushes per person per day",
            input.flushes_per_person_per_day,
            MAX_FLUSHES_PER_PERSON_PER_DAY,
        ),
        (
            "laundry_loads_per_week",
            "laundry loads per week",
            input.laundry_loads_per_week,
            MAX_LAUNDRY_LOADS_PER_WEEK,
        ),
        (
            "dish_wash_sessions_per_day",
            "dish-washing sessions per day",
            input.dish_wash_sessions_per_day,
            MAX_SESSIONS_PER_DAY,
        ),
        (
            "car_washes_per_week",
            "car washes per week",
            input.car_washes_per_week,
            MAX_CAR_WASHES_PER_WEEK,
        ),
    ];
    for (field, label, value, max) in counts {
        if value > max {
            errors.push(ValidationError::for_field(
                field,
                format!("{} must be at most {}", label, max),
            ));
        }
    }

    if !session_minutes_in_range(input.shower_minutes_per_session) {
        errors.push(ValidationError::for_field(
            "shower_minutes_per_session",
            format!(
                "shower duration must be between {} and {} minutes",
                MIN_SESSION_MINUTES, MAX_SESSION_MINUTES
            ),
        ));
    }

    if !session_minutes_in_range(input.dish_wash_minutes_per_session) {
        errors.push(ValidationError::for_field(
            "dish_wash_minutes_per_session",
            format!(
                "dish-washing duration must be between {} and {} minutes",
                MIN_SESSION_MINUTES, MAX_SESSION_MINUTES
            ),
        ));
    }

    errors
}

fn session_minutes_in_range(minutes: u32) -> bool {
    (MIN_SESSION_MINUTES..=MAX_SESSION_MINUTES).contains(&minutes)
}
