//! Type definitions for the water consumption calculator.
//!
//! Configuration types deserialize from the benchmark TOML; input and result
//! types serialize to JSON for the report layer.

use serde::{Deserialize, Serialize};

// =============================================================================
// CONFIGURATION TYPES (loaded from TOML)
// =============================================================================

/// Root configuration loaded from benchmarks.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkConfig {
    /// How household sizes missing from `ranges` are benchmarked
    #[serde(default)]
    pub out_of_table: OutOfTablePolicy,
    /// Household size whose range is reused under `OutOfTablePolicy::Fallback`
    #[serde(default = "default_fallback_household_size")]
    pub fallback_household_size: u32,
    /// Liters consumed per unit of each activity
    pub rates: ConsumptionRates,
    /// Per-person band used under `OutOfTablePolicy::Extrapolate`
    pub per_person: SustainableRange,
    /// Tabulated sustainable ranges keyed by household size
    pub ranges: Vec<RangeEntry>,
}

fn default_fallback_household_size() -> u32 {
    6
}

/// Liters consumed per unit of each household activity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRates {
    /// Liters per minute of showering
    pub shower_per_minute: f64,
    /// Liters per toilet flush
    pub per_flush: f64,
    /// Liters per washing-machine load
    pub per_laundry_load: f64,
    /// Liters per minute of washing dishes under the tap
    pub dishes_per_minute: f64,
    /// Liters per car wash
    pub per_car_wash: f64,
}

/// Benchmark band of acceptable liters per month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SustainableRange {
    pub min: f64,
    pub max: f64,
}

impl SustainableRange {
    /// Midpoint of the band, used as the ideal consumption.
    pub fn ideal(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Scale a per-person band to a household of `people`.
    pub fn scaled(&self, people: u32) -> Self {
        let people = f64::from(people);
        Self {
            min: self.min * people,
            max: self.max * people,
        }
    }
}

/// One row of the sustainable-range table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RangeEntry {
    /// Household size this row applies to
    pub people: u32,
    pub min: f64,
    pub max: f64,
}

impl RangeEntry {
    pub fn range(&self) -> SustainableRange {
        SustainableRange {
            min: self.min,
            max: self.max,
        }
    }
}

/// Benchmark policy for household sizes that have no row in the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfTablePolicy {
    /// Reuse the range of the configured fallback household size
    #[default]
    Fallback,
    /// Multiply the per-person band by the household size
    Extrapolate,
}

// =============================================================================
// INPUT TYPES
// =============================================================================

/// Household water-activity quantities for one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageInput {
    /// Household size
    pub people: u32,
    pub shower_sessions_per_day: u32,
    pub shower_minutes_per_session: u32,
    pub flushes_per_person_per_day: u32,
    pub laundry_loads_per_week: u32,
    pub dish_wash_sessions_per_day: u32,
    pub dish_wash_minutes_per_session: u32,
    pub car_washes_per_week: u32,
}

impl Default for UsageInput {
    /// Values the calculator form starts with.
    fn default() -> Self {
        Self {
            people: 4,
            shower_sessions_per_day: 1,
            shower_minutes_per_session: 10,
            flushes_per_person_per_day: 5,
            laundry_loads_per_week: 3,
            dish_wash_sessions_per_day: 2,
            dish_wash_minutes_per_session: 15,
            car_washes_per_week: 1,
        }
    }
}

// =============================================================================
// OUTPUT TYPES (serialized to the report layer)
// =============================================================================

/// Household activities that contribute to the monthly total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Shower,
    Flush,
    Laundry,
    Dishes,
    CarWash,
}

impl Activity {
    /// Every activity, in breakdown order.
    pub const ALL: [Activity; 5] = [
        Activity::Shower,
        Activity::Flush,
        Activity::Laundry,
        Activity::Dishes,
        Activity::CarWash,
    ];

    /// Stable identifier, matching the breakdown's JSON keys.
    pub fn name(self) -> &'static str {
        match self {
            Activity::Shower => "shower",
            Activity::Flush => "flush",
            Activity::Laundry => "laundry",
            Activity::Dishes => "dishes",
            Activity::CarWash => "car_wash",
        }
    }
}

/// Unrounded monthly liters per activity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActivityLiters {
    pub shower: f64,
    pub flush: f64,
    pub laundry: f64,
    pub dishes: f64,
    pub car_wash: f64,
}

impl ActivityLiters {
    pub fn get(&self, activity: Activity) -> f64 {
        match activity {
            Activity::Shower => self.shower,
            Activity::Flush => self.flush,
            Activity::Laundry => self.laundry,
            Activity::Dishes => self.dishes,
            Activity::CarWash => self.car_wash,
        }
    }

    /// Sum of all activities, in breakdown order.
    pub fn total(&self) -> f64 {
        Activity::ALL.iter().map(|a| self.get(*a)).sum()
    }
}

/// Monthly liters per activity, rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Breakdown {
    pub shower: u64,
    pub flush: u64,
    pub laundry: u64,
    pub dishes: u64,
    pub car_wash: u64,
}

impl Breakdown {
    pub fn get(&self, activity: Activity) -> u64 {
        match activity {
            Activity::Shower => self.shower,
            Activity::Flush => self.flush,
            Activity::Laundry => self.laundry,
            Activity::Dishes => self.dishes,
            Activity::CarWash => self.car_wash,
        }
    }

    /// Activities paired with their liters, in breakdown order.
    pub fn iter(&self) -> impl Iterator<Item = (Activity, u64)> + '_ {
        Activity::ALL.into_iter().map(move |a| (a, self.get(a)))
    }
}

/// Classification of total consumption against the sustainable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusTier {
    /// At or below the range maximum
    WithinLimit,
    /// Above the maximum by at most 20%
    NearLimit,
    /// More than 20% above the maximum
    OverLimit,
}

/// Complete result of one consumption calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionResult {
    /// Total monthly liters (rounded)
    pub total_liters: u64,
    /// Midpoint of the sustainable range (rounded)
    pub ideal_liters: u64,
    /// Range the total was compared against
    pub range: SustainableRange,
    /// Signed percentage distance from the ideal, one decimal place
    pub deviation_percent: f64,
    pub status: StatusTier,
    pub breakdown: Breakdown,
}
