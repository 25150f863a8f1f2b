//! Consumption engine for the household water calculator.
//!
//! The `ConsumptionEngine` takes a validated usage input and produces the
//! monthly breakdown, the benchmark comparison and the status tier.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::benchmarks::check_benchmarks;
use super::types::*;
use super::validation::{validate, ValidationError};

/// Days in the billing month used for daily activities.
pub const DAYS_PER_MONTH: f64 = 30.0;
/// Weeks in the billing month used for weekly activities.
pub const WEEKS_PER_MONTH: f64 = 4.0;
/// Totals up to this multiple of the range maximum are `NearLimit`.
pub const NEAR_LIMIT_FACTOR: f64 = 1.2;

/// The consumption calculation engine.
///
/// Owns immutable benchmark tables, so one engine can be shared across
/// threads and every call is independent.
#[derive(Debug, Clone)]
pub struct ConsumptionEngine {
    config: BenchmarkConfig,
    ranges: BTreeMap<u32, SustainableRange>,
    fallback: SustainableRange,
}

impl ConsumptionEngine {
    /// Create an engine with the given benchmark tables.
    ///
    /// # Arguments
    /// * `config` - Benchmark tables (typically from `default_benchmarks()` or `load_benchmarks()`)
    ///
    /// # Returns
    /// * `Err` - If a range is empty or inverted, or the fallback size has no range
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        check_benchmarks(&config).context("Invalid benchmark configuration")?;

        let ranges: BTreeMap<u32, SustainableRange> = config
            .ranges
            .iter()
            .map(|entry| (entry.people, entry.range()))
            .collect();
        let fallback = ranges
            .get(&config.fallback_household_size)
            .copied()
            .context("fallback household size has no range")?;

        Ok(Self {
            config,
            ranges,
            fallback,
        })
    }

    /// The benchmark tables this engine was built with.
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Check the input, then calculate.
    ///
    /// Returns every validation problem at once when the input is rejected.
    pub fn evaluate(&self, input: &UsageInput) -> Result<ConsumptionResult, Vec<ValidationError>> {
        let errors = validate(input);
        if !errors.is_empty() {
            warn!("Rejected usage input with {} problem(s)", errors.len());
            return Err(errors);
        }
        Ok(self.calculate(input))
    }

    /// Calculate monthly consumption for an input that passed `validate`.
    pub fn calculate(&self, input: &UsageInput) -> ConsumptionResult {
        let liters = self.monthly_liters(input);
        let total = liters.total();
        let range = self.range_for(input.people);
        let ideal = range.ideal();
        let deviation = (total - ideal) / ideal * 100.0;
        let status = classify(total, &range);

        debug!(
            "Calculated {:.1} L/month for {} people against {:?}: {:?}",
            total, input.people, range, status
        );

        ConsumptionResult {
            total_liters: round_liters(total),
            ideal_liters: round_liters(ideal),
            range,
            deviation_percent: round_one_decimal(deviation),
            status,
            breakdown: Breakdown {
                shower: round_liters(liters.shower),
                flush: round_liters(liters.flush),
                laundry: round_liters(liters.laundry),
                dishes: round_liters(liters.dishes),
                car_wash: round_liters(liters.car_wash),
            },
        }
    }

    /// Unrounded monthly liters for each activity.
    pub fn monthly_liters(&self, input: &UsageInput) -> ActivityLiters {
        let rates = &self.config.rates;
        let n = |count: u32| f64::from(count);

        ActivityLiters {
            shower: n(input.shower_sessions_per_day)
                * n(input.shower_minutes_per_session)
                * rates.shower_per_minute
                * DAYS_PER_MONTH,
            flush: n(input.people)
                * n(input.flushes_per_person_per_day)
                * rates.per_flush
                * DAYS_PER_MONTH,
            laundry: n(input.laundry_loads_per_week) * rates.per_laundry_load * WEEKS_PER_MONTH,
            dishes: n(input.dish_wash_sessions_per_day)
                * n(input.dish_wash_minutes_per_session)
                * rates.dishes_per_minute
                * DAYS_PER_MONTH,
            car_wash: n(input.car_washes_per_week) * rates.per_car_wash * WEEKS_PER_MONTH,
        }
    }

    /// Sustainable range for a household size, applying the out-of-table policy.
    pub fn range_for(&self, people: u32) -> SustainableRange {
        if let Some(range) = self.ranges.get(&people) {
            return *range;
        }

        match self.config.out_of_table {
            OutOfTablePolicy::Fallback => {
                debug!(
                    "No range for {} people, falling back to size {}",
                    people, self.config.fallback_household_size
                );
                self.fallback
            }
            OutOfTablePolicy::Extrapolate => self.config.per_person.scaled(people.max(1)),
        }
    }

    /// Tabulated ranges in ascending household size.
    pub fn benchmark_table(&self) -> impl Iterator<Item = (u32, SustainableRange)> + '_ {
        self.ranges.iter().map(|(people, range)| (*people, *range))
    }
}

/// First matching tier wins; both bounds are inclusive.
fn classify(total: f64, range: &SustainableRange) -> StatusTier {
    if total <= range.max {
        StatusTier::WithinLimit
    } else if total <= range.max * NEAR_LIMIT_FACTOR {
        StatusTier::NearLimit
    } else {
        StatusTier::OverLimit
    }
}

/// Nearest whole liter, halves rounded up.
fn round_liters(value: f64) -> u64 {
    (value + 0.5).floor().max(0.0) as u64
}

/// One decimal place, halves rounded up.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{
        default_benchmarks, MAX_CAR_WASHES_PER_WEEK, MAX_FLUSHES_PER_PERSON_PER_DAY,
        MAX_LAUNDRY_LOADS_PER_WEEK, MAX_PEOPLE, MAX_SESSIONS_PER_DAY, MAX_SESSION_MINUTES,
    };

    fn make_engine() -> ConsumptionEngine {
        ConsumptionEngine::new(default_benchmarks()).unwrap()
    }

    /// Only laundry costs water: 25 L per load, so each weekly load adds 100 L/month.
    fn laundry_only_engine() -> ConsumptionEngine {
        ConsumptionEngine::new(BenchmarkConfig {
            out_of_table: OutOfTablePolicy::Fallback,
            fallback_household_size: 1,
            rates: ConsumptionRates {
                shower_per_minute: 0.0,
                per_flush: 0.0,
                per_laundry_load: 25.0,
                dishes_per_minute: 0.0,
                per_car_wash: 0.0,
            },
            per_person: SustainableRange {
                min: 400.0,
                max: 500.0,
            },
            ranges: vec![RangeEntry {
                people: 1,
                min: 400.0,
                max: 500.0,
            }],
        })
        .unwrap()
    }

    fn loads(count: u32) -> UsageInput {
        UsageInput {
            people: 1,
            laundry_loads_per_week: count,
            ..UsageInput::default()
        }
    }

    fn single_person(flushes: u32, laundry: u32, shower_minutes: u32) -> UsageInput {
        UsageInput {
            people: 1,
            shower_sessions_per_day: 1,
            shower_minutes_per_session: shower_minutes,
            flushes_per_person_per_day: flushes,
            laundry_loads_per_week: laundry,
            dish_wash_sessions_per_day: 0,
            dish_wash_minutes_per_session: 1,
            car_washes_per_week: 0,
        }
    }

    #[test]
    fn test_default_household_breakdown() {
        let engine = make_engine();
        let result = engine.calculate(&UsageInput::default());

        assert_eq!(result.breakdown.shower, 4500);
        assert_eq!(result.breakdown.flush, 3600);
        assert_eq!(result.breakdown.laundry, 1440);
        assert_eq!(result.breakdown.dishes, 10800);
        assert_eq!(result.breakdown.car_wash, 800);
        assert_eq!(result.total_liters, 21140);
    }

    #[test]
    fn test_default_household_benchmark() {
        let engine = make_engine();
        let result = engine.calculate(&UsageInput::default());

        assert_eq!(result.range.min, 18000.0);
        assert_eq!(result.range.max, 20400.0);
        assert_eq!(result.ideal_liters, 19200);
        // 21140 is above 20400 but below 24480
        assert_eq!(result.status, StatusTier::NearLimit);
        assert_eq!(result.deviation_percent, 10.1);
    }

    #[test]
    fn test_light_household_is_within_limit() {
        let engine = make_engine();
        let input = UsageInput {
            dish_wash_sessions_per_day: 1,
            dish_wash_minutes_per_session: 3,
            ..UsageInput::default()
        };
        // 4500 + 3600 + 1440 + 1080 + 800
        let result = engine.calculate(&input);
        assert_eq!(result.total_liters, 11420);
        assert_eq!(result.status, StatusTier::WithinLimit);
        assert_eq!(result.deviation_percent, -40.5);
    }

    #[test]
    fn test_exact_maximum_is_within_limit() {
        let engine = make_engine();
        // 1800 shower + 900 flush + 2400 laundry = 5100, the size-1 maximum
        let result = engine.calculate(&single_person(5, 5, 4));
        assert_eq!(result.total_liters, 5100);
        assert_eq!(result.status, StatusTier::WithinLimit);
    }

    #[test]
    fn test_exact_near_limit_bound_is_near_limit() {
        let engine = make_engine();
        // 4500 shower + 1620 flush = 6120 = 5100 * 1.2
        let result = engine.calculate(&single_person(9, 0, 10));
        assert_eq!(result.total_liters, 6120);
        assert_eq!(result.status, StatusTier::NearLimit);

        let result = engine.calculate(&single_person(10, 0, 10));
        assert_eq!(result.total_liters, 6300);
        assert_eq!(result.status, StatusTier::OverLimit);
    }

    #[test]
    fn test_tier_boundaries_with_injected_tables() {
        let engine = laundry_only_engine();

        assert_eq!(engine.calculate(&loads(4)).status, StatusTier::WithinLimit);
        assert_eq!(engine.calculate(&loads(5)).status, StatusTier::WithinLimit);
        assert_eq!(engine.calculate(&loads(6)).status, StatusTier::NearLimit);
        assert_eq!(engine.calculate(&loads(7)).status, StatusTier::OverLimit);
    }

    #[test]
    fn test_out_of_table_falls_back_to_size_six() {
        let engine = make_engine();
        let range = engine.range_for(11);
        assert_eq!(range.min, 27000.0);
        assert_eq!(range.max, 30600.0);

        let input = UsageInput {
            people: 11,
            ..UsageInput::default()
        };
        assert_eq!(engine.calculate(&input).ideal_liters, 28800);
    }

    #[test]
    fn test_extrapolate_policy_scales_per_person_band() {
        let mut config = default_benchmarks();
        config.out_of_table = OutOfTablePolicy::Extrapolate;
        let engine = ConsumptionEngine::new(config).unwrap();

        let range = engine.range_for(12);
        assert_eq!(range.min, 54000.0);
        assert_eq!(range.max, 61200.0);

        // Tabulated sizes are unaffected by the policy
        assert_eq!(engine.range_for(4).max, 20400.0);
    }

    #[test]
    fn test_ranges_monotonic_for_table_sizes() {
        let engine = make_engine();
        let mut previous: Option<SustainableRange> = None;
        for people in 1..=10 {
            let range = engine.range_for(people);
            assert!(range.min < range.max, "min < max for {} people", people);
            if let Some(prev) = previous {
                assert!(range.min > prev.min && range.max > prev.max);
            }
            previous = Some(range);
        }
    }

    #[test]
    fn test_unrounded_breakdown_sums_to_total() {
        let mut config = default_benchmarks();
        config.rates = ConsumptionRates {
            shower_per_minute: 9.37,
            per_flush: 6.15,
            per_laundry_load: 113.3,
            dishes_per_minute: 11.71,
            per_car_wash: 187.45,
        };
        let engine = ConsumptionEngine::new(config).unwrap();
        let input = UsageInput {
            people: 3,
            shower_sessions_per_day: 3,
            shower_minutes_per_session: 7,
            flushes_per_person_per_day: 6,
            laundry_loads_per_week: 5,
            dish_wash_sessions_per_day: 2,
            dish_wash_minutes_per_session: 9,
            car_washes_per_week: 1,
        };

        let liters = engine.monthly_liters(&input);
        let sum = liters.shower + liters.flush + liters.laundry + liters.dishes + liters.car_wash;
        assert_eq!(liters.total(), sum);

        let result = engine.calculate(&input);
        let rounded_sum: u64 = result.breakdown.iter().map(|(_, l)| l).sum();
        let drift = rounded_sum.abs_diff(result.total_liters);
        assert!(drift <= 5, "Rounded breakdown drifted by {}", drift);
    }

    #[test]
    fn test_calculate_is_deterministic() {
        let engine = make_engine();
        let input = single_person(5, 5, 4);
        let first = engine.calculate(&input);
        for _ in 0..10 {
            assert_eq!(engine.calculate(&input), first);
        }
    }

    #[test]
    fn test_engine_shared_across_threads() {
        let engine = make_engine();
        let expected = engine.calculate(&UsageInput::default());

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| engine.calculate(&UsageInput::default())))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_evaluate_rejects_invalid_input() {
        let engine = make_engine();
        let input = UsageInput {
            shower_minutes_per_session: 61,
            ..UsageInput::default()
        };
        let errors = engine.evaluate(&input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].field.as_deref(),
            Some("shower_minutes_per_session")
        );
    }

    #[test]
    fn test_evaluate_accepts_valid_input() {
        let engine = make_engine();
        let result = engine.evaluate(&UsageInput::default()).unwrap();
        assert_eq!(result.total_liters, 21140);
    }

    #[test]
    fn test_evaluate_rejects_counts_that_would_overflow() {
        let engine = make_engine();
        let input = UsageInput {
            people: u32::MAX,
            flushes_per_person_per_day: u32::MAX,
            ..UsageInput::default()
        };
        let errors = engine.evaluate(&input).unwrap_err();
        let fields: Vec<_> = errors.iter().filter_map(|e| e.field.as_deref()).collect();
        assert_eq!(fields, vec!["people", "flushes_per_person_per_day"]);
    }

    #[test]
    fn test_largest_accepted_input_stays_finite() {
        let engine = make_engine();
        let input = UsageInput {
            people: MAX_PEOPLE,
            shower_sessions_per_day: MAX_SESSIONS_PER_DAY,
            shower_minutes_per_session: MAX_SESSION_MINUTES,
            flushes_per_person_per_day: MAX_FLUSHES_PER_PERSON_PER_DAY,
            laundry_loads_per_week: MAX_LAUNDRY_LOADS_PER_WEEK,
            dish_wash_sessions_per_day: MAX_SESSIONS_PER_DAY,
            dish_wash_minutes_per_session: MAX_SESSION_MINUTES,
            car_washes_per_week: MAX_CAR_WASHES_PER_WEEK,
        };
        let result = engine.evaluate(&input).unwrap();
        let sum: u64 = result.breakdown.iter().map(|(_, liters)| liters).sum();

        // 100 people x 50 flushes x 6 L x 30 days
        assert_eq!(result.breakdown.flush, 900_000);
        assert!(sum < u64::MAX / 2);
        assert_eq!(result.status, StatusTier::OverLimit);
    }

    #[test]
    fn test_new_rejects_unchecked_config() {
        let mut config = default_benchmarks();
        config.fallback_household_size = 42;
        assert!(ConsumptionEngine::new(config).is_err());
    }

    #[test]
    fn test_benchmark_table_is_ascending() {
        let engine = make_engine();
        let sizes: Vec<u32> = engine.benchmark_table().map(|(people, _)| people).collect();
        assert_eq!(sizes, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_rounding_halves_up() {
        assert_eq!(round_liters(2.5), 3);
        assert_eq!(round_liters(2.49), 2);
        assert_eq!(round_one_decimal(-40.25), -40.2);
        assert_eq!(round_one_decimal(10.104), 10.1);
    }
}
