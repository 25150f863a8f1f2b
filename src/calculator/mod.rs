//! Household water consumption calculator.
//!
//! This module turns a household's usage habits into a monthly consumption
//! estimate and classifies it against a sustainability benchmark for the
//! household's size.
//!
//! # Architecture
//!
//! - **Benchmarks**: Rates and sustainable ranges loaded from TOML (or embedded defaults)
//! - **Validation**: Domain bounds checked up front, all problems reported at once
//! - **Calculation**: Usage input -> per-activity breakdown, total, deviation and status tier
//!
//! # Example
//!
//! ```
//! use hidrica::calculator::{default_benchmarks, ConsumptionEngine, StatusTier, UsageInput};
//!
//! let engine = ConsumptionEngine::new(default_benchmarks()).unwrap();
//!
//! let result = engine.evaluate(&UsageInput::default()).unwrap();
//!
//! assert_eq!(result.total_liters, 21140);
//! assert_eq!(result.ideal_liters, 19200);
//! assert_eq!(result.status, StatusTier::NearLimit);
//!
//! for (activity, liters) in result.breakdown.iter() {
//!     println!("{}: {} L", activity.name(), liters);
//! }
//! ```

mod benchmarks;
mod engine;
mod types;
mod validation;

pub use benchmarks::{
    default_benchmarks, load_benchmarks, parse_benchmarks, resolve_benchmarks,
    user_benchmarks_path,
};
pub use engine::{ConsumptionEngine, DAYS_PER_MONTH, NEAR_LIMIT_FACTOR, WEEKS_PER_MONTH};
pub use types::*;
pub use validation::{
    validate, ValidationError, MAX_CAR_WASHES_PER_WEEK, MAX_FLUSHES_PER_PERSON_PER_DAY,
    MAX_LAUNDRY_LOADS_PER_WEEK, MAX_PEOPLE, MAX_SESSIONS_PER_DAY, MAX_SESSION_MINUTES,
    MIN_SESSION_MINUTES,
};
