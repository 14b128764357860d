//! Balance forecasting engine: deterministic compounding, single stochastic
//! paths, and Monte Carlo aggregation with a Student's t confidence interval

mod config;
mod confidence;
mod deterministic;
mod monte_carlo;
mod path;
mod sampler;

pub use config::{ForecastResult, MonteCarloConfig, ProjectionHorizon, RateParameters};
pub use confidence::{confidence_interval, ConfidenceInterval};
pub use deterministic::{
    deterministic_forecast, deterministic_schedule, monthly_multiplier, DeterministicForecaster,
    ScheduleRow,
};
pub use monte_carlo::{gaussian_forecast, monte_carlo_forecast, MonteCarloForecaster};
pub use path::simulate;
pub use sampler::{sample_monthly_multipliers, RateSampler};

// ============================================================================
// Defaults
// ============================================================================
// Monthly multipliers are floored at 1.0: the stochastic component may add
// growth but never drives a month below flat.

/// Lowest monthly multiplier a sampled month may produce
pub const MULTIPLIER_FLOOR: f64 = 1.0;

/// Default two-tailed confidence level for Monte Carlo intervals
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Default number of Monte Carlo paths
pub const DEFAULT_NUM_RUNS: usize = 1000;
