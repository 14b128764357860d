//! Forecast inputs, outputs, and Monte Carlo configuration

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DEFAULT_CONFIDENCE, DEFAULT_NUM_RUNS};
use crate::calendar::add_months;
use crate::error::{ForecastError, Result, MIN_SAMPLES};

/// Rate inputs for one forecast call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateParameters {
    /// Annual interest rate (0.05 = 5%)
    pub annual_interest_rate: f64,

    /// Annual percentage fee (0.01 = 1%)
    #[serde(default)]
    pub annual_pct_fee: f64,

    /// Standard deviation of the monthly multiplier
    #[serde(default)]
    pub volatility: f64,
}

impl RateParameters {
    pub fn new(annual_interest_rate: f64, annual_pct_fee: f64, volatility: f64) -> Self {
        Self {
            annual_interest_rate,
            annual_pct_fee,
            volatility,
        }
    }

    /// Monthly multiplier used by the deterministic forecaster:
    /// `rate/12 + 1 - fee/12`
    pub fn deterministic_multiplier(&self) -> f64 {
        self.annual_interest_rate / 12.0 + 1.0 - self.annual_pct_fee / 12.0
    }

    /// Mean monthly rate fed to the sampler: `(rate - fee)/12`
    ///
    /// The fee comes off the annual rate before the monthly conversion here,
    /// unlike [`deterministic_multiplier`](Self::deterministic_multiplier).
    /// The two formulations are kept distinct.
    pub fn stochastic_mean_monthly_rate(&self) -> f64 {
        (self.annual_interest_rate - self.annual_pct_fee) / 12.0
    }

    pub fn validate(&self) -> Result<()> {
        if !self.annual_interest_rate.is_finite() {
            return Err(ForecastError::invalid(
                "annual_interest_rate",
                "must be a finite number",
            ));
        }
        if !self.annual_pct_fee.is_finite() {
            return Err(ForecastError::invalid(
                "annual_pct_fee",
                "must be a finite number",
            ));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(ForecastError::invalid(
                "volatility",
                format!("must be finite and non-negative, got {}", self.volatility),
            ));
        }
        Ok(())
    }
}

/// How far forward to project, and from when
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionHorizon {
    pub months: u32,
    pub start_date: NaiveDate,
}

impl ProjectionHorizon {
    pub fn new(months: u32, start_date: NaiveDate) -> Self {
        Self { months, start_date }
    }

    /// Calendar date the projection lands on
    pub fn target_date(&self) -> NaiveDate {
        add_months(self.start_date, i32::try_from(self.months).unwrap_or(i32::MAX))
    }
}

/// Projected balance with its interval and target date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub target_date: NaiveDate,
}

impl ForecastResult {
    /// A result with no uncertainty: both bounds equal the point estimate
    pub fn exact(point_estimate: f64, target_date: NaiveDate) -> Self {
        Self {
            point_estimate,
            lower_bound: point_estimate,
            upper_bound: point_estimate,
            target_date,
        }
    }

    /// Distance from the point estimate to the upper bound
    pub fn half_width(&self) -> f64 {
        self.upper_bound - self.point_estimate
    }
}

/// Monte Carlo run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of simulated paths (at least 3)
    #[serde(default = "default_num_runs")]
    pub num_runs: usize,

    /// Two-tailed confidence level in (0, 1)
    #[serde(default = "default_confidence")]
    pub confidence: f64,

    /// Seed for reproducible runs; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Simulate paths on the rayon thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_num_runs() -> usize { DEFAULT_NUM_RUNS }
fn default_confidence() -> f64 { DEFAULT_CONFIDENCE }
fn default_parallel() -> bool { true }

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            num_runs: DEFAULT_NUM_RUNS,
            confidence: DEFAULT_CONFIDENCE,
            seed: None,
            parallel: true,
        }
    }
}

impl MonteCarloConfig {
    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_runs < MIN_SAMPLES {
            return Err(ForecastError::insufficient(self.num_runs));
        }
        validate_confidence(self.confidence)
    }
}

pub(crate) fn validate_confidence(confidence: f64) -> Result<()> {
    if confidence > 0.0 && confidence < 1.0 {
        Ok(())
    } else {
        Err(ForecastError::invalid(
            "confidence",
            format!("must lie strictly between 0 and 1, got {confidence}"),
        ))
    }
}

/// Starting balances must be finite and non-negative
pub(crate) fn validate_balance(balance: f64) -> Result<()> {
    if balance.is_finite() && balance >= 0.0 {
        Ok(())
    } else {
        Err(ForecastError::invalid(
            "balance",
            format!("must be finite and non-negative, got {balance}"),
        ))
    }
}
