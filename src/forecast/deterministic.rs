//! Closed-form compounding at a fixed monthly rate

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{ForecastResult, ProjectionHorizon, RateParameters};
use crate::round_cents;

/// Monthly multiplier `rate/12 + 1 - fee/12`
///
/// Fee is treated additively, not compounded separately.
pub fn monthly_multiplier(annual_interest_rate: f64, annual_pct_fee: f64) -> f64 {
    RateParameters::new(annual_interest_rate, annual_pct_fee, 0.0).deterministic_multiplier()
}

/// Project `balance` forward `months` months at a fixed rate
///
/// Returns the rounded balance and the target date. A zero-month horizon
/// returns the rounded input balance and `start` regardless of the multiplier,
/// including zero or negative multipliers from extreme rate/fee inputs.
pub fn deterministic_forecast(
    balance: f64,
    annual_interest_rate: f64,
    annual_pct_fee: f64,
    months: u32,
    start: NaiveDate,
) -> (f64, NaiveDate) {
    let horizon = ProjectionHorizon::new(months, start);
    let multiplier = monthly_multiplier(annual_interest_rate, annual_pct_fee);
    debug!("deterministic forecast: balance={balance}, multiplier={multiplier:.6}, months={months}");

    if months == 0 {
        return (round_cents(balance), start);
    }
    if multiplier <= 0.0 {
        warn!("non-positive monthly multiplier {multiplier} (rate={annual_interest_rate}, fee={annual_pct_fee})");
    }

    let projected = balance * multiplier.powf(f64::from(months));
    (round_cents(projected), horizon.target_date())
}

/// One month of a deterministic projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub date: NaiveDate,
    pub balance: f64,
}

/// Month-by-month balances for months `1..=months`
///
/// The final row matches [`deterministic_forecast`] for the same inputs.
pub fn deterministic_schedule(
    balance: f64,
    annual_interest_rate: f64,
    annual_pct_fee: f64,
    months: u32,
    start: NaiveDate,
) -> Vec<ScheduleRow> {
    (1..=months)
        .map(|month| {
            let (balance, date) =
                deterministic_forecast(balance, annual_interest_rate, annual_pct_fee, month, start);
            ScheduleRow { month, date, balance }
        })
        .collect()
}

/// Deterministic forecaster bound to a set of rate parameters
#[derive(Debug, Clone, Copy)]
pub struct DeterministicForecaster {
    params: RateParameters,
}

impl DeterministicForecaster {
    pub fn new(params: RateParameters) -> Self {
        Self { params }
    }

    /// Forecast with zero-width bounds
    pub fn forecast(&self, balance: f64, horizon: &ProjectionHorizon) -> ForecastResult {
        let (value, date) = deterministic_forecast(
            balance,
            self.params.annual_interest_rate,
            self.params.annual_pct_fee,
            horizon.months,
            horizon.start_date,
        );
        ForecastResult::exact(value, date)
    }
}
