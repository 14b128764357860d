//! Account Forecast
//!
//! Personal account bookkeeping (bank accounts, gift cards, credit cards) and
//! forward projection of a single balance under interest, fees, and Gaussian
//! monthly uncertainty.

pub mod account;
pub mod calendar;
pub mod error;
pub mod forecast;
pub mod prices;
pub mod rewards;

pub use account::{transfer, Account, BankAccount, CreditCard, GiftCard, Ledger};
pub use calendar::add_months;
pub use error::{ForecastError, Result};
pub use forecast::{
    confidence_interval, deterministic_forecast, monte_carlo_forecast, ConfidenceInterval,
    ForecastResult, MonteCarloConfig, MonteCarloForecaster,
};

/// Round a monetary amount to 2 fractional digits (half away from zero)
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
