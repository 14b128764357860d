//! Interest-bearing bank account with forecasting entry points

use chrono::NaiveDate;
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Account, Alerts, Ledger};
use crate::error::Result;
use crate::forecast::{
    deterministic_forecast, gaussian_forecast, ForecastResult, MonteCarloConfig,
    MonteCarloForecaster, ProjectionHorizon, RateParameters,
};
use crate::round_cents;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    account: Account,
    /// Annual interest rate (0.05 = 5%)
    pub interest_rate: f64,
    /// Flat monthly fee; informational, not part of forecasts
    pub monthly_fee: f64,
    /// Annual percentage fee (0.01 = 1%)
    pub annual_pct_fee: f64,
    /// Minimum balance the account must keep
    pub min_amount: f64,
    alerts: Alerts,
}

impl BankAccount {
    pub fn new(name: impl Into<String>, balance: f64) -> Result<Self> {
        Ok(Self {
            account: Account::new(name, balance)?,
            interest_rate: 0.0,
            monthly_fee: 0.0,
            annual_pct_fee: 0.0,
            min_amount: 0.0,
            alerts: Alerts::new(),
        })
    }

    pub fn with_interest_rate(mut self, rate: f64) -> Self {
        self.interest_rate = rate;
        self
    }

    pub fn with_annual_pct_fee(mut self, fee: f64) -> Self {
        self.annual_pct_fee = fee;
        self
    }

    pub fn with_monthly_fee(mut self, fee: f64) -> Self {
        self.monthly_fee = fee;
        self
    }

    pub fn with_min_amount(mut self, min_amount: f64) -> Self {
        self.min_amount = min_amount;
        self
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn account_mut(&mut self) -> &mut Account {
        &mut self.account
    }

    /// Balance that can be moved without breaching the minimum
    pub fn allocable_amount(&self) -> f64 {
        round_cents(self.account.balance() - self.min_amount)
    }

    pub fn add_alert(&mut self, date: NaiveDate, message: impl Into<String>) {
        self.alerts.insert(date, message.into());
    }

    pub fn alerts(&self) -> &Alerts {
        &self.alerts
    }

    pub fn remove_alert(&mut self, date: NaiveDate) -> Option<String> {
        self.alerts.remove(&date)
    }

    /// Rate inputs for a forecast; a missing or zero override uses the stored rate
    pub fn rate_parameters(&self, rate_override: Option<f64>, volatility: f64) -> RateParameters {
        let rate = match rate_override {
            Some(rate) if rate != 0.0 => rate,
            _ => self.interest_rate,
        };
        RateParameters::new(rate, self.annual_pct_fee, volatility)
    }

    /// Deterministic projection of the current balance from `today`
    pub fn forecast(&self, rate_override: Option<f64>, months: u32, today: NaiveDate) -> (f64, NaiveDate) {
        let params = self.rate_parameters(rate_override, 0.0);
        let (value, date) = deterministic_forecast(
            self.account.balance(),
            params.annual_interest_rate,
            params.annual_pct_fee,
            months,
            today,
        );
        info!(
            "{}: {} as of {today} projects to {value} as of {date}",
            self.account.name(),
            self.account.balance()
        );
        (value, date)
    }

    /// One stochastic projection of the current balance
    pub fn forecast_gaussian<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        rate_override: Option<f64>,
        std_dev: f64,
        months: u32,
        today: NaiveDate,
    ) -> Result<(f64, NaiveDate)> {
        let params = self.rate_parameters(rate_override, std_dev);
        gaussian_forecast(
            rng,
            self.account.balance(),
            params.annual_interest_rate,
            params.annual_pct_fee,
            params.volatility,
            months,
            today,
        )
    }

    /// Monte Carlo projection of the current balance
    pub fn forecast_monte_carlo(
        &self,
        rate_override: Option<f64>,
        std_dev: f64,
        months: u32,
        config: &MonteCarloConfig,
        today: NaiveDate,
    ) -> Result<ForecastResult> {
        let params = self.rate_parameters(rate_override, std_dev);
        MonteCarloForecaster::new(config.clone()).forecast(
            self.account.balance(),
            &params,
            &ProjectionHorizon::new(months, today),
        )
    }
}

impl Ledger for BankAccount {
    fn name(&self) -> &str {
        self.account.name()
    }

    fn balance(&self) -> f64 {
        self.account.balance()
    }

    fn deposit(&mut self, amount: f64) -> Result<f64> {
        self.account.deposit(amount)
    }

    fn withdraw(&mut self, amount: f64) -> Result<f64> {
        self.account.withdraw(amount)
    }
}
