//! Monte Carlo balance forecasting
//!
//! Each path draws `months` floored Gaussian multipliers and compounds the
//! starting balance through them. Terminal balances across paths feed a
//! Student's t interval around their mean.

use chrono::NaiveDate;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::config::validate_balance;
use super::{
    confidence_interval, simulate, ForecastResult, MonteCarloConfig, ProjectionHorizon,
    RateParameters, RateSampler, MULTIPLIER_FLOOR,
};
use crate::error::Result;

/// Runs many stochastic paths and summarises their terminal balances
#[derive(Debug, Clone, Default)]
pub struct MonteCarloForecaster {
    config: MonteCarloConfig,
}

impl MonteCarloForecaster {
    pub fn new(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Terminal balance of every simulated path, in path order
    ///
    /// Each path owns an RNG seeded from a per-path seed drawn up front from
    /// the master RNG, so parallel and sequential runs agree for a given seed.
    pub fn simulate_paths(
        &self,
        balance: f64,
        params: &RateParameters,
        months: u32,
    ) -> Result<Vec<f64>> {
        validate_balance(balance)?;
        self.config.validate()?;
        params.validate()?;

        let sampler = RateSampler::new(params.stochastic_mean_monthly_rate(), params.volatility)?;
        if sampler.mean_multiplier() < MULTIPLIER_FLOOR {
            warn!(
                "mean monthly multiplier {:.6} is below the floor; most draws will be clamped to {MULTIPLIER_FLOOR}",
                sampler.mean_multiplier()
            );
        }

        let mut master = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let seeds: Vec<u64> = (0..self.config.num_runs).map(|_| master.gen()).collect();

        let months = months as usize;
        let run_path = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            simulate(balance, &sampler.sample_monthly_multipliers(&mut rng, months))
        };

        debug!(
            "simulating {} paths over {months} months (parallel: {})",
            self.config.num_runs, self.config.parallel
        );
        let terminals: Vec<f64> = if self.config.parallel {
            seeds.par_iter().map(|&seed| run_path(seed)).collect()
        } else {
            seeds.iter().map(|&seed| run_path(seed)).collect()
        };
        Ok(terminals)
    }

    /// Mean terminal balance with its confidence interval, each rounded to cents
    pub fn forecast(
        &self,
        balance: f64,
        params: &RateParameters,
        horizon: &ProjectionHorizon,
    ) -> Result<ForecastResult> {
        let terminals = self.simulate_paths(balance, params, horizon.months)?;
        let interval = confidence_interval(&terminals, self.config.confidence)?.rounded();
        let target_date = horizon.target_date();

        info!(
            "Monte Carlo ({} runs): {:.2} by {target_date}, interval [{:.2}, {:.2}]",
            self.config.num_runs, interval.mean, interval.lower, interval.upper
        );

        Ok(ForecastResult {
            point_estimate: interval.mean,
            lower_bound: interval.lower,
            upper_bound: interval.upper,
            target_date,
        })
    }
}

/// Monte Carlo forecast from plain arguments, entropy-seeded and parallel
#[allow(clippy::too_many_arguments)]
pub fn monte_carlo_forecast(
    balance: f64,
    mean_annual_rate: f64,
    annual_pct_fee: f64,
    monthly_std_dev: f64,
    months: u32,
    num_runs: usize,
    confidence: f64,
    start: NaiveDate,
) -> Result<ForecastResult> {
    let forecaster = MonteCarloForecaster::new(MonteCarloConfig {
        num_runs,
        confidence,
        ..Default::default()
    });
    forecaster.forecast(
        balance,
        &RateParameters::new(mean_annual_rate, annual_pct_fee, monthly_std_dev),
        &ProjectionHorizon::new(months, start),
    )
}

/// One stochastic path with its target date
///
/// The fee is subtracted from the annual rate once before the monthly
/// conversion, matching the Monte Carlo forecaster.
pub fn gaussian_forecast<R: Rng + ?Sized>(
    rng: &mut R,
    balance: f64,
    mean_annual_rate: f64,
    annual_pct_fee: f64,
    monthly_std_dev: f64,
    months: u32,
    start: NaiveDate,
) -> Result<(f64, NaiveDate)> {
    validate_balance(balance)?;
    let params = RateParameters::new(mean_annual_rate, annual_pct_fee, monthly_std_dev);
    params.validate()?;

    let sampler = RateSampler::new(params.stochastic_mean_monthly_rate(), params.volatility)?;
    let multipliers = sampler.sample_monthly_multipliers(rng, months as usize);
    let horizon = ProjectionHorizon::new(months, start);

    Ok((simulate(balance, &multipliers), horizon.target_date()))
}
