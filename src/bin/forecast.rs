//! Command line front end for balance forecasting
//!
//! Examples:
//!   forecast deterministic --balance 10000 --rate 0.05 --months 12 --csv schedule.csv
//!   forecast monte-carlo --balance 10000 --rate 0.06 --std-dev 0.01 --months 12 --runs 5000
//!   forecast interval 101.5 99.2 100.7 --confidence 0.9
//!   forecast add-months 2024-01-31 1

use std::path::PathBuf;
use std::time::Instant;

use account_forecast::forecast::{
    confidence_interval, deterministic_forecast, deterministic_schedule, MonteCarloConfig,
    MonteCarloForecaster, ProjectionHorizon, RateParameters,
};
use account_forecast::add_months;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "forecast", about = "Project account balances forward")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fixed-rate compounding with no uncertainty
    Deterministic {
        #[arg(long)]
        balance: f64,
        /// Annual interest rate (0.05 = 5%)
        #[arg(long)]
        rate: f64,
        /// Annual percentage fee
        #[arg(long, default_value_t = 0.0)]
        fee: f64,
        #[arg(long)]
        months: u32,
        /// Start date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Write the month-by-month schedule to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Gaussian multipliers aggregated over many paths
    MonteCarlo {
        #[arg(long)]
        balance: f64,
        /// Mean annual interest rate
        #[arg(long)]
        rate: f64,
        #[arg(long, default_value_t = 0.0)]
        fee: f64,
        /// Standard deviation of the monthly multiplier
        #[arg(long, default_value_t = 0.0)]
        std_dev: f64,
        #[arg(long)]
        months: u32,
        #[arg(long)]
        start: Option<NaiveDate>,
        /// JSON file with Monte Carlo settings; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        runs: Option<usize>,
        #[arg(long)]
        confidence: Option<f64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Simulate paths on a single thread
        #[arg(long)]
        sequential: bool,
    },
    /// Student's t interval around the mean of the given samples
    Interval {
        #[arg(required = true, allow_negative_numbers = true)]
        samples: Vec<f64>,
        #[arg(long, default_value_t = 0.95)]
        confidence: f64,
    },
    /// Add a (possibly negative) number of months to a date
    AddMonths {
        date: NaiveDate,
        #[arg(allow_negative_numbers = true)]
        months: i32,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let today = Local::now().date_naive();

    match cli.command {
        Command::Deterministic { balance, rate, fee, months, start, csv } => {
            let start = start.unwrap_or(today);
            let (value, date) = deterministic_forecast(balance, rate, fee, months, start);
            println!("You have {balance:.2} as of {start}");
            println!("You will have {value:.2} as of {date}");

            if let Some(path) = csv {
                let mut writer = csv::Writer::from_path(&path)
                    .with_context(|| format!("creating {}", path.display()))?;
                for row in deterministic_schedule(balance, rate, fee, months, start) {
                    writer.serialize(row)?;
                }
                writer.flush()?;
                println!("Schedule written to {}", path.display());
            }
        }
        Command::MonteCarlo {
            balance,
            rate,
            fee,
            std_dev,
            months,
            start,
            config,
            runs,
            confidence,
            seed,
            sequential,
        } => {
            let mut mc_config = match config {
                Some(path) => MonteCarloConfig::from_json_file(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => MonteCarloConfig::default(),
            };
            if let Some(runs) = runs {
                mc_config.num_runs = runs;
            }
            if let Some(confidence) = confidence {
                mc_config.confidence = confidence;
            }
            if seed.is_some() {
                mc_config.seed = seed;
            }
            if sequential {
                mc_config.parallel = false;
            }

            let start = start.unwrap_or(today);
            let runs = mc_config.num_runs;
            let timer = Instant::now();
            let result = MonteCarloForecaster::new(mc_config)
                .forecast(
                    balance,
                    &RateParameters::new(rate, fee, std_dev),
                    &ProjectionHorizon::new(months, start),
                )
                .context("Monte Carlo forecast failed")?;

            println!("Ran {runs} paths in {:?}", timer.elapsed());
            println!(
                "You will have on average {:.2} as of {}, interval [{:.2}, {:.2}] (±{:.2})",
                result.point_estimate,
                result.target_date,
                result.lower_bound,
                result.upper_bound,
                result.half_width()
            );
        }
        Command::Interval { samples, confidence } => {
            let ci = confidence_interval(&samples, confidence)?;
            println!("mean {:.4}, interval [{:.4}, {:.4}]", ci.mean, ci.lower, ci.upper);
        }
        Command::AddMonths { date, months } => {
            println!("{}", add_months(date, months));
        }
    }

    Ok(())
}
