//! Student's t confidence interval around a sample mean

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

use super::config::validate_confidence;
use crate::error::{ForecastError, Result, MIN_SAMPLES};
use crate::round_cents;

/// Sample mean with a two-sided interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn half_width(&self) -> f64 {
        self.upper - self.mean
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Round each field to cents independently
    pub fn rounded(&self) -> Self {
        Self {
            mean: round_cents(self.mean),
            lower: round_cents(self.lower),
            upper: round_cents(self.upper),
        }
    }
}

/// Compute `mean ± t * s / sqrt(n)` at the given two-tailed confidence level
///
/// `s` is the unbiased (n-1) sample standard deviation and `t` the Student's t
/// critical value with n-1 degrees of freedom. Needs at least 3 samples.
/// Identical samples yield a zero-width interval.
pub fn confidence_interval(samples: &[f64], confidence: f64) -> Result<ConfidenceInterval> {
    if samples.len() < MIN_SAMPLES {
        return Err(ForecastError::insufficient(samples.len()));
    }
    validate_confidence(confidence)?;
    if let Some(bad) = samples.iter().find(|s| !s.is_finite()) {
        return Err(ForecastError::invalid(
            "samples",
            format!("all samples must be finite, found {bad}"),
        ));
    }

    // Accumulated rounding in mean/std_dev would leave a sliver of width
    let first = samples[0];
    if samples.iter().all(|&s| s == first) {
        return Ok(ConfidenceInterval { mean: first, lower: first, upper: first });
    }

    let n = samples.len() as f64;
    let mean = samples.iter().mean();
    let std_dev = samples.iter().std_dev();

    let t = StudentsT::new(0.0, 1.0, n - 1.0)
        .map_err(|e| ForecastError::invalid("samples", e.to_string()))?;
    let critical = t.inverse_cdf((1.0 + confidence) / 2.0);
    let half_width = std_dev / n.sqrt() * critical;

    Ok(ConfidenceInterval {
        mean,
        lower: mean - half_width,
        upper: mean + half_width,
    })
}
