//! Gaussian monthly growth multipliers

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::MULTIPLIER_FLOOR;
use crate::error::{ForecastError, Result};

/// Draws monthly multipliers from N(1 + mean_monthly_rate, std_dev),
/// floored at [`MULTIPLIER_FLOOR`]
///
/// The floor biases the expected multiplier upward relative to an unclamped
/// normal model.
#[derive(Debug, Clone, Copy)]
pub struct RateSampler {
    normal: Normal<f64>,
}

impl RateSampler {
    pub fn new(mean_monthly_rate: f64, std_dev: f64) -> Result<Self> {
        if !mean_monthly_rate.is_finite() {
            return Err(ForecastError::invalid(
                "mean_monthly_rate",
                "must be a finite number",
            ));
        }
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(ForecastError::invalid(
                "std_dev",
                format!("must be finite and non-negative, got {std_dev}"),
            ));
        }
        let normal = Normal::new(1.0 + mean_monthly_rate, std_dev)
            .map_err(|e| ForecastError::invalid("std_dev", e.to_string()))?;
        Ok(Self { normal })
    }

    /// Mean of the unclamped multiplier distribution
    pub fn mean_multiplier(&self) -> f64 {
        self.normal.mean()
    }

    /// Draw a single floored multiplier
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.normal.sample(rng).max(MULTIPLIER_FLOOR)
    }

    /// Draw `count` independent floored multipliers
    pub fn sample_monthly_multipliers<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.sample(rng)).collect()
    }
}

/// Convenience wrapper: build a [`RateSampler`] and draw `count` multipliers
pub fn sample_monthly_multipliers<R: Rng + ?Sized>(
    rng: &mut R,
    mean_monthly_rate: f64,
    std_dev: f64,
    count: usize,
) -> Result<Vec<f64>> {
    let sampler = RateSampler::new(mean_monthly_rate, std_dev)?;
    debug!(
        "sampling {count} multipliers around {:.6} (std dev {std_dev})",
        sampler.mean_multiplier()
    );
    Ok(sampler.sample_monthly_multipliers(rng, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_when_count_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let draws = sample_monthly_multipliers(&mut rng, 0.005, 0.02, 0).unwrap();
        assert!(draws.is_empty());
    }

    #[test]
    fn test_zero_std_dev_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let draws = sample_monthly_multipliers(&mut rng, 0.005, 0.0, 12).unwrap();
        assert_eq!(draws.len(), 12);
        assert!(draws.iter().all(|&m| m == 1.005));
    }

    #[test]
    fn test_zero_std_dev_negative_rate_clamps_to_floor() {
        let mut rng = StdRng::seed_from_u64(1);
        let draws = sample_monthly_multipliers(&mut rng, -0.01, 0.0, 6).unwrap();
        assert!(draws.iter().all(|&m| m == MULTIPLIER_FLOOR));
    }

    #[test]
    fn test_large_std_dev_never_below_floor() {
        let mut rng = StdRng::seed_from_u64(42);
        let draws = sample_monthly_multipliers(&mut rng, 0.0, 0.5, 10_000).unwrap();
        assert_eq!(draws.len(), 10_000);
        assert!(draws.iter().all(|&m| m >= MULTIPLIER_FLOOR));
        // Roughly half the draws fall below 1.0 before the floor applies
        let floored = draws.iter().filter(|&&m| m == MULTIPLIER_FLOOR).count();
        assert!(floored > 4_000 && floored < 6_000);
    }

    #[test]
    fn test_seeded_reproducibility() {
        let a = sample_monthly_multipliers(&mut StdRng::seed_from_u64(9), 0.004, 0.01, 24).unwrap();
        let b = sample_monthly_multipliers(&mut StdRng::seed_from_u64(9), 0.004, 0.01, 24).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_negative_std_dev() {
        assert!(matches!(
            RateSampler::new(0.005, -0.1),
            Err(ForecastError::InvalidInput { .. })
        ));
        assert!(RateSampler::new(0.005, f64::INFINITY).is_err());
    }
}
