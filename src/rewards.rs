//! Fixed-rate conversion of reward points to cash

use serde::{Deserialize, Serialize};

/// Loyalty programs with a known cash value per point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardProgram {
    /// Chase Ultimate Rewards
    UltimateRewards,
    /// Amex Membership Rewards
    MembershipRewards,
    /// Hilton Honors
    HiltonHonors,
    /// Citi ThankYou Points
    ThankYouPoints,
}

impl RewardProgram {
    /// Cash value of one point, in cents
    pub fn cents_per_point(&self) -> f64 {
        match self {
            RewardProgram::UltimateRewards => 1.6,
            RewardProgram::MembershipRewards => 1.6,
            RewardProgram::HiltonHonors => 0.4,
            RewardProgram::ThankYouPoints => 1.6,
        }
    }

    /// Cash equivalent of `points`, in cents
    pub fn cash_value(&self, points: f64) -> f64 {
        points * self.cents_per_point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cash_values() {
        assert_relative_eq!(RewardProgram::UltimateRewards.cash_value(10_000.0), 16_000.0);
        assert_relative_eq!(RewardProgram::MembershipRewards.cash_value(500.0), 800.0);
        assert_relative_eq!(RewardProgram::HiltonHonors.cash_value(10_000.0), 4_000.0);
        assert_relative_eq!(RewardProgram::ThankYouPoints.cash_value(0.0), 0.0);
    }
}
