//! Single-path compounding

use crate::round_cents;

/// Compound `starting_balance` through `multipliers` in order and round the
/// terminal balance to cents
pub fn simulate(starting_balance: f64, multipliers: &[f64]) -> f64 {
    let terminal = multipliers
        .iter()
        .fold(starting_balance, |balance, multiplier| balance * multiplier);
    round_cents(terminal)
}
