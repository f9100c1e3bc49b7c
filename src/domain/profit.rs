//! Profit and loss rules for a settled bet.
//!
//! Results are per unit of stake. A non-runner voids the bet whichever side
//! it was on.

use super::bet::BetSide;

/// Finishing position meaning the runner won.
pub const WINNER: u32 = 1;

/// Signed per-unit result of a bet.
#[must_use]
pub fn profit_or_loss(side: BetSide, non_runner: bool, outcome: u32, price: f64) -> f64 {
    if non_runner {
        return 0.0;
    }
    let won = outcome == WINNER;
    match (side, won) {
        (BetSide::Back, true) => price - 1.0,
        (BetSide::Back, false) => -1.0,
        (BetSide::Lay, true) => -(price - 1.0),
        (BetSide::Lay, false) => 1.0,
    }
}
