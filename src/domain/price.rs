//! Decoded market price state for a single runner.

use serde::Serialize;

use super::bet::BetSide;
use super::id::SelectionId;

/// One rung of a price ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceLevel {
    pub price: f64,
    pub amount_available: f64,
    pub side: BetSide,
    /// 1 is the best available price.
    pub depth: u32,
}

/// A runner's market state as decoded from the compressed price feed.
///
/// Both ladders are ordered best price first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunnerPrices {
    pub selection_id: SelectionId,
    pub sort_order: i32,
    pub total_amount_matched: f64,
    pub last_price_matched: f64,
    pub handicap: Option<f64>,
    pub reduction_factor: f64,
    pub vacant: Option<bool>,
    pub far_starting_price: Option<f64>,
    pub near_starting_price: Option<f64>,
    pub actual_starting_price: Option<f64>,
    pub best_to_back: Vec<PriceLevel>,
    pub best_to_lay: Vec<PriceLevel>,
}

impl RunnerPrices {
    #[must_use]
    pub fn best_back(&self) -> Option<&PriceLevel> {
        self.best_to_back.first()
    }

    #[must_use]
    pub fn best_lay(&self) -> Option<&PriceLevel> {
        self.best_to_lay.first()
    }
}
