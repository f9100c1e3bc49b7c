//! Exchange-agnostic domain types.

pub mod bet;
pub mod id;
pub mod price;
pub mod profit;

pub use bet::{Bet, BetSide, BetStatus};
pub use id::{BetId, EventId, MarketId, SelectionId};
pub use price::{PriceLevel, RunnerPrices};
pub use profit::profit_or_loss;
