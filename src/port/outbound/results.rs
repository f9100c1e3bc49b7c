//! Race results feed port.

use async_trait::async_trait;

use crate::domain::MarketId;
use crate::error::Error;

/// Source of published results for settled markets.
#[async_trait]
pub trait ResultsFeed: Send + Sync {
    /// The raw winners line for a market, e.g. `"Winner(s): Foo, Bar"`.
    async fn winners_text(&self, sport_id: u32, market_id: MarketId) -> Result<String, Error>;
}
