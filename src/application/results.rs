//! Finishing positions from the published results feed.

use std::sync::Arc;

use tracing::debug;

use crate::domain::MarketId;
use crate::error::{Error, Result};
use crate::port::ResultsFeed;

const PREFIX_DELIMITER: char = ':';
const NAME_DELIMITER: char = ',';

/// Looks up winners and finishing positions for settled markets.
#[derive(Clone)]
pub struct ResultsLookup {
    feed: Arc<dyn ResultsFeed>,
}

impl ResultsLookup {
    pub fn new(feed: Arc<dyn ResultsFeed>) -> Self {
        Self { feed }
    }

    /// Placed runners in finishing order.
    pub async fn winners(&self, sport_id: u32, market_id: MarketId) -> Result<Vec<String>> {
        let text = self.feed.winners_text(sport_id, market_id).await?;
        let winners = parse_winners(&text)?;
        debug!(market_id = %market_id, count = winners.len(), "Parsed winners");
        Ok(winners)
    }

    /// 1-based finishing position of `runner`, or 0 if it did not place.
    pub async fn position(&self, sport_id: u32, market_id: MarketId, runner: &str) -> Result<u32> {
        let winners = self.winners(sport_id, market_id).await?;
        Ok(position_of(&winners, runner))
    }
}

/// Parse a `Winner(s): name, name, ...` line.
///
/// Exactly one `:` must separate the prefix from the names. Trailing empty
/// pieces are ignored, so `"Winner(s):"` has no names part and is rejected.
pub fn parse_winners(text: &str) -> Result<Vec<String>> {
    let parts = split_dropping_trailing_empty(text, PREFIX_DELIMITER);
    let [_, names] = parts.as_slice() else {
        return Err(Error::MalformedFeed {
            payload: text.to_string(),
        });
    };

    Ok(split_dropping_trailing_empty(names, NAME_DELIMITER)
        .into_iter()
        .map(|name| name.trim().to_string())
        .collect())
}

fn split_dropping_trailing_empty(text: &str, delimiter: char) -> Vec<&str> {
    let mut parts: Vec<&str> = text.split(delimiter).collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    parts
}

fn position_of(winners: &[String], runner: &str) -> u32 {
    winners
        .iter()
        .position(|name| name == runner)
        .map_or(0, |index| u32::try_from(index + 1).unwrap_or(u32::MAX))
}
