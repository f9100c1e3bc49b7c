//! Horse racing on top of the exchange gateways.
//!
//! [`HorseRacing`] lists today's British and Irish race meetings, decodes
//! the runners and prices of each race, reports withdrawn runners and looks
//! up results. It logs in lazily with the configured account.

pub mod config;

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info};

use crate::adapter::outbound::betfair::codec::{decode_market_prices, removed_runner_names};
use crate::adapter::outbound::betfair::{ExchangeGateway, GlobalGateway};
use crate::adapter::outbound::results::HORSE_RACING_SPORT_ID;
use crate::application::results::ResultsLookup;
use crate::domain::{Bet, EventId, MarketId, RunnerPrices};
use crate::error::Result;
use crate::port::{EventSummary, MarketSummary, PlaceBetResult};

pub use config::{
    MarketVerdict, RacingConfig, RacingFilters, GB_HORSE_RACING_EVENT_ID,
    IRE_HORSE_RACING_EVENT_ID,
};

/// Decoded runners of each selected market of an event, in listing order.
pub type MarketsMap = Vec<(MarketSummary, Vec<RunnerPrices>)>;

/// Selected markets of each selected event.
pub type EventsMap = Vec<(EventSummary, MarketsMap)>;

pub struct HorseRacing {
    global: Arc<GlobalGateway>,
    exchange: Arc<ExchangeGateway>,
    results: ResultsLookup,
    sport_id: u32,
    event_ids: Vec<EventId>,
    filters: RacingFilters,
    mock_bets: bool,
    logged_in: AtomicBool,
}

impl HorseRacing {
    /// A facade over GB and IRE racing with no name filters and mock bets.
    pub fn new(
        global: Arc<GlobalGateway>,
        exchange: Arc<ExchangeGateway>,
        results: ResultsLookup,
    ) -> Self {
        Self {
            global,
            exchange,
            results,
            sport_id: HORSE_RACING_SPORT_ID,
            event_ids: vec![
                EventId::new(GB_HORSE_RACING_EVENT_ID),
                EventId::new(IRE_HORSE_RACING_EVENT_ID),
            ],
            filters: RacingFilters::default(),
            mock_bets: true,
            logged_in: AtomicBool::new(false),
        }
    }

    /// Apply event ids, name filters and the mock-bets switch from config.
    pub fn with_config(mut self, config: &RacingConfig) -> Result<Self> {
        self.event_ids = config.event_ids();
        self.filters = config.filters()?;
        self.mock_bets = config.mock_bets;
        Ok(self)
    }

    #[must_use]
    pub fn with_sport_id(mut self, sport_id: u32) -> Self {
        self.sport_id = sport_id;
        self
    }

    #[must_use]
    pub fn with_mock_bets(mut self, mock_bets: bool) -> Self {
        self.mock_bets = mock_bets;
        self
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::Acquire)
    }

    #[must_use]
    pub const fn mock_bets(&self) -> bool {
        self.mock_bets
    }

    #[must_use]
    pub const fn sport_id(&self) -> u32 {
        self.sport_id
    }

    pub async fn login(&self) -> Result<()> {
        if let Err(err) = self.global.login_with_credentials().await {
            error!(error = %err, "Failed to log in");
            return Err(err);
        }
        self.logged_in.store(true, Ordering::Release);
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        self.global.logout().await?;
        self.logged_in.store(false, Ordering::Release);
        Ok(())
    }

    async fn ensure_logged_in(&self) -> Result<()> {
        if self.is_logged_in() {
            return Ok(());
        }
        self.login().await
    }

    /// Child events of every configured parent that pass the event filter.
    pub async fn get_events(&self) -> Result<Vec<EventSummary>> {
        self.ensure_logged_in().await?;

        let mut events = Vec::new();
        for &parent_id in &self.event_ids {
            let listing = self.global.get_events(parent_id).await?;
            events.extend(
                listing
                    .events
                    .into_iter()
                    .filter(|event| self.filters.includes_event(&event.name)),
            );
        }
        Ok(events)
    }

    /// Decoded runners of a market, or `None` when the exchange could not be
    /// reached within the retry budget.
    pub async fn get_runners(&self, market_id: MarketId) -> Result<Option<Vec<RunnerPrices>>> {
        let compressed = match self.exchange.get_market_prices_compressed(market_id).await {
            Ok(compressed) => compressed,
            Err(err) if err.is_exceeded_retries() => {
                error!(market_id = %market_id, error = %err, "Failed to get runners");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        Ok(Some(decode_market_prices(&compressed)?))
    }

    /// Selected markets of `event` with their runners.
    ///
    /// With a `date`, only markets starting on that (UTC) day are kept.
    /// Markets whose prices could not be fetched are left out.
    pub async fn get_markets_for_event(
        &self,
        event: &EventSummary,
        date: Option<NaiveDate>,
    ) -> Result<MarketsMap> {
        self.ensure_logged_in().await?;

        let listing = self.global.get_events(event.event_id).await?;
        let mut markets = MarketsMap::new();

        for summary in listing.markets {
            let label = market_name_with_time(&summary);

            if let Some(date) = date {
                let start = summary.start_time.date_naive();
                if start != date {
                    info!(
                        event = %event.name,
                        market = %label,
                        start = %start.format("%d/%m/%Y"),
                        "Excluding market because of its start time"
                    );
                    continue;
                }
            }

            match self.filters.market_verdict(&summary.name) {
                MarketVerdict::Included(pattern) => {
                    info!(event = %event.name, market = %label, pattern = %pattern, "Including market");
                }
                MarketVerdict::Excluded(pattern) => {
                    info!(event = %event.name, market = %label, pattern = %pattern, "Excluding market");
                    continue;
                }
                MarketVerdict::NotIncluded => continue,
                MarketVerdict::Kept => {}
            }

            if let Some(runners) = self.get_runners(summary.market_id).await? {
                markets.push((summary, runners));
            }
        }
        Ok(markets)
    }

    /// [`get_markets_for_event`](Self::get_markets_for_event) for every
    /// selected event.
    pub async fn get_events_map(&self, date: Option<NaiveDate>) -> Result<EventsMap> {
        let mut map = EventsMap::new();
        for event in self.get_events().await? {
            let markets = self.get_markets_for_event(&event, date).await?;
            map.push((event, markets));
        }
        Ok(map)
    }

    /// Names of runners withdrawn from a market.
    pub async fn get_non_runners(&self, market_id: MarketId) -> Result<Vec<String>> {
        self.ensure_logged_in().await?;
        let prices = self.exchange.get_market_prices(market_id).await?;
        Ok(removed_runner_names(&prices.removed_runners))
    }

    /// Placed runners of a settled market, in finishing order.
    pub async fn get_winners(&self, market_id: MarketId) -> Result<Vec<String>> {
        self.results.winners(self.sport_id, market_id).await
    }

    /// 1-based finishing position of `runner`, 0 if it did not place.
    pub async fn get_position(&self, market_id: MarketId, runner: &str) -> Result<u32> {
        self.results.position(self.sport_id, market_id, runner).await
    }

    /// Place bets on a single market. With mock bets on, the bets are only
    /// logged and nothing is returned.
    pub async fn place_bets(&self, bets: &[Bet]) -> Result<Vec<PlaceBetResult>> {
        if self.mock_bets {
            for bet in bets {
                info!(bet = %bet, "Mock bet, not placed");
            }
            return Ok(Vec::new());
        }
        self.ensure_logged_in().await?;
        self.exchange.place_bets(bets).await
    }
}

/// `"<market name> HH:MM"` using the market's start time.
#[must_use]
pub fn market_name_with_time(summary: &MarketSummary) -> String {
    format!("{} {}", summary.name, summary.start_time.format("%H:%M"))
}

/// Human-readable dump of an events map.
#[must_use]
pub fn render_events_map(map: &EventsMap) -> String {
    let mut out = String::new();
    for (event, markets) in map {
        let _ = writeln!(out, "Event: {}", event.name);
        for (summary, runners) in markets {
            let _ = writeln!(out, "  Market: {}", market_name_with_time(summary));
            for runner in runners {
                let _ = writeln!(out, "    Selection ID: {}", runner.selection_id);
                out.push_str("    > Best prices to back <\n");
                for level in &runner.best_to_back {
                    let _ = writeln!(out, "      P: {}; A: {}", level.price, level.amount_available);
                }
                out.push_str("    > Best prices to lay <\n");
                for level in &runner.best_to_lay {
                    let _ = writeln!(out, "      P: {}; A: {}", level.price, level.amount_available);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::{BetSide, PriceLevel, SelectionId};

    fn summary() -> MarketSummary {
        MarketSummary {
            market_id: MarketId::new(102_873_781),
            name: "7f Hcap".into(),
            start_time: Utc.with_ymd_and_hms(2026, 10, 19, 14, 5, 0).unwrap(),
        }
    }

    #[test]
    fn market_name_carries_start_time() {
        assert_eq!(market_name_with_time(&summary()), "7f Hcap 14:05");
    }

    #[test]
    fn renders_events_map() {
        let runner = RunnerPrices {
            selection_id: SelectionId::new(4_056_154),
            sort_order: 0,
            total_amount_matched: 0.0,
            last_price_matched: 0.0,
            handicap: None,
            reduction_factor: 0.0,
            vacant: None,
            far_starting_price: None,
            near_starting_price: None,
            actual_starting_price: None,
            best_to_back: vec![PriceLevel {
                price: 1.79,
                amount_available: 54.64,
                side: BetSide::Lay,
                depth: 1,
            }],
            best_to_lay: vec![],
        };
        let event = EventSummary {
            event_id: EventId::new(27_000_001),
            name: "Kempton 19th Oct".into(),
        };
        let rendered = render_events_map(&vec![(event, vec![(summary(), vec![runner])])]);
        assert_eq!(
            rendered,
            "Event: Kempton 19th Oct\n  Market: 7f Hcap 14:05\n    Selection ID: 4056154\n    > Best prices to back <\n      P: 1.79; A: 54.64\n    > Best prices to lay <\n"
        );
    }
}
