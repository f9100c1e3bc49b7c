//! Test doubles for the results feed and session renewal.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::MarketId;
use crate::error::{Error, Result};
use crate::port::{ResultsFeed, SessionRenewer};

/// A [`ResultsFeed`] with fixed winners lines per market.
///
/// Markets without a line fail as if the feed were unreachable.
#[derive(Default)]
pub struct StaticResultsFeed {
    lines: HashMap<MarketId, String>,
    requests: Mutex<Vec<(u32, MarketId)>>,
}

impl StaticResultsFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `line`, e.g. `"Winner(s): Foo, Bar"`, for a market.
    pub fn with_line(mut self, market_id: u32, line: &str) -> Self {
        self.lines.insert(MarketId::new(market_id), line.to_string());
        self
    }

    /// Every `(sport id, market id)` requested, in order.
    pub fn requests(&self) -> Vec<(u32, MarketId)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl ResultsFeed for StaticResultsFeed {
    async fn winners_text(&self, sport_id: u32, market_id: MarketId) -> Result<String> {
        self.requests.lock().push((sport_id, market_id));
        self.lines
            .get(&market_id)
            .cloned()
            .ok_or_else(|| Error::FeedUnavailable {
                url: format!("static://{sport_id}/{market_id}"),
                reason: "no results published".into(),
            })
    }
}

/// A [`SessionRenewer`] that counts renewals and can be told to fail.
#[derive(Default)]
pub struct CountingRenewer {
    renewals: AtomicU32,
    fail: bool,
}

impl CountingRenewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A renewer whose every renewal fails.
    pub fn failing() -> Self {
        Self {
            renewals: AtomicU32::new(0),
            fail: true,
        }
    }

    pub fn renewals(&self) -> u32 {
        self.renewals.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionRenewer for CountingRenewer {
    async fn renew(&self) -> Result<()> {
        self.renewals.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::InvalidRequest("login rejected".into()));
        }
        Ok(())
    }
}
