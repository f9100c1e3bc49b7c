//! The bet record that the enrichment pipeline fills in.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{BetId, MarketId, SelectionId};
use crate::error::DecodeError;

/// Side of an exchange bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BetSide {
    /// Betting for an outcome.
    #[serde(rename = "B", alias = "back")]
    Back,
    /// Betting against an outcome.
    #[serde(rename = "L", alias = "lay")]
    Lay,
}

impl BetSide {
    /// The exchange's single-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Back => "B",
            Self::Lay => "L",
        }
    }
}

impl fmt::Display for BetSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BetSide {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Self::Back),
            "L" => Ok(Self::Lay),
            other => Err(DecodeError::InvalidSide(other.to_string())),
        }
    }
}

/// Lifecycle status of a bet on the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetStatus {
    #[serde(rename = "U")]
    Unmatched,
    #[serde(rename = "M")]
    Matched,
    #[serde(rename = "S")]
    Settled,
    #[serde(rename = "C")]
    Cancelled,
    #[serde(rename = "V")]
    Voided,
    #[serde(rename = "L")]
    Lapsed,
    #[serde(rename = "MU")]
    MatchedAndUnmatched,
}

/// A bet that has been, or is about to be, placed.
///
/// Fields past `amount_available` start out empty and are filled in by the
/// enrichment passes. `event_outcome` is the finishing position: 0 means the
/// runner did not place, 1 means it won, 2 and up the place it finished in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub bet_id: Option<BetId>,
    pub market_id: MarketId,
    pub selection_id: SelectionId,
    pub side: BetSide,
    pub price: f64,
    pub size: Option<f64>,
    pub amount_available: f64,
    #[serde(default)]
    pub amount_matched: Option<f64>,
    #[serde(default)]
    pub runner_name: Option<String>,
    #[serde(default)]
    pub number_of_runners: Option<usize>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub market_desc: Option<String>,
    #[serde(default)]
    pub event_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time_placed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub event_outcome: Option<u32>,
    #[serde(default)]
    pub non_runner: Option<bool>,
    #[serde(default)]
    pub profit_or_loss: Option<f64>,
}

impl Bet {
    /// Create a bet from what is known before it is placed.
    #[must_use]
    pub fn new(
        market_id: MarketId,
        selection_id: SelectionId,
        side: BetSide,
        price: f64,
        amount_available: f64,
    ) -> Self {
        Self {
            bet_id: None,
            market_id,
            selection_id,
            side,
            price,
            size: None,
            amount_available,
            amount_matched: None,
            runner_name: None,
            number_of_runners: None,
            location: None,
            market_desc: None,
            event_time: None,
            time_placed: None,
            event_outcome: None,
            non_runner: None,
            profit_or_loss: None,
        }
    }

    #[must_use]
    pub fn with_bet_id(mut self, bet_id: BetId) -> Self {
        self.bet_id = Some(bet_id);
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn with_event(
        mut self,
        event_time: DateTime<Utc>,
        location: impl Into<String>,
        market_desc: impl Into<String>,
    ) -> Self {
        self.event_time = Some(event_time);
        self.location = Some(location.into());
        self.market_desc = Some(market_desc.into());
        self
    }

    #[must_use]
    pub fn with_runner_name(mut self, name: impl Into<String>) -> Self {
        self.runner_name = Some(name.into());
        self
    }

    /// True once the exchange has assigned an id.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        self.bet_id.is_some()
    }
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bet{{market={}, selection={}, side={}, price={}",
            self.market_id, self.selection_id, self.side, self.price
        )?;
        if let Some(bet_id) = self.bet_id {
            write!(f, ", id={bet_id}")?;
        }
        if let Some(name) = &self.runner_name {
            write!(f, ", runner={name}")?;
        }
        if let Some(outcome) = self.event_outcome {
            write!(f, ", outcome={outcome}")?;
        }
        if let Some(non_runner) = self.non_runner {
            write!(f, ", non_runner={non_runner}")?;
        }
        if let Some(pl) = self.profit_or_loss {
            write!(f, ", pl={pl}")?;
        }
        f.write_str("}")
    }
}
