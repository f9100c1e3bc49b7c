//! Horse racing event selection.

use regex::Regex;
use serde::Deserialize;

use crate::domain::EventId;
use crate::error::{ConfigError, Error, Result};

/// Parent event of British horse racing.
pub const GB_HORSE_RACING_EVENT_ID: u32 = 298_251;
/// Parent event of Irish horse racing.
pub const IRE_HORSE_RACING_EVENT_ID: u32 = 298_252;

/// Which events and markets the horse racing facade looks at.
#[derive(Debug, Clone, Deserialize)]
pub struct RacingConfig {
    /// Parent events whose children are listed.
    #[serde(default = "default_event_ids")]
    pub event_ids: Vec<u32>,
    /// An event is kept when its name matches any of these. Empty keeps all.
    #[serde(default)]
    pub event_inclusion_patterns: Vec<String>,
    /// When set, only markets matching one of these are kept.
    #[serde(default)]
    pub market_inclusion_patterns: Vec<String>,
    /// Markets matching one of these are dropped. Ignored when inclusion
    /// patterns are set.
    #[serde(default)]
    pub market_exclusion_patterns: Vec<String>,
    /// Log bets instead of sending them to the exchange.
    #[serde(default = "default_mock_bets")]
    pub mock_bets: bool,
}

fn default_event_ids() -> Vec<u32> {
    vec![GB_HORSE_RACING_EVENT_ID, IRE_HORSE_RACING_EVENT_ID]
}

const fn default_mock_bets() -> bool {
    true
}

impl Default for RacingConfig {
    fn default() -> Self {
        Self {
            event_ids: default_event_ids(),
            event_inclusion_patterns: Vec::new(),
            market_inclusion_patterns: Vec::new(),
            market_exclusion_patterns: Vec::new(),
            mock_bets: default_mock_bets(),
        }
    }
}

impl RacingConfig {
    #[must_use]
    pub fn event_ids(&self) -> Vec<EventId> {
        self.event_ids.iter().copied().map(EventId::new).collect()
    }

    /// Compile the configured patterns.
    pub fn filters(&self) -> Result<RacingFilters> {
        Ok(RacingFilters {
            event_inclusions: compile(
                "racing.event_inclusion_patterns",
                &self.event_inclusion_patterns,
            )?,
            market_inclusions: compile(
                "racing.market_inclusion_patterns",
                &self.market_inclusion_patterns,
            )?,
            market_exclusions: compile(
                "racing.market_exclusion_patterns",
                &self.market_exclusion_patterns,
            )?,
        })
    }
}

fn compile(field: &'static str, patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|err| {
                Error::from(ConfigError::InvalidValue {
                    field,
                    reason: err.to_string(),
                })
            })
        })
        .collect()
}

/// Why a market was kept or dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketVerdict {
    /// Matched an inclusion pattern.
    Included(String),
    /// Matched an exclusion pattern.
    Excluded(String),
    /// No inclusion patterns and no exclusion matched.
    Kept,
    /// Inclusion patterns are set and none matched.
    NotIncluded,
}

impl MarketVerdict {
    #[must_use]
    pub const fn is_kept(&self) -> bool {
        matches!(self, Self::Included(_) | Self::Kept)
    }
}

/// Compiled event and market name filters.
#[derive(Debug, Clone, Default)]
pub struct RacingFilters {
    event_inclusions: Vec<Regex>,
    market_inclusions: Vec<Regex>,
    market_exclusions: Vec<Regex>,
}

impl RacingFilters {
    #[must_use]
    pub fn includes_event(&self, name: &str) -> bool {
        self.event_inclusions.is_empty()
            || self.event_inclusions.iter().any(|re| re.is_match(name))
    }

    /// Inclusion patterns win over exclusion patterns when both are set.
    #[must_use]
    pub fn market_verdict(&self, name: &str) -> MarketVerdict {
        if !self.market_inclusions.is_empty() {
            return first_match(&self.market_inclusions, name)
                .map_or(MarketVerdict::NotIncluded, MarketVerdict::Included);
        }
        first_match(&self.market_exclusions, name).map_or(MarketVerdict::Kept, MarketVerdict::Excluded)
    }
}

fn first_match(patterns: &[Regex], name: &str) -> Option<String> {
    patterns
        .iter()
        .find(|re| re.is_match(name))
        .map(|re| re.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(inclusions: &[&str], exclusions: &[&str]) -> RacingConfig {
        RacingConfig {
            market_inclusion_patterns: inclusions.iter().map(ToString::to_string).collect(),
            market_exclusion_patterns: exclusions.iter().map(ToString::to_string).collect(),
            ..RacingConfig::default()
        }
    }

    #[test]
    fn defaults_cover_gb_and_ire_with_mock_bets() {
        let config = RacingConfig::default();
        assert_eq!(
            config.event_ids(),
            vec![EventId::new(298_251), EventId::new(298_252)]
        );
        assert!(config.mock_bets);
    }

    #[test]
    fn inclusion_patterns_take_precedence() {
        let filters = config(&["Hcap"], &["Hcap"]).filters().unwrap();
        assert_eq!(
            filters.market_verdict("1m Hcap"),
            MarketVerdict::Included("Hcap".into())
        );
        assert_eq!(filters.market_verdict("1m Mdn"), MarketVerdict::NotIncluded);
    }

    #[test]
    fn exclusion_patterns_apply_without_inclusions() {
        let filters = config(&[], &["TO BE PLACED", "Forecast"]).filters().unwrap();
        assert_eq!(
            filters.market_verdict("Forecast"),
            MarketVerdict::Excluded("Forecast".into())
        );
        assert!(filters.market_verdict("2m4f Hrd").is_kept());
    }

    #[test]
    fn empty_event_inclusions_keep_every_event() {
        let filters = RacingFilters::default();
        assert!(filters.includes_event("Kempton 19th Oct"));

        let filters = RacingConfig {
            event_inclusion_patterns: vec!["^Kemp".into()],
            ..RacingConfig::default()
        }
        .filters()
        .unwrap();
        assert!(filters.includes_event("Kempton 19th Oct"));
        assert!(!filters.includes_event("Daily Win Dist Odds"));
    }

    #[test]
    fn invalid_pattern_names_the_field() {
        let err = config(&["("], &[]).filters().unwrap_err();
        assert!(err.to_string().contains("racing.market_inclusion_patterns"));
    }
}
