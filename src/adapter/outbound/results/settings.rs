//! Results feed configuration.

use serde::Deserialize;

/// Sport id the exchange uses for horse racing.
pub const HORSE_RACING_SPORT_ID: u32 = 7;

/// Where published results are fetched from.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsConfig {
    /// Base URL of the RSS results feed.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    #[serde(default = "default_sport_id")]
    pub sport_id: u32,
    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_feed_url() -> String {
    "http://rss.betfair.com/RSS.aspx".to_string()
}

const fn default_sport_id() -> u32 {
    HORSE_RACING_SPORT_ID
}

const fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            sport_id: default_sport_id(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
