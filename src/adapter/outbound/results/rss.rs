//! RSS results feed client.
//!
//! The exchange publishes one RSS document per settled market. The first
//! item's description holds the winners line, e.g. `Winner(s): Foo, Bar`.

use std::time::Duration;

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::settings::ResultsConfig;
use crate::domain::MarketId;
use crate::error::{Error, Result};
use crate::port::ResultsFeed;

pub struct RssResultsFeed {
    http: HttpClient,
    base_url: String,
}

impl RssResultsFeed {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ResultsConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.feed_url.clone(),
        }
    }

    #[must_use]
    pub fn feed_url(&self, sport_id: u32, market_id: MarketId) -> String {
        format!(
            "{}?format=rss&sportID={sport_id}&marketID={market_id}",
            self.base_url
        )
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let unavailable = |reason: String| Error::FeedUnavailable {
            url: url.to_string(),
            reason,
        };

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| unavailable(err.to_string()))?;
        let response = response
            .error_for_status()
            .map_err(|err| unavailable(err.to_string()))?;
        response
            .text()
            .await
            .map_err(|err| unavailable(err.to_string()))
    }
}

#[async_trait]
impl ResultsFeed for RssResultsFeed {
    async fn winners_text(&self, sport_id: u32, market_id: MarketId) -> Result<String> {
        let url = self.feed_url(sport_id, market_id);
        debug!(url = %url, "Fetching results feed");

        let body = self.fetch(&url).await?;
        match first_item_description(&body)? {
            Some(description) => Ok(description.trim().to_string()),
            None => Err(Error::FeedUnavailable {
                url,
                reason: "feed has no entries".into(),
            }),
        }
    }
}

/// The description of the first `<item>` in an RSS document.
///
/// Descriptions outside an item (the channel's own) are ignored.
pub fn first_item_description(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_item = false;
    let mut in_description = false;
    let mut description = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"item" => in_item = true,
                b"description" if in_item => in_description = true,
                _ => {}
            },
            Ok(Event::Text(text)) if in_description => {
                let text = text.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                description.push_str(&text);
            }
            Ok(Event::CData(data)) if in_description => {
                description.push_str(&String::from_utf8_lossy(&data.into_inner()));
            }
            Ok(Event::End(tag)) => match tag.name().as_ref() {
                b"description" if in_description => in_description = false,
                b"item" => return Ok(Some(description)),
                _ => {}
            },
            Ok(Event::Eof) => return Ok(None),
            Ok(_) => {}
            Err(err) => return Err(Error::Xml(err.to_string())),
        }
    }
}
