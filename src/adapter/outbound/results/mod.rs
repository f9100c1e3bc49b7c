//! Published race results.

mod rss;
pub mod settings;

pub use rss::{first_item_description, RssResultsFeed};
pub use settings::{ResultsConfig, HORSE_RACING_SPORT_ID};
