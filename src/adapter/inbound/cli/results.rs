//! `paddock winners` and `paddock position`

use crate::application::results::ResultsLookup;
use crate::domain::MarketId;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_results_feed;
use crate::infrastructure::config::settings::Config;

fn lookup(config: &Config) -> ResultsLookup {
    ResultsLookup::new(build_results_feed(config))
}

pub async fn execute_winners(config: &Config, market_id: u32) -> Result<()> {
    let winners = lookup(config)
        .winners(config.results.sport_id, MarketId::new(market_id))
        .await?;
    for (index, name) in winners.iter().enumerate() {
        println!("{}. {name}", index + 1);
    }
    Ok(())
}

pub async fn execute_position(config: &Config, market_id: u32, runner: &str) -> Result<()> {
    let position = lookup(config)
        .position(config.results.sport_id, MarketId::new(market_id), runner)
        .await?;
    println!("{position}");
    Ok(())
}
