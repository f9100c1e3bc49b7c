//! `paddock check`

use std::path::Path;

use crate::infrastructure::config::settings::Config;

/// Print a summary of the effective configuration.
pub fn execute_config(path: &Path, config: &Config) {
    println!("Configuration Check");
    println!("  Config: {}", path.display());
    println!(
        "  Retry: {} attempts, {}ms standard, {}ms throttle",
        config.retry.max_retries, config.retry.standard_sleep_ms, config.retry.throttle_sleep_ms
    );
    println!("  Results feed: {}", config.results.feed_url);
    println!("  Sport id: {}", config.results.sport_id);
    println!("  Event ids: {:?}", config.racing.event_ids);
    println!("  Mock bets: {}", config.racing.mock_bets);
    if config.account.credentials().is_some() {
        println!("  Account: configured");
    } else {
        println!("  Account: not configured (set PADDOCK_USERNAME and PADDOCK_PASSWORD)");
    }
    println!("Configuration is valid");
}
