use std::sync::Arc;

use paddock::infrastructure::bootstrap::{build_services, Services};
use paddock::infrastructure::config::settings::Config;
use paddock::testkit::exchange::{ScriptedExchange, ScriptedGlobal};
use paddock::testkit::results::StaticResultsFeed;

/// Services wired over scripted fakes, with the fakes kept for assertions.
pub struct Harness {
    pub global: Arc<ScriptedGlobal>,
    pub exchange: Arc<ScriptedExchange>,
    pub feed: Arc<StaticResultsFeed>,
    pub services: Services,
}

/// Config with an account and a three-attempt budget that never sleeps.
pub fn config() -> Config {
    let mut config = Config::default();
    config.account.username = Some("punter".into());
    config.account.password = Some("secret".into());
    config.retry.standard_sleep_ms = 0;
    config.retry.throttle_sleep_ms = 0;
    config
}

pub fn harness(global: ScriptedGlobal, exchange: ScriptedExchange) -> Harness {
    harness_with(config(), global, exchange, StaticResultsFeed::new())
}

pub fn harness_with(
    config: Config,
    global: ScriptedGlobal,
    exchange: ScriptedExchange,
    feed: StaticResultsFeed,
) -> Harness {
    let global = Arc::new(global);
    let exchange = Arc::new(exchange);
    let feed = Arc::new(feed);
    let services = build_services(&config, global.clone(), exchange.clone(), feed.clone())
        .expect("build services");
    Harness {
        global,
        exchange,
        feed,
        services,
    }
}
