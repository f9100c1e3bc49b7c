//! Composition root: wires gateways and services from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::betfair::{ExchangeGateway, GlobalGateway, Session};
use crate::adapter::outbound::results::RssResultsFeed;
use crate::application::enrichment::BetEnrichment;
use crate::application::racing::HorseRacing;
use crate::application::results::ResultsLookup;
use crate::application::retry::{InterruptHandle, Invoker};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{ExchangeService, GlobalService, ResultsFeed, SessionRenewer};

/// Everything a client of the exchange needs, sharing one session.
pub struct Services {
    pub session: Arc<Session>,
    /// Wakes any invoker sleeping between attempts. Later backoffs are not
    /// affected; the flag only records that an interrupt happened until
    /// `clear()` is called.
    pub interrupt: InterruptHandle,
    pub global: Arc<GlobalGateway>,
    pub exchange: Arc<ExchangeGateway>,
    pub results: ResultsLookup,
    pub racing: Arc<HorseRacing>,
    pub enrichment: BetEnrichment,
}

/// The RSS results feed described by `[results]`.
#[must_use]
pub fn build_results_feed(config: &Config) -> Arc<dyn ResultsFeed> {
    Arc::new(RssResultsFeed::from_config(&config.results))
}

/// Wire gateways, the racing facade and enrichment over the given services.
///
/// Both gateways share a session, a retry policy and an interrupt handle.
/// Expired sessions are renewed by logging in again with the configured
/// account.
pub fn build_services(
    config: &Config,
    global_service: Arc<dyn GlobalService>,
    exchange_service: Arc<dyn ExchangeService>,
    feed: Arc<dyn ResultsFeed>,
) -> Result<Services> {
    let session = Arc::new(Session::new());
    let interrupt = InterruptHandle::default();
    let invoker = Invoker::new(config.retry.policy()).with_interrupt(interrupt.clone());

    let mut global = GlobalGateway::new(global_service, Arc::clone(&session), invoker.clone());
    match config.account.credentials() {
        Some(credentials) => global = global.with_credentials(credentials),
        None => warn!("No account credentials configured, sessions cannot be renewed"),
    }
    let global = Arc::new(global);

    let renewer: Arc<dyn SessionRenewer> = global.clone();
    let exchange = Arc::new(
        ExchangeGateway::new(exchange_service, Arc::clone(&session), invoker)
            .with_renewer(renewer),
    );

    let results = ResultsLookup::new(feed);
    let racing = Arc::new(
        HorseRacing::new(Arc::clone(&global), Arc::clone(&exchange), results.clone())
            .with_sport_id(config.results.sport_id)
            .with_config(&config.racing)?,
    );
    let enrichment = BetEnrichment::new(Arc::clone(&exchange), Arc::clone(&racing));

    info!(
        max_retries = config.retry.max_retries,
        mock_bets = config.racing.mock_bets,
        "Services ready"
    );

    Ok(Services {
        session,
        interrupt,
        global,
        exchange,
        results,
        racing,
        enrichment,
    })
}
