//! Scripted exchange and global services.
//!
//! Each operation is answered from a [`Script`], per market or bet id where
//! the operation takes one. Every call is recorded as `"<operation> <id>"`
//! along with the request header it carried.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::script::{Script, Scripted};
use crate::domain::{BetId, EventId, MarketId};
use crate::error::{ApiError, Error};
use crate::port::{
    AccountFunds, BetDetails, EventListing, EventType, ExchangeService, GlobalService,
    LoginRequest, MarketDetails, MarketPrices, MuBet, MuBetsRequest, PlaceBetInstruction,
    PlaceBetResult, RequestHeader, Response,
};

fn unscripted<T>(operation: &'static str) -> Result<Response<T>, Error> {
    Err(ApiError::Transport {
        operation,
        reason: "no scripted response".into(),
    }
    .into())
}

fn answer<T: Clone>(script: Option<&mut Script<T>>, operation: &'static str) -> Result<Response<T>, Error> {
    match script.and_then(Script::next) {
        Some(response) => response.map_err(Error::from),
        None => unscripted(operation),
    }
}

fn answer_keyed<K: Eq + Hash, T: Clone>(
    scripts: &Mutex<HashMap<K, Script<T>>>,
    key: &K,
    operation: &'static str,
) -> Result<Response<T>, Error> {
    answer(scripts.lock().get_mut(key), operation)
}

#[derive(Default)]
struct CallLog {
    calls: Mutex<Vec<String>>,
    headers: Mutex<Vec<RequestHeader>>,
}

impl CallLog {
    fn record(&self, call: String, header: Option<RequestHeader>) {
        self.calls.lock().push(call);
        if let Some(header) = header {
            self.headers.lock().push(header);
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.split(' ').next() == Some(operation))
            .count()
    }

    fn headers(&self) -> Vec<RequestHeader> {
        self.headers.lock().clone()
    }
}

/// An [`ExchangeService`] answering from scripts.
#[derive(Default)]
pub struct ScriptedExchange {
    account_funds: Mutex<Script<AccountFunds>>,
    all_markets: Mutex<Script<String>>,
    markets: Mutex<HashMap<MarketId, Script<MarketDetails>>>,
    prices: Mutex<HashMap<MarketId, Script<MarketPrices>>>,
    compressed: Mutex<HashMap<MarketId, Script<String>>>,
    bets: Mutex<HashMap<BetId, Script<BetDetails>>>,
    mu_bets: Mutex<Script<Vec<MuBet>>>,
    place_results: Mutex<Script<Vec<PlaceBetResult>>>,
    mu_requests: Mutex<Vec<MuBetsRequest>>,
    placed: Mutex<Vec<Vec<PlaceBetInstruction>>>,
    log: CallLog,
}

impl ScriptedExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account_funds(self, responses: Vec<Scripted<AccountFunds>>) -> Self {
        *self.account_funds.lock() = Script::new(responses);
        self
    }

    pub fn with_all_markets(self, responses: Vec<Scripted<String>>) -> Self {
        *self.all_markets.lock() = Script::new(responses);
        self
    }

    pub fn with_market(self, market_id: u32, responses: Vec<Scripted<MarketDetails>>) -> Self {
        self.markets
            .lock()
            .insert(MarketId::new(market_id), Script::new(responses));
        self
    }

    pub fn with_prices(self, market_id: u32, responses: Vec<Scripted<MarketPrices>>) -> Self {
        self.prices
            .lock()
            .insert(MarketId::new(market_id), Script::new(responses));
        self
    }

    /// Script `removedRunners` for a market.
    pub fn with_removed_runners(self, market_id: u32, removed_runners: &str) -> Self {
        self.with_prices(
            market_id,
            vec![super::script::ok(MarketPrices {
                removed_runners: removed_runners.to_string(),
            })],
        )
    }

    pub fn with_compressed(self, market_id: u32, responses: Vec<Scripted<String>>) -> Self {
        self.compressed
            .lock()
            .insert(MarketId::new(market_id), Script::new(responses));
        self
    }

    pub fn with_bet(self, bet_id: u64, responses: Vec<Scripted<BetDetails>>) -> Self {
        self.bets
            .lock()
            .insert(BetId::new(bet_id), Script::new(responses));
        self
    }

    pub fn with_mu_bets(self, responses: Vec<Scripted<Vec<MuBet>>>) -> Self {
        *self.mu_bets.lock() = Script::new(responses);
        self
    }

    pub fn with_place_results(self, responses: Vec<Scripted<Vec<PlaceBetResult>>>) -> Self {
        *self.place_results.lock() = Script::new(responses);
        self
    }

    /// Every call as `"<operation> <id>"`, in order.
    pub fn calls(&self) -> Vec<String> {
        self.log.calls()
    }

    /// Number of calls to `operation`, e.g. `"getMarket"`.
    pub fn call_count(&self, operation: &str) -> usize {
        self.log.count(operation)
    }

    /// Request headers in call order.
    pub fn headers(&self) -> Vec<RequestHeader> {
        self.log.headers()
    }

    pub fn mu_requests(&self) -> Vec<MuBetsRequest> {
        self.mu_requests.lock().clone()
    }

    /// Instructions of every `placeBets` call.
    pub fn placed(&self) -> Vec<Vec<PlaceBetInstruction>> {
        self.placed.lock().clone()
    }
}

#[async_trait]
impl ExchangeService for ScriptedExchange {
    async fn get_account_funds(
        &self,
        header: RequestHeader,
    ) -> Result<Response<AccountFunds>, Error> {
        self.log.record("getAccountFunds".into(), Some(header));
        answer(Some(&mut *self.account_funds.lock()), "getAccountFunds")
    }

    async fn get_all_markets(&self, header: RequestHeader) -> Result<Response<String>, Error> {
        self.log.record("getAllMarkets".into(), Some(header));
        answer(Some(&mut *self.all_markets.lock()), "getAllMarkets")
    }

    async fn get_market(
        &self,
        header: RequestHeader,
        market_id: MarketId,
    ) -> Result<Response<MarketDetails>, Error> {
        self.log.record(format!("getMarket {market_id}"), Some(header));
        answer_keyed(&self.markets, &market_id, "getMarket")
    }

    async fn get_market_prices(
        &self,
        header: RequestHeader,
        market_id: MarketId,
    ) -> Result<Response<MarketPrices>, Error> {
        self.log.record(format!("getMarketPrices {market_id}"), Some(header));
        answer_keyed(&self.prices, &market_id, "getMarketPrices")
    }

    async fn get_market_prices_compressed(
        &self,
        header: RequestHeader,
        market_id: MarketId,
    ) -> Result<Response<String>, Error> {
        self.log
            .record(format!("getMarketPricesCompressed {market_id}"), Some(header));
        answer_keyed(&self.compressed, &market_id, "getMarketPricesCompressed")
    }

    async fn get_bet(
        &self,
        header: RequestHeader,
        bet_id: BetId,
    ) -> Result<Response<BetDetails>, Error> {
        self.log.record(format!("getBet {bet_id}"), Some(header));
        answer_keyed(&self.bets, &bet_id, "getBet")
    }

    async fn get_mu_bets(
        &self,
        header: RequestHeader,
        request: MuBetsRequest,
    ) -> Result<Response<Vec<MuBet>>, Error> {
        self.log
            .record(format!("getMUBets {}", request.market_id), Some(header));
        self.mu_requests.lock().push(request);
        answer(Some(&mut *self.mu_bets.lock()), "getMUBets")
    }

    async fn place_bets(
        &self,
        header: RequestHeader,
        bets: Vec<PlaceBetInstruction>,
    ) -> Result<Response<Vec<PlaceBetResult>>, Error> {
        let market = bets.first().map(|bet| bet.market_id.to_string()).unwrap_or_default();
        self.log.record(format!("placeBets {market}"), Some(header));
        self.placed.lock().push(bets);
        answer(Some(&mut *self.place_results.lock()), "placeBets")
    }
}

/// A [`GlobalService`] answering from scripts.
///
/// Unscripted logins succeed with a fresh token (`session-1`, `session-2`,
/// ...). Unscripted logouts succeed with no token.
#[derive(Default)]
pub struct ScriptedGlobal {
    logins: Mutex<Script<()>>,
    logouts: Mutex<Script<()>>,
    event_types: Mutex<Script<Vec<EventType>>>,
    events: Mutex<HashMap<EventId, Script<EventListing>>>,
    login_requests: Mutex<Vec<LoginRequest>>,
    login_count: AtomicU32,
    log: CallLog,
}

impl ScriptedGlobal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logins(self, responses: Vec<Scripted<()>>) -> Self {
        *self.logins.lock() = Script::new(responses);
        self
    }

    pub fn with_logouts(self, responses: Vec<Scripted<()>>) -> Self {
        *self.logouts.lock() = Script::new(responses);
        self
    }

    pub fn with_event_types(self, responses: Vec<Scripted<Vec<EventType>>>) -> Self {
        *self.event_types.lock() = Script::new(responses);
        self
    }

    pub fn with_events(self, parent_id: u32, responses: Vec<Scripted<EventListing>>) -> Self {
        self.events
            .lock()
            .insert(EventId::new(parent_id), Script::new(responses));
        self
    }

    pub fn login_count(&self) -> u32 {
        self.login_count.load(Ordering::SeqCst)
    }

    pub fn login_requests(&self) -> Vec<LoginRequest> {
        self.login_requests.lock().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.calls()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.log.count(operation)
    }

    pub fn headers(&self) -> Vec<RequestHeader> {
        self.log.headers()
    }
}

#[async_trait]
impl GlobalService for ScriptedGlobal {
    async fn login(&self, request: LoginRequest) -> Result<Response<()>, Error> {
        let n = self.login_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.log.record(format!("login {}", request.username), None);
        self.login_requests.lock().push(request);
        match self.logins.lock().next() {
            Some(response) => response.map_err(Error::from),
            None => Ok(Response::ok(()).with_session_token(format!("session-{n}"))),
        }
    }

    async fn logout(&self, header: RequestHeader) -> Result<Response<()>, Error> {
        self.log.record("logout".into(), Some(header));
        match self.logouts.lock().next() {
            Some(response) => response.map_err(Error::from),
            None => Ok(Response::ok(())),
        }
    }

    async fn get_all_event_types(
        &self,
        header: RequestHeader,
    ) -> Result<Response<Vec<EventType>>, Error> {
        self.log.record("getAllEventTypes".into(), Some(header));
        answer(Some(&mut *self.event_types.lock()), "getAllEventTypes")
    }

    async fn get_events(
        &self,
        header: RequestHeader,
        parent_id: EventId,
    ) -> Result<Response<EventListing>, Error> {
        self.log.record(format!("getEvents {parent_id}"), Some(header));
        answer_keyed(&self.events, &parent_id, "getEvents")
    }
}
