//! Gateway over the exchange's betting service.
//!
//! Each operation stamps the current session token on its request, checks
//! the response codes and runs under the [`Invoker`], renewing the session
//! when the exchange reports it has expired.

use std::sync::Arc;

use tracing::{debug, info};

use super::response::into_payload;
use super::session::Session;
use crate::application::retry::Invoker;
use crate::domain::{Bet, BetId, MarketId};
use crate::error::{Error, Result};
use crate::port::{
    AccountFunds, BetCategory, BetDetails, BetPersistence, ExchangeService, MarketDetails,
    MarketPrices, MuBet, MuBetFilter, MuBetsRequest, PlaceBetInstruction, PlaceBetResult,
    SessionRenewer, SortOrder,
};

/// Most bets accepted by a single `place_bets` call.
pub const MAX_BETS_PER_REQUEST: usize = 60;

/// Records returned by a matched/unmatched bets query.
const MU_BETS_RECORD_COUNT: u32 = 200;

pub struct ExchangeGateway {
    service: Arc<dyn ExchangeService>,
    session: Arc<Session>,
    invoker: Invoker,
    renewer: Option<Arc<dyn SessionRenewer>>,
}

impl ExchangeGateway {
    pub fn new(service: Arc<dyn ExchangeService>, session: Arc<Session>, invoker: Invoker) -> Self {
        Self {
            service,
            session,
            invoker,
            renewer: None,
        }
    }

    /// Renew expired sessions through `renewer` before retrying.
    #[must_use]
    pub fn with_renewer(mut self, renewer: Arc<dyn SessionRenewer>) -> Self {
        self.renewer = Some(renewer);
        self
    }

    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub async fn get_account_funds(&self) -> Result<AccountFunds> {
        self.invoker
            .invoke("getAccountFunds", self.renewer(), || async move {
                let response = self.service.get_account_funds(self.session.header()).await?;
                into_payload(response, "getAccountFunds")
            })
            .await
    }

    /// All active and suspended markets, compressed.
    pub async fn get_all_markets(&self) -> Result<String> {
        self.invoker
            .invoke("getAllMarkets", self.renewer(), || async move {
                let response = self.service.get_all_markets(self.session.header()).await?;
                into_payload(response, "getAllMarkets")
            })
            .await
    }

    /// Static market data, including the runner list.
    pub async fn get_market(&self, market_id: MarketId) -> Result<MarketDetails> {
        debug!(market_id = %market_id, "Fetching market");
        self.invoker
            .invoke(&format!("getMarket {market_id}"), self.renewer(), || async move {
                let response = self
                    .service
                    .get_market(self.session.header(), market_id)
                    .await?;
                into_payload(response, "getMarket")
            })
            .await
    }

    pub async fn get_market_prices(&self, market_id: MarketId) -> Result<MarketPrices> {
        debug!(market_id = %market_id, "Fetching market prices");
        self.invoker
            .invoke(
                &format!("getMarketPrices {market_id}"),
                self.renewer(),
                || async move {
                    let response = self
                        .service
                        .get_market_prices(self.session.header(), market_id)
                        .await?;
                    into_payload(response, "getMarketPrices")
                },
            )
            .await
    }

    /// Market prices in compressed form; see
    /// [`decode_market_prices`](super::codec::decode_market_prices).
    pub async fn get_market_prices_compressed(&self, market_id: MarketId) -> Result<String> {
        debug!(market_id = %market_id, "Fetching compressed market prices");
        self.invoker
            .invoke(
                &format!("getMarketPricesCompressed {market_id}"),
                self.renewer(),
                || async move {
                    let response = self
                        .service
                        .get_market_prices_compressed(self.session.header(), market_id)
                        .await?;
                    into_payload(response, "getMarketPricesCompressed")
                },
            )
            .await
    }

    pub async fn get_bet(&self, bet_id: BetId) -> Result<BetDetails> {
        debug!(bet_id = %bet_id, "Fetching bet");
        self.invoker
            .invoke(&format!("getBet {bet_id}"), self.renewer(), || async move {
                let response = self.service.get_bet(self.session.header(), bet_id).await?;
                into_payload(response, "getBet")
            })
            .await
    }

    /// Matched and/or unmatched bets on a market, oldest first.
    pub async fn get_matched_and_unmatched_bets(
        &self,
        market_id: MarketId,
        filter: MuBetFilter,
    ) -> Result<Vec<MuBet>> {
        let request = MuBetsRequest {
            market_id,
            filter,
            sort_order: SortOrder::Ascending,
            start_record: 0,
            record_count: MU_BETS_RECORD_COUNT,
        };

        self.invoker
            .invoke(
                &format!("getMatchedAndUnmatchedBets {market_id}"),
                self.renewer(),
                || {
                    let request = request.clone();
                    async move {
                        let response = self
                            .service
                            .get_mu_bets(self.session.header(), request)
                            .await?;
                        into_payload(response, "getMatchedAndUnmatchedBets")
                    }
                },
            )
            .await
    }

    /// Place between 1 and 60 bets on a single market.
    ///
    /// Bets go in as plain exchange bets with no persistence.
    pub async fn place_bets(&self, bets: &[Bet]) -> Result<Vec<PlaceBetResult>> {
        let instructions = place_instructions(bets)?;
        let market_id = instructions[0].market_id;
        info!(market_id = %market_id, count = instructions.len(), "Placing bets");

        self.invoker
            .invoke(&format!("placeBets {market_id}"), self.renewer(), || {
                let instructions = instructions.clone();
                async move {
                    let response = self
                        .service
                        .place_bets(self.session.header(), instructions)
                        .await?;
                    into_payload(response, "placeBets")
                }
            })
            .await
    }

    fn renewer(&self) -> Option<&dyn SessionRenewer> {
        self.renewer.as_deref()
    }
}

fn place_instructions(bets: &[Bet]) -> Result<Vec<PlaceBetInstruction>> {
    let Some(first) = bets.first() else {
        return Err(Error::InvalidRequest("no bets to place".into()));
    };
    if bets.len() > MAX_BETS_PER_REQUEST {
        return Err(Error::InvalidRequest(format!(
            "{} bets exceeds the limit of {MAX_BETS_PER_REQUEST} per request",
            bets.len()
        )));
    }

    bets.iter()
        .map(|bet| {
            if bet.market_id != first.market_id {
                return Err(Error::InvalidRequest(format!(
                    "bets span markets {} and {}",
                    first.market_id, bet.market_id
                )));
            }
            let size = bet.size.ok_or_else(|| {
                Error::InvalidRequest(format!(
                    "bet on selection {} has no stake size",
                    bet.selection_id
                ))
            })?;
            Ok(PlaceBetInstruction {
                market_id: bet.market_id,
                selection_id: bet.selection_id,
                side: bet.side,
                price: bet.price,
                size,
                category: BetCategory::Exchange,
                persistence: BetPersistence::None,
                bsp_liability: 0.0,
                asian_line_id: 0,
            })
        })
        .collect()
}
