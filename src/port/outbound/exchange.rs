//! Exchange service port.
//!
//! This is the raw request/response surface of the remote exchange. Every
//! response carries a header with the API-level error code and an
//! operation-specific status. Interpreting those codes and retrying is done
//! by the gateway and invoker, never by implementations of this trait.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{BetId, BetSide, BetStatus, MarketId, SelectionId};
use crate::error::Error;

/// Operation status the exchange uses for success.
pub const STATUS_OK: &str = "OK";

/// Header stamped on every authenticated request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeader {
    pub session_token: Option<String>,
}

/// API-level error code found in every response header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HeaderCode {
    #[default]
    Ok,
    NoSession,
    ExceededThrottle,
    Other(String),
}

impl fmt::Display for HeaderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("OK"),
            Self::NoSession => f.write_str("NO_SESSION"),
            Self::ExceededThrottle => f.write_str("EXCEEDED_THROTTLE"),
            Self::Other(code) => f.write_str(code),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeader {
    pub error_code: HeaderCode,
    /// The exchange may rotate the session token on any response.
    pub session_token: Option<String>,
}

/// A response envelope: header, operation status and payload.
///
/// The payload is only meaningful when `status` is [`STATUS_OK`].
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub header: ResponseHeader,
    pub status: String,
    pub body: T,
}

impl<T> Response<T> {
    /// A successful response carrying `body`.
    pub fn ok(body: T) -> Self {
        Self {
            header: ResponseHeader::default(),
            status: STATUS_OK.to_string(),
            body,
        }
    }

    /// Attach a session token to the response header.
    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.header.session_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

impl<T: Default> Response<T> {
    /// A failed response with an operation status and header code.
    pub fn failed(status: impl Into<String>, error_code: HeaderCode) -> Self {
        Self {
            header: ResponseHeader {
                error_code,
                session_token: None,
            },
            status: status.into(),
            body: T::default(),
        }
    }
}

/// A runner listed in a market's static data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runner {
    pub selection_id: SelectionId,
    pub name: String,
}

/// Static market data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketDetails {
    pub name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub runners: Vec<Runner>,
}

/// Dynamic market data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketPrices {
    /// `;`-separated `name,price,...` entries for withdrawn runners.
    pub removed_runners: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetDetails {
    pub bet_id: BetId,
    pub status: BetStatus,
    pub matched_size: f64,
}

impl Default for BetDetails {
    fn default() -> Self {
        Self {
            bet_id: BetId::new(0),
            status: BetStatus::Unmatched,
            matched_size: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccountFunds {
    pub balance: f64,
    pub available_balance: f64,
    pub exposure: f64,
}

/// Which bets a matched/unmatched query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuBetFilter {
    Matched,
    Unmatched,
    MatchedAndUnmatched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuBetsRequest {
    pub market_id: MarketId,
    pub filter: MuBetFilter,
    pub sort_order: SortOrder,
    pub start_record: u32,
    pub record_count: u32,
}

/// A matched or unmatched bet as reported by the exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct MuBet {
    pub bet_id: BetId,
    pub market_id: MarketId,
    pub selection_id: SelectionId,
    pub side: BetSide,
    pub price: f64,
    pub size: f64,
    pub status: BetStatus,
    pub placed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetCategory {
    Exchange,
    MarketOnClose,
    LimitOnClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetPersistence {
    None,
    InPlay,
    StartingPrice,
}

/// A single bet submitted through `place_bets`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceBetInstruction {
    pub market_id: MarketId,
    pub selection_id: SelectionId,
    pub side: BetSide,
    pub price: f64,
    pub size: f64,
    pub category: BetCategory,
    pub persistence: BetPersistence,
    pub bsp_liability: f64,
    pub asian_line_id: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceBetResult {
    pub bet_id: Option<BetId>,
    pub success: bool,
    pub result_code: String,
    pub size_matched: f64,
    pub average_price_matched: f64,
}

/// The exchange's betting service.
#[async_trait]
pub trait ExchangeService: Send + Sync {
    async fn get_account_funds(&self, header: RequestHeader)
        -> Result<Response<AccountFunds>, Error>;

    /// All active and suspended markets in the exchange's compressed form.
    async fn get_all_markets(&self, header: RequestHeader) -> Result<Response<String>, Error>;

    async fn get_market(
        &self,
        header: RequestHeader,
        market_id: MarketId,
    ) -> Result<Response<MarketDetails>, Error>;

    async fn get_market_prices(
        &self,
        header: RequestHeader,
        market_id: MarketId,
    ) -> Result<Response<MarketPrices>, Error>;

    /// Market prices in the compressed, delimiter-encoded form.
    async fn get_market_prices_compressed(
        &self,
        header: RequestHeader,
        market_id: MarketId,
    ) -> Result<Response<String>, Error>;

    async fn get_bet(
        &self,
        header: RequestHeader,
        bet_id: BetId,
    ) -> Result<Response<BetDetails>, Error>;

    async fn get_mu_bets(
        &self,
        header: RequestHeader,
        request: MuBetsRequest,
    ) -> Result<Response<Vec<MuBet>>, Error>;

    async fn place_bets(
        &self,
        header: RequestHeader,
        bets: Vec<PlaceBetInstruction>,
    ) -> Result<Response<Vec<PlaceBetResult>>, Error>;
}
