//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`ExchangeService`], [`GlobalService`] - Remote exchange integration
//! - [`ResultsFeed`] - Published race results
//! - [`SessionRenewer`] - Re-authentication after a session expires

pub mod outbound;

pub use outbound::exchange::{
    AccountFunds, BetCategory, BetDetails, BetPersistence, ExchangeService, HeaderCode,
    MarketDetails, MarketPrices, MuBet, MuBetFilter, MuBetsRequest, PlaceBetInstruction,
    PlaceBetResult, RequestHeader, Response, ResponseHeader, Runner, SortOrder, STATUS_OK,
};
pub use outbound::global::{
    EventListing, EventSummary, EventType, GlobalService, LoginRequest, MarketSummary,
};
pub use outbound::results::ResultsFeed;
pub use outbound::session::SessionRenewer;
