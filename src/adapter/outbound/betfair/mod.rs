//! Betfair-style exchange adapter.
//!
//! - [`GlobalGateway`] - login, logout, event navigation
//! - [`ExchangeGateway`] - markets, prices and bets
//! - [`Session`] - the shared session token
//! - [`codec`] - decoders for the exchange's delimited text payloads

pub mod codec;
mod exchange;
mod global;
mod response;
mod session;
pub mod settings;

pub use exchange::{ExchangeGateway, MAX_BETS_PER_REQUEST};
pub use global::{Credentials, GlobalGateway, FREE_API_PRODUCT_ID};
pub use session::Session;
pub use settings::AccountConfig;
