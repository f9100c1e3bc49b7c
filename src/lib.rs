//! Paddock - a resilient client for a Betfair-style betting exchange.
//!
//! # Architecture
//!
//! The crate is laid out in hexagonal style:
//!
//! - **`domain`** - Identifiers, bets, decoded runner prices and the
//!   profit/loss rules. No I/O.
//! - **`port`** - Traits for the remote exchange, its global service, the
//!   results feed and session renewal.
//! - **`adapter`** - The exchange gateways with their compressed price
//!   decoder, the RSS results feed, and the CLI.
//! - **`application`** - The retrying invoker every remote call runs under,
//!   the horse racing facade, results lookup and bet enrichment.
//! - **`infrastructure`** - Configuration, logging and wiring.
//!
//! # Example
//!
//! ```
//! use paddock::adapter::outbound::betfair::codec::decode_market_prices;
//!
//! let runners = decode_market_prices("meta:58805~0~12.5~2.0~~0.0~false~~~|2.0~10.0~L~1~")?;
//! assert_eq!(runners[0].best_back().map(|level| level.price), Some(2.0));
//! # Ok::<(), paddock::error::DecodeError>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
