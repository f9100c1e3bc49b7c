//! Outbound adapters (driven side).

pub mod betfair;
pub mod results;
