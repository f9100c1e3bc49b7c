//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the remote exchange, its global service, the
//! results feed and session renewal.

pub mod exchange;
pub mod global;
pub mod results;
pub mod session;
