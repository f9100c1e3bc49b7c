//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`script`] - Scripted response queues and response builders.
//! - [`exchange`] - `ScriptedExchange` and `ScriptedGlobal` service fakes.
//! - [`results`] - `StaticResultsFeed` and `CountingRenewer`.
//! - [`fixture`] - Compressed payloads, markets, events and bets.
//! - [`config`] - Retry policies that never sleep.

pub mod config;
pub mod exchange;
pub mod fixture;
pub mod results;
pub mod script;
