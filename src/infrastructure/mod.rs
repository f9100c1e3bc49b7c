//! Infrastructure layer.
//!
//! Configuration loading and the wiring of gateways and services. No
//! business logic lives here.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
