//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod enrichment;
pub mod racing;
pub mod results;
pub mod retry;
