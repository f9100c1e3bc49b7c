//! Canonical test configurations.

use std::time::Duration;

use crate::application::retry::{Invoker, RetryPolicy};

/// A retry policy that never sleeps.
pub fn instant_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        standard_sleep: Duration::ZERO,
        throttle_sleep: Duration::ZERO,
    }
}

/// An invoker over [`instant_retry`].
pub fn instant_invoker(max_retries: u32) -> Invoker {
    Invoker::new(instant_retry(max_retries))
}
