//! Retry budget configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::retry::RetryPolicy;

#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Attempts per call, including the first.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_standard_sleep_ms")]
    pub standard_sleep_ms: u64,
    /// Backoff after the exchange reports its request throttle was exceeded.
    #[serde(default = "default_throttle_sleep_ms")]
    pub throttle_sleep_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_standard_sleep_ms() -> u64 {
    10_000
}

const fn default_throttle_sleep_ms() -> u64 {
    60_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            standard_sleep_ms: default_standard_sleep_ms(),
            throttle_sleep_ms: default_throttle_sleep_ms(),
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            standard_sleep: Duration::from_millis(self.standard_sleep_ms),
            throttle_sleep: Duration::from_millis(self.throttle_sleep_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy_defaults() {
        assert_eq!(RetryConfig::default().policy(), RetryPolicy::default());
    }
}
