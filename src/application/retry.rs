//! Resilient invocation of remote operations.
//!
//! Every gateway call goes through [`Invoker::invoke`]. A failed attempt is
//! classified before the next one:
//!
//! 1. No active session: the session is renewed (re-login) and the call is
//!    retried straight away. A failed renewal is returned to the caller.
//! 2. Throttled: the invoker backs off for the throttle interval.
//! 3. Anything else: the invoker backs off for the standard interval.
//!
//! After `max_retries` attempts the call fails with
//! [`Error::ExceededRetries`](crate::error::Error::ExceededRetries).

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::error::{ApiError, Error, Result};
use crate::port::SessionRenewer;

/// Retry budget and backoff intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first.
    pub max_retries: u32,
    /// Backoff after a generic failure.
    pub standard_sleep: Duration,
    /// Backoff after the exchange reports the request throttle was exceeded.
    pub throttle_sleep: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            standard_sleep: Duration::from_millis(10_000),
            throttle_sleep: Duration::from_millis(60_000),
        }
    }
}

/// How a failed attempt is recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    NoSession,
    Throttled,
    Other,
}

impl Failure {
    #[must_use]
    pub fn classify(err: &Error) -> Self {
        match err {
            Error::Api(ApiError::NoSession) => Self::NoSession,
            Error::Api(ApiError::Throttled) => Self::Throttled,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Default)]
struct InterruptState {
    notify: Notify,
    interrupted: AtomicBool,
}

/// Wakes an invoker that is sleeping between attempts.
///
/// An interrupt only shortens a backoff already in progress: the retry loop
/// carries on with the next attempt, and later backoffs sleep in full. The
/// flag stays set until [`clear`](Self::clear) so an outer caller can see
/// that an interrupt happened.
#[derive(Debug, Clone, Default)]
pub struct InterruptHandle {
    state: Arc<InterruptState>,
}

impl InterruptHandle {
    pub fn interrupt(&self) {
        self.state.interrupted.store(true, Ordering::SeqCst);
        self.state.notify.notify_waiters();
    }

    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.state.interrupted.load(Ordering::SeqCst)
    }

    /// Reset the flag, returning whether it was set.
    pub fn clear(&self) -> bool {
        self.state.interrupted.swap(false, Ordering::SeqCst)
    }

    /// Sleep for `delay` unless interrupted while sleeping.
    ///
    /// Returns `true` if the sleep was cut short.
    async fn sleep(&self, delay: Duration) -> bool {
        let notified = self.state.notify.notified();
        tokio::pin!(notified);

        tokio::select! {
            () = sleep(delay) => false,
            () = &mut notified => true,
        }
    }
}

/// Executes remote operations under a [`RetryPolicy`].
#[derive(Debug, Clone, Default)]
pub struct Invoker {
    policy: RetryPolicy,
    interrupt: InterruptHandle,
}

impl Invoker {
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            interrupt: InterruptHandle::default(),
        }
    }

    /// Share an interrupt handle with other invokers or an outer caller.
    #[must_use]
    pub fn with_interrupt(mut self, interrupt: InterruptHandle) -> Self {
        self.interrupt = interrupt;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    #[must_use]
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.interrupt.clone()
    }

    /// Run `call` until it succeeds or the attempt budget is spent.
    ///
    /// `operation` names the call (and the identifier it targets) in logs and
    /// in the terminal error. Without a `renewer`, a missing session is
    /// treated like any other failure.
    pub async fn invoke<T, F, Fut>(
        &self,
        operation: &str,
        renewer: Option<&dyn SessionRenewer>,
        mut call: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut remaining = self.policy.max_retries;
        let mut last_error = None;

        loop {
            if remaining == 0 {
                warn!(operation, attempts = self.policy.max_retries, "Exceeded max retries");
                return Err(Error::ExceededRetries {
                    operation: operation.to_string(),
                    attempts: self.policy.max_retries,
                    last_error: last_error.map(Box::new),
                });
            }

            let err = match call().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            warn!(
                operation,
                remaining = remaining - 1,
                error = %err,
                "Call failed, retrying"
            );

            match (Failure::classify(&err), renewer) {
                (Failure::NoSession, Some(renewer)) => {
                    info!(operation, "Session expired, logging in again");
                    renewer.renew().await?;
                }
                (Failure::Throttled, _) => self.backoff(operation, self.policy.throttle_sleep).await,
                _ => self.backoff(operation, self.policy.standard_sleep).await,
            }

            remaining -= 1;
            last_error = Some(err);
        }
    }

    async fn backoff(&self, operation: &str, delay: Duration) {
        debug!(operation, delay_ms = delay.as_millis() as u64, "Backing off");
        if self.interrupt.sleep(delay).await {
            debug!(operation, "Backoff interrupted, continuing");
        }
    }
}
