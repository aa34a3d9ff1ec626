//! Retry policy for transient failures.
//!
//! The client makes up to [`RetryPolicy::max_attempts`] physical attempts per
//! logical request. Which errors are retried is fixed by
//! [`Error::is_retryable`](crate::Error::is_retryable); this module only
//! decides how many attempts are made and how long to wait between them.

use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;

/// Default number of total attempts per request.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Default backoff unit. The wait after failed attempt `k` is `2^k` units.
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_secs(1);

/// Defines how many times and how long apart a request is attempted.
///
/// # Examples
///
/// ```
/// use unbrowser::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.delay_after_attempt(1), Some(Duration::from_secs(2)));
/// assert_eq!(policy.delay_after_attempt(2), Some(Duration::from_secs(4)));
/// assert_eq!(policy.delay_after_attempt(3), None);
///
/// let disabled = RetryPolicy::disabled();
/// assert_eq!(disabled.total_attempts(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Whether failed requests are retried at all.
    pub enabled: bool,
    /// Total attempts including the first one. Values below 1 act as 1.
    pub max_attempts: usize,
    /// Base unit of the exponential backoff.
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Number of physical attempts a request may use.
    pub fn total_attempts(&self) -> usize {
        if self.enabled {
            self.max_attempts.max(1)
        } else {
            1
        }
    }

    /// Returns the wait after the given failed attempt (1-indexed), or `None`
    /// when that attempt was the last one allowed.
    ///
    /// The delay is `backoff_unit * 2^attempt`, without jitter.
    pub fn delay_after_attempt(&self, attempt: usize) -> Option<Duration> {
        if attempt >= self.total_attempts() {
            return None;
        }
        let exponent = u32::try_from(attempt).unwrap_or(u32::MAX);
        let multiplier = 2u32.saturating_pow(exponent);
        Some(self.backoff_unit.saturating_mul(multiplier))
    }

    /// Drives `operation` until it succeeds, fails with a terminal error, or
    /// runs out of attempts.
    ///
    /// The closure receives the 1-indexed attempt number. On success the value
    /// is returned along with the number of attempts used. When every attempt
    /// fails the last error is returned unchanged.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<(T, usize)>
    where
        F: FnMut(usize) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.total_attempts();
        let mut last_error = None;

        for attempt in 1..=attempts {
            match operation(attempt).await {
                Ok(value) => return Ok((value, attempt)),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        code = e.code(),
                        attempt = attempt,
                        max_attempts = attempts,
                        "Request attempt failed"
                    );

                    if !e.is_retryable() {
                        return Err(e);
                    }

                    if let Some(delay) = self.delay_after_attempt(attempt) {
                        tracing::info!(
                            delay_ms = delay.as_millis(),
                            attempt = attempt,
                            "Retrying request after delay"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::api("UNKNOWN_ERROR", "Request failed")))
    }
}
