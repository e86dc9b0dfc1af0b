//! Retry with exponential backoff for idempotent source requests.
//!
//! Only safe methods are retried, and only on outcomes the attempt itself
//! classified as [`Lookup::TransientError`] (rate limiting, 5xx gateway
//! trouble, connect failures, timeouts). The delay before retry `n` is
//! `base_delay * 2^(n-1)`, capped at `max_delay`; a server-sent
//! `Retry-After` wins when it asks for longer.

use std::future::Future;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Method, StatusCode};
use tokio::time::Duration;

use crate::lookup::Lookup;

/// Status codes worth retrying.
pub const RETRY_STATUSES: &[u16] = &[429, 500, 502, 503, 504];

/// Result of a single attempt plus any server backoff hint.
#[derive(Debug)]
pub struct Attempt<T> {
    pub outcome: Lookup<T>,
    pub retry_after: Option<Duration>,
}

impl<T> Attempt<T> {
    pub fn new(outcome: Lookup<T>) -> Self {
        Self {
            outcome,
            retry_after: None,
        }
    }

    /// Reinterpret a found value, keeping the backoff hint.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Lookup<U>) -> Attempt<U> {
        Attempt {
            outcome: self.outcome.and_then(f),
            retry_after: self.retry_after,
        }
    }
}

impl<T> From<Lookup<T>> for Attempt<T> {
    fn from(outcome: Lookup<T>) -> Self {
        Self::new(outcome)
    }
}

/// Retry ceiling and backoff schedule.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            ..Self::default()
        }
    }

    pub fn is_retryable_status(status: StatusCode) -> bool {
        RETRY_STATUSES.contains(&status.as_u16())
    }

    /// GET, HEAD and OPTIONS are safe to repeat.
    pub fn is_safe_method(method: &Method) -> bool {
        *method == Method::GET || *method == Method::HEAD || *method == Method::OPTIONS
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let backoff = self
            .base_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay);
        match retry_after {
            Some(hint) if hint > backoff => hint.min(self.max_delay),
            _ => backoff,
        }
    }

    /// Run `attempt` until it stops reporting a transient error or the
    /// ceiling is reached. A transient error on the last allowed attempt, or
    /// on a method that is not safe to repeat, degrades to `NotFound`.
    pub async fn run<T, F, Fut>(&self, method: &Method, label: &str, mut attempt: F) -> Lookup<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Attempt<T>>,
    {
        let retryable = Self::is_safe_method(method);
        let mut n = 0u32;
        loop {
            n += 1;
            let Attempt {
                outcome,
                retry_after,
            } = attempt().await;

            let cause = match outcome {
                Lookup::TransientError(cause) => cause,
                other => return other,
            };

            if !retryable || n >= self.max_attempts {
                log::warn!("{}: giving up after {} attempt(s): {}", label, n, cause);
                return Lookup::NotFound;
            }

            let delay = self.delay_for(n, retry_after);
            log::debug!(
                "{}: attempt {}/{} failed ({}), retrying in {:?}",
                label,
                n,
                self.max_attempts,
                cause,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}

/// Parse a `Retry-After` header given in seconds. HTTP-date values are ignored.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
#[path = "tests/retry_tests.rs"]
mod tests;
