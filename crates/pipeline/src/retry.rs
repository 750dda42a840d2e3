//! Attempt loop shared by every remote adapter.
//!
//! Whether a failure is retried is decided by [`RemoteError::retry_policy`]
//! alone. A `Retry-After` hint replaces the exponential delay for that attempt.

use std::future::Future;
use std::time::Duration;

use crate::errors::{RemoteError, RetryPolicy};

/// How often and how patiently a remote call is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    /// Total attempts, including the first. Values below 1 behave as 1.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for each further one.
    pub base_backoff: Duration,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_secs(1),
        }
    }
}

impl RetrySettings {
    /// Delay after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32, hint: Option<Duration>) -> Duration {
        hint.unwrap_or_else(|| {
            let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
            self.base_backoff.saturating_mul(factor)
        })
    }
}

/// Runs `call` until it succeeds, fails with a non-retryable error, or the
/// attempt budget is spent. The last error is returned unchanged.
pub async fn retry_remote<T, F, Fut>(
    settings: RetrySettings,
    operation: &str,
    mut call: F,
) -> Result<T, RemoteError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RemoteError>>,
{
    let max_attempts = settings.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        let err = match call().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        let RetryPolicy::Retryable { after } = err.retry_policy() else {
            return Err(err);
        };
        if attempt >= max_attempts {
            return Err(err);
        }

        let delay = settings.delay_after(attempt, after);
        tracing::warn!(
            operation,
            attempt,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Retrying remote call"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
