//! Bounded retry with timeout
//!
//! Every external call (zone store, restriction store, postal lookup) goes
//! through [`with_retry`]. Each attempt is bounded by `policy.timeout`; only
//! transient errors are retried, with linear backoff between attempts.

use shared::error::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;

/// Retry policy for one external call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Upper bound for a single attempt
    pub timeout: Duration,
    /// Total attempts, including the first one (min 1)
    pub max_attempts: u32,
    /// Linear backoff unit: attempt N waits `backoff * N`
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(8000),
            max_attempts: 2,
            backoff: Duration::from_millis(1500),
        }
    }
}

impl RetryPolicy {
    pub fn new(timeout: Duration, max_attempts: u32, backoff: Duration) -> Self {
        Self {
            timeout,
            max_attempts,
            backoff,
        }
    }

    /// Single attempt, no backoff
    pub fn once(timeout: Duration) -> Self {
        Self::new(timeout, 1, Duration::ZERO)
    }

    /// Delay before the attempt following `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff * attempt
    }
}

/// Run `call` under `policy`
///
/// `operation` names the call in logs and timeout errors ("zones.list_active").
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, operation: &str, mut call: F) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let timeout_ms = u64::try_from(policy.timeout.as_millis()).unwrap_or(u64::MAX);
    let mut attempt = 1;

    loop {
        let result = match tokio::time::timeout(policy.timeout, call()).await {
            Ok(result) => result,
            Err(_) => Err(AppError::timeout(operation, timeout_ms)),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < max_attempts => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    operation,
                    attempt,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %e,
                    "External call failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if e.is_transient() {
                    tracing::error!(operation, attempt, error = %e, "External call failed, giving up");
                }
                return Err(e);
            }
        }
    }
}
