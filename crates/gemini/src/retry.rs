//! Bounded retry with exponential backoff for upstream invocations.
//!
//! Only rate-limit failures are retried; every other failure class
//! propagates immediately. The backoff sleep is task-local and never blocks
//! unrelated submissions.

use std::time::Duration;

use crate::client::ReviewBackend;
use crate::error::UpstreamError;

/// Tunable parameters for the retry loop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total invocation attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each failure.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after failed attempt `attempt` (1-based):
    /// `base_delay * 2^(attempt - 1)`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Invoke the backend, retrying rate-limit failures up to the policy cap.
///
/// Returns the first successful raw response, or the error that ended the
/// loop: a non-retryable failure, or the final rate-limit error once
/// attempts are exhausted. At most `max_attempts` invocations occur.
pub async fn invoke_with_retry(
    backend: &dyn ReviewBackend,
    prompt: &str,
    policy: &RetryPolicy,
) -> Result<String, UpstreamError> {
    let mut attempt = 0u32;

    loop {
        attempt += 1;

        match backend.invoke(prompt).await {
            Ok(text) => return Ok(text),
            Err(err) if err.is_rate_limited() && attempt < policy.max_attempts => {
                let delay = policy.backoff_delay(attempt);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Upstream rate limited, backing off",
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => {
                tracing::warn!(attempt, error = %err, "Upstream invocation failed");
                return Err(err);
            }
        }
    }
}
