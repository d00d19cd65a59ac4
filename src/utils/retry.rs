//! Retry utilities for resilient operations
//!
//! The pagination endpoint distinguishes three outcomes per attempt: a usable
//! result, a clear rejection that must not be retried, and an ambiguous answer
//! worth trying again after a fixed pause. [`with_retry`] drives that loop and
//! reports exhaustion as `Ok(None)` rather than as an error.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,

    /// Fixed delay in milliseconds between attempts
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay_ms: 20_000,
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration with custom attempt count
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    /// Create a retry configuration with a custom delay
    pub fn with_delay(max_attempts: u32, delay_ms: u64) -> Self {
        Self {
            max_attempts,
            delay_ms,
        }
    }

    /// Delay observed before the given attempt (0-based)
    fn calculate_delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(self.delay_ms)
        }
    }
}

/// Outcome of a single attempt
#[derive(Debug)]
pub enum Attempt<T, E> {
    /// The operation produced a result
    Done(T),

    /// The operation failed in a way that must not be retried
    Fatal(E),

    /// The operation gave an ambiguous answer; the string describes it for logging
    Retry(String),
}

/// Execute an operation with fixed-delay retry
///
/// The closure receives the 1-based attempt number. Returns `Ok(Some(T))` on
/// success, `Err(E)` on the first fatal outcome and `Ok(None)` once every
/// attempt has asked for a retry.
///
/// # Example
///
/// ```no_run
/// use ytcomments::utils::retry::{with_retry, Attempt, RetryConfig};
///
/// #[tokio::main]
/// async fn main() {
///     let config = RetryConfig::with_delay(3, 10);
///     let result: Result<Option<u32>, String> =
///         with_retry(&config, |_attempt| async { Attempt::Done(42) }).await;
///     assert_eq!(result, Ok(Some(42)));
/// }
/// ```
pub async fn with_retry<T, E, F, Fut>(config: &RetryConfig, mut operation: F) -> Result<Option<T>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Attempt<T, E>>,
{
    for attempt in 0..config.max_attempts {
        if attempt > 0 {
            let delay = config.calculate_delay(attempt);
            debug!(
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                "Retrying operation after delay"
            );
            tokio::time::sleep(delay).await;
        }

        match operation(attempt + 1).await {
            Attempt::Done(result) => {
                if attempt > 0 {
                    debug!(attempt = attempt + 1, "Operation succeeded after retry");
                }
                return Ok(Some(result));
            }
            Attempt::Fatal(e) => return Err(e),
            Attempt::Retry(reason) => {
                warn!(
                    attempt = attempt + 1,
                    max_attempts = config.max_attempts,
                    reason = %reason,
                    "Ambiguous response, will retry"
                );
            }
        }
    }

    warn!(
        max_attempts = config.max_attempts,
        "Retries exhausted, giving up without data"
    );
    Ok(None)
}
