//! Retry policy for remote call attempts
//!
//! Wraps one execution-unit invocation per task. Transient failures get a
//! single retry after a fixed backoff; permanent failures terminate
//! immediately. The fixed delay caps a task's worst-case latency at
//! `backoff + 2 x call latency` and keeps a saturated call from stalling
//! more than one pool slot for more than one backoff interval.
//!
//! # Example
//!
//! ```no_run
//! use prompt_batch::retry::{IsRetryable, call_with_retry};
//! use prompt_batch::config::RetryConfig;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     Transient,
//!     Permanent,
//! }
//!
//! impl std::fmt::Display for MyError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "{self:?}")
//!     }
//! }
//!
//! impl IsRetryable for MyError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, MyError::Transient)
//!     }
//! }
//!
//! # async fn example() -> Result<(), MyError> {
//! let config = RetryConfig::default();
//! let result = call_with_retry(&config, || async {
//!     // Your operation here
//!     Ok::<_, MyError>(())
//! }).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::RetryConfig;
use crate::error::AttemptError;
use std::future::Future;

/// Trait for errors that can be classified as retryable or not
///
/// Transient failures (rate limiting, service overload) should return `true`.
/// Permanent failures (bad request, malformed response, transport faults)
/// should return `false`.
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for AttemptError {
    fn is_retryable(&self) -> bool {
        match self {
            // Overload/throttle signals from the service are the only
            // transient class; everything else fails the task outright
            AttemptError::RateLimited(_) => true,
            AttemptError::Network(_) => false,
            AttemptError::Api { .. } => false,
            AttemptError::MalformedResponse(_) => false,
        }
    }
}

/// Execute an async operation under the retry policy
///
/// Runs `operation` up to `config.max_attempts` times, sleeping
/// `config.backoff` before each retried attempt. Only retryable errors
/// trigger a retry; a retryable error on the final attempt is returned
/// as-is, so callers always see the last attempt's error.
///
/// # Example
///
/// ```no_run
/// use prompt_batch::retry::call_with_retry;
/// use prompt_batch::config::RetryConfig;
/// use prompt_batch::error::AttemptError;
///
/// # async fn example() -> Result<(), AttemptError> {
/// let config = RetryConfig::default();
/// let text = call_with_retry(&config, || async {
///     Ok::<String, AttemptError>("response".to_string())
/// }).await?;
/// # Ok(())
/// # }
/// ```
pub async fn call_with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let mut attempt: u32 = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!(attempts = attempt, "call succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) if e.is_retryable() && attempt < config.max_attempts => {
                tracing::warn!(
                    error = %e,
                    attempt = attempt,
                    max_attempts = config.max_attempts,
                    backoff_ms = config.backoff.as_millis(),
                    "transient failure, retrying after backoff"
                );

                tokio::time::sleep(config.backoff).await;
                attempt += 1;
            }
            Err(e) => {
                if e.is_retryable() {
                    tracing::warn!(
                        error = %e,
                        attempts = attempt,
                        "call failed after all retry attempts exhausted"
                    );
                } else {
                    tracing::warn!(error = %e, "call failed with non-retryable error");
                }
                return Err(e);
            }
        }
    }
}
