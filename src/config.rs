//! Configuration types for prompt-batch

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hard ceiling on concurrent workers, regardless of the requested pool size
///
/// Bounds simultaneous outbound load on the remote service. Requests above
/// the ceiling are clamped silently, not rejected.
pub const MAX_WORKERS: usize = 10;

/// Retry behavior for transient remote failures
///
/// The defaults encode the batch retry policy: at most two call attempts per
/// task with one fixed backoff between them. A failure of any class on the
/// final attempt is terminal for that task.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total call attempts per task, including the first (default: 2)
    #[serde(default = "default_retry_attempts")]
    pub max_attempts: u32,

    /// Fixed delay before a retried attempt (default: 5s)
    #[serde(default = "default_retry_backoff")]
    pub backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_retry_attempts(),
            backoff: default_retry_backoff(),
        }
    }
}

/// Main configuration for a batch run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Requested pool size; clamped to [`MAX_WORKERS`] (default: 3)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Model identifier, opaque to the executor (default: haiku for speed/cost)
    #[serde(default = "default_model")]
    pub model: String,

    /// Response size cap, passed through to each remote call (default: 256)
    ///
    /// Must be at least 1; a run with `max_tokens == 0` is rejected before
    /// any task is dispatched.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Retry behavior for transient failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// Pool size actually used for dispatch
    ///
    /// Clamped to `1..=MAX_WORKERS`. The clamp is silent: requesting more
    /// workers than the ceiling is not an error, the excess is ignored.
    pub fn effective_workers(&self) -> usize {
        self.workers.clamp(1, MAX_WORKERS)
    }
}

fn default_workers() -> usize {
    3
}

fn default_model() -> String {
    "claude-haiku-4-5-20251001".to_string()
}

fn default_max_tokens() -> u32 {
    256
}

fn default_retry_attempts() -> u32 {
    2
}

fn default_retry_backoff() -> Duration {
    Duration::from_secs(5)
}
