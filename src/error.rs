//! Error types for prompt-batch
//!
//! Two layers of failure exist here and they are deliberately separate:
//! - [`Error`] covers batch-level preconditions and I/O around a run. These
//!   abort the whole operation before any work is dispatched.
//! - [`AttemptError`] classifies a single remote call attempt. These never
//!   escape the worker pool; they are captured as a `Failure` outcome local
//!   to one task.

use thiserror::Error;

/// Result type alias for prompt-batch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Batch-level error type
///
/// Raised for precondition violations before dispatch begins and for I/O
/// around loading inputs or saving results. A task failing during execution
/// is never an `Error`; it surfaces as a `Failure` outcome in that task's
/// slot of the final result set.
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing to process - the batch would be empty
    #[error("empty batch: no inputs to process")]
    EmptyBatch,

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "workers")
        key: Option<String>,
    },

    /// API key not provided and not found in the environment
    #[error("missing API key: set ANTHROPIC_API_KEY or pass a key explicitly")]
    MissingApiKey,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure classification for one remote call attempt
///
/// Produced by a [`CompletionClient`](crate::client::CompletionClient)
/// implementation. Only [`AttemptError::RateLimited`] is transient; every
/// other variant is permanent and terminates the task without a retry.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// Remote service reported overload or throttling; retried once after backoff
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// HTTP transport failure (connect, timeout, malformed body)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status from the API that is not a throttle signal
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code returned by the service
        status: u16,
        /// Response body, as far as it could be read
        message: String,
    },

    /// Response parsed but did not contain a usable text block
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
