//! # prompt-batch
//!
//! Bounded-concurrency batch execution of one prompt against many inputs.
//!
//! ## Design Philosophy
//!
//! prompt-batch is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Order-preserving** - Results always come back in input order,
//!   regardless of completion order
//! - **Failure-isolating** - One task's failure never aborts the batch
//! - **Substitutable** - The remote client is an explicit trait object, so
//!   tests run against deterministic doubles
//!
//! ## Quick Start
//!
//! ```no_run
//! use prompt_batch::{AnthropicClient, BatchExecutor, Config, PromptTemplate};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(AnthropicClient::from_env()?);
//!     let executor = BatchExecutor::new(client, Config::default());
//!
//!     let template = PromptTemplate::new("translate to Spanish: {input}");
//!     let inputs = prompt_batch::load_inputs("words.txt").await?;
//!
//!     // Watch progress while the batch runs
//!     let mut events = executor.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let report = executor.run(&template, inputs).await?;
//!     for (input, outcome) in &report.results {
//!         println!("{input}: {}", outcome.output_text());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Messages API client and the completion trait
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Batch executor (worker pool, collector, reconciliation)
pub mod executor;
/// Input file loading
pub mod loader;
/// Result rendering (text, CSV, JSON)
pub mod render;
/// Retry policy for transient failures
pub mod retry;
/// Prompt templating
pub mod template;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use client::{AnthropicClient, CompletionClient, DEFAULT_BASE_URL};
pub use config::{Config, MAX_WORKERS, RetryConfig};
pub use error::{AttemptError, Error, Result};
pub use executor::BatchExecutor;
pub use loader::load_inputs;
pub use render::{OutputFormat, render_results, save_results};
pub use template::PromptTemplate;
pub use types::{BatchReport, BatchSummary, Event, ExecutionRecord, Outcome, Task};
