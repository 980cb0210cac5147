//! Batch executor - bounded worker pool, retry, and order reconciliation
//!
//! The executor takes an ordered sequence of inputs, fans them out to a
//! fixed-size pool of workers against a [`CompletionClient`], applies the
//! retry policy to transient failures, and reassembles results in original
//! input order once every task has completed. One task's failure never
//! aborts the batch; it surfaces as a `Failure` outcome in that task's slot.

mod collector;
mod reconcile;

use crate::client::CompletionClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::retry::call_with_retry;
use crate::template::PromptTemplate;
use crate::types::{BatchReport, BatchSummary, Event, Outcome, Task};
use collector::ResultCollector;
use reconcile::reconcile;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Semaphore, broadcast};

/// Capacity of the progress event channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Bounded-concurrency batch executor
///
/// Created once per batch with an explicit client handle and configuration.
/// The pool lives for the duration of [`run`](Self::run) and is torn down
/// when it returns; there is no cross-batch state.
pub struct BatchExecutor {
    client: Arc<dyn CompletionClient>,
    config: Config,
    event_tx: broadcast::Sender<Event>,
}

impl BatchExecutor {
    /// Create an executor over a completion client
    pub fn new(client: Arc<dyn CompletionClient>, config: Config) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            client,
            config,
            event_tx,
        }
    }

    /// Subscribe to progress events for runs on this executor
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Run a batch to completion
    ///
    /// Dispatches every input exactly once, bounded by the effective worker
    /// count, then blocks until all tasks have produced a record (a full
    /// join, not a streaming return). Returns the reconciled result set in
    /// original input order together with a run summary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBatch`] if `inputs` is empty and
    /// [`Error::Config`] if the configuration cannot produce a usable
    /// response (`max_tokens == 0`); nothing is dispatched in either case.
    /// Task-level failures are never an error here.
    pub async fn run(&self, template: &PromptTemplate, inputs: Vec<String>) -> Result<BatchReport> {
        if inputs.is_empty() {
            return Err(Error::EmptyBatch);
        }

        if self.config.max_tokens == 0 {
            return Err(Error::Config {
                message: "max_tokens must be at least 1".to_string(),
                key: Some("max_tokens".to_string()),
            });
        }

        let tasks: Vec<Task> = inputs
            .into_iter()
            .enumerate()
            .map(|(index, key)| Task::new(key, index))
            .collect();
        let total = tasks.len();
        let workers = self.config.effective_workers();

        tracing::info!(
            total,
            workers,
            model = %self.config.model,
            "dispatching batch"
        );

        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(workers));
        let collector = Arc::new(ResultCollector::new(total, self.event_tx.clone()));

        let handles: Vec<_> = tasks
            .into_iter()
            .map(|task| {
                let semaphore = Arc::clone(&semaphore);
                let collector = Arc::clone(&collector);
                let client = Arc::clone(&self.client);
                let retry = self.config.retry.clone();
                let model = self.config.model.clone();
                let max_tokens = self.config.max_tokens;
                let prompt = template.render(&task.key);
                let handle_task = task.clone();

                let handle = tokio::spawn(async move {
                    let outcome = match semaphore.acquire_owned().await {
                        Ok(_permit) => {
                            let result = call_with_retry(&retry, || {
                                client.complete(&model, max_tokens, &prompt)
                            })
                            .await;

                            match result {
                                Ok(text) => Outcome::Success(text),
                                Err(e) => Outcome::Failure(e.to_string()),
                            }
                        }
                        // The semaphore is never closed during a run; record a
                        // failure rather than lose the task if that changes
                        Err(_) => Outcome::Failure("worker pool closed".to_string()),
                    };

                    collector.record(handle_task, outcome).await;
                });

                (task, handle)
            })
            .collect();

        // Full join barrier: every task yields exactly one record before
        // reconciliation, even if a worker panics
        let joined = futures::future::join_all(
            handles
                .into_iter()
                .map(|(task, handle)| async move { (task, handle.await) }),
        )
        .await;

        for (task, result) in joined {
            if let Err(e) = result {
                tracing::error!(
                    error = %e,
                    index = task.original_index,
                    "worker task aborted"
                );
                collector
                    .record(task, Outcome::Failure(format!("worker aborted: {e}")))
                    .await;
            }
        }

        let records = collector.take_records().await;
        debug_assert_eq!(records.len(), total);

        let summary = BatchSummary {
            total,
            errors: collector.error_count(),
            elapsed_seconds: start.elapsed().as_secs_f64(),
        };

        tracing::info!(
            total = summary.total,
            errors = summary.errors,
            elapsed_seconds = summary.elapsed_seconds,
            "batch complete"
        );

        let _ = self.event_tx.send(Event::BatchCompleted {
            summary: summary.clone(),
        });

        Ok(BatchReport {
            results: reconcile(records),
            summary,
        })
    }
}
