//! Core types and events for prompt-batch

use serde::{Deserialize, Serialize};

/// One unit of work: an input value plus its original position
///
/// Tasks are created once at batch construction and never mutated. Two tasks
/// may carry an equal `key` (duplicate input lines); they remain distinct
/// tasks by `original_index` and each keeps its own slot in the final result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    /// The raw input line
    pub key: String,
    /// Zero-based position of the line in the input sequence
    pub original_index: usize,
}

impl Task {
    /// Create a new task
    pub fn new(key: impl Into<String>, original_index: usize) -> Self {
        Self {
            key: key.into(),
            original_index,
        }
    }

    /// First 50 characters of the key, for progress lines
    pub fn key_preview(&self) -> String {
        self.key.chars().take(50).collect()
    }
}

/// Final result of fully processing one task, after all retries
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Remote call produced a usable response (trimmed text)
    Success(String),
    /// Task failed after the retry policy was exhausted, or permanently
    Failure(String),
}

impl Outcome {
    /// Whether this outcome is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Render the outcome as output text
    ///
    /// Failures carry the literal `ERROR: ` prefix so downstream formatters
    /// and scripts can distinguish them without inspecting structure.
    pub fn output_text(&self) -> String {
        match self {
            Outcome::Success(text) => text.clone(),
            Outcome::Failure(message) => format!("ERROR: {message}"),
        }
    }
}

/// One completed task with its outcome
///
/// `completion_sequence` is the rank in which the record was produced across
/// all workers. It drives progress display only; final ordering always uses
/// `task.original_index`.
#[derive(Clone, Debug)]
pub struct ExecutionRecord {
    /// The task that was executed
    pub task: Task,
    /// The outcome it produced
    pub outcome: Outcome,
    /// Monotonic completion rank, starting at 1
    pub completion_sequence: usize,
}

/// Summary of a completed batch run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of tasks processed
    pub total: usize,
    /// Number of tasks whose outcome was a failure
    pub errors: usize,
    /// Wall-clock duration of the run in seconds
    pub elapsed_seconds: f64,
}

/// Full result of a batch run
///
/// `results` is the reconciled result set: one `(key, outcome)` entry per
/// input line, in original input order regardless of completion order.
#[derive(Clone, Debug)]
pub struct BatchReport {
    /// Per-input results, sorted by original position
    pub results: Vec<(String, Outcome)>,
    /// Run summary
    pub summary: BatchSummary,
}

/// Events emitted by the executor during a run
///
/// Consumers subscribe via
/// [`BatchExecutor::subscribe`](crate::executor::BatchExecutor::subscribe).
/// Events are best-effort: a slow subscriber may miss events, the run itself
/// is unaffected.
#[derive(Clone, Debug)]
pub enum Event {
    /// A task finished (successfully or not)
    TaskCompleted {
        /// Completion rank of this task (1-based)
        completed: usize,
        /// Total number of tasks in the batch
        total: usize,
        /// Whether the outcome was a success
        ok: bool,
        /// First 50 characters of the input line
        key_preview: String,
    },
    /// All tasks finished and the result set was reconciled
    BatchCompleted {
        /// Run summary
        summary: BatchSummary,
    },
}
