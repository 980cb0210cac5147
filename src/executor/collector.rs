//! Result collector - thread-safe sink for execution records
//!
//! Workers push one record per task as they finish, in whatever order they
//! complete. The collector assigns the completion sequence under the same
//! lock as the append, so sequence numbers always match append order, and
//! emits a progress line plus a broadcast event per record.

use crate::types::{Event, ExecutionRecord, Outcome, Task};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, broadcast};

pub(crate) struct ResultCollector {
    total: usize,
    records: Mutex<Vec<ExecutionRecord>>,
    errors: AtomicUsize,
    event_tx: broadcast::Sender<Event>,
}

impl ResultCollector {
    pub(crate) fn new(total: usize, event_tx: broadcast::Sender<Event>) -> Self {
        Self {
            total,
            records: Mutex::new(Vec::with_capacity(total)),
            errors: AtomicUsize::new(0),
            event_tx,
        }
    }

    /// Append one record and report progress
    ///
    /// Called exactly once per task, by whichever worker completes it.
    pub(crate) async fn record(&self, task: Task, outcome: Outcome) {
        let ok = outcome.is_success();
        if !ok {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        let preview = task.key_preview();
        let sequence = {
            let mut records = self.records.lock().await;
            let sequence = records.len() + 1;
            records.push(ExecutionRecord {
                task,
                outcome,
                completion_sequence: sequence,
            });
            sequence
        };

        let status = if ok { "OK" } else { "ERROR" };
        tracing::info!("[{}/{}] {}: {}", sequence, self.total, status, preview);

        // Best-effort: nobody listening is fine
        let _ = self.event_tx.send(Event::TaskCompleted {
            completed: sequence,
            total: self.total,
            ok,
            key_preview: preview,
        });
    }

    /// Number of failure outcomes recorded so far
    pub(crate) fn error_count(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }

    /// Take the full record set, leaving the collector empty
    pub(crate) async fn take_records(&self) -> Vec<ExecutionRecord> {
        std::mem::take(&mut *self.records.lock().await)
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn collector(total: usize) -> (Arc<ResultCollector>, broadcast::Receiver<Event>) {
        let (tx, rx) = broadcast::channel(64);
        (Arc::new(ResultCollector::new(total, tx)), rx)
    }

    #[tokio::test]
    async fn records_are_appended_with_monotonic_sequence() {
        let (collector, _rx) = collector(3);

        collector
            .record(Task::new("a", 2), Outcome::Success("x".into()))
            .await;
        collector
            .record(Task::new("b", 0), Outcome::Failure("boom".into()))
            .await;
        collector
            .record(Task::new("c", 1), Outcome::Success("y".into()))
            .await;

        let records = collector.take_records().await;
        assert_eq!(records.len(), 3);
        let sequences: Vec<_> = records.iter().map(|r| r.completion_sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert_eq!(collector.error_count(), 1);
    }

    #[tokio::test]
    async fn concurrent_records_are_neither_dropped_nor_duplicated() {
        let (collector, _rx) = collector(100);

        let handles: Vec<_> = (0..100)
            .map(|i| {
                let collector = Arc::clone(&collector);
                tokio::spawn(async move {
                    collector
                        .record(Task::new(format!("item-{i}"), i), Outcome::Success(String::new()))
                        .await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let records = collector.take_records().await;
        assert_eq!(records.len(), 100);

        let mut sequences: Vec<_> = records.iter().map(|r| r.completion_sequence).collect();
        sequences.sort_unstable();
        assert_eq!(sequences, (1..=100).collect::<Vec<_>>());

        let mut indices: Vec<_> = records.iter().map(|r| r.task.original_index).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..100).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn progress_events_are_broadcast() {
        let (collector, mut rx) = collector(2);

        collector
            .record(Task::new("hello world", 0), Outcome::Success("x".into()))
            .await;
        collector
            .record(Task::new("bad", 1), Outcome::Failure("boom".into()))
            .await;

        match rx.recv().await.unwrap() {
            Event::TaskCompleted {
                completed,
                total,
                ok,
                key_preview,
            } => {
                assert_eq!(completed, 1);
                assert_eq!(total, 2);
                assert!(ok);
                assert_eq!(key_preview, "hello world");
            }
            other => panic!("unexpected event: {other:?}"),
        }

        match rx.recv().await.unwrap() {
            Event::TaskCompleted { completed, ok, .. } => {
                assert_eq!(completed, 2);
                assert!(!ok);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
