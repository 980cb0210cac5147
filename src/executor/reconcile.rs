//! Order reconciliation - restore original input order over out-of-order
//! completions
//!
//! Sorting keys on `original_index`, never on the input text itself, so
//! duplicate input lines keep their own slots instead of collapsing onto the
//! first occurrence.

use crate::types::{ExecutionRecord, Outcome};

/// Sort records by original position and strip them down to `(key, outcome)`
pub(crate) fn reconcile(mut records: Vec<ExecutionRecord>) -> Vec<(String, Outcome)> {
    records.sort_by_key(|record| record.task.original_index);
    records
        .into_iter()
        .map(|record| (record.task.key, record.outcome))
        .collect()
}
