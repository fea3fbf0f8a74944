//! Client-side transaction log.
//!
//! Records summarise the outcome of one withdrawal or deposit attempt. They
//! live in memory only and are never mutated after being recorded.

pub mod record;

pub use record::{TransactionKind, TransactionRecord, TransactionStatus};

use std::collections::VecDeque;
use tracing::debug;

/// Number of records shown in the history panel.
pub const DISPLAY_LIMIT: usize = 5;

/// Default number of records kept in memory.
pub const DEFAULT_CAPACITY: usize = 20;

/// Fixed-capacity log of transaction records, most recent first.
///
/// When full, recording a new entry evicts the oldest one.
#[derive(Debug, Clone)]
pub struct History {
    records: VecDeque<TransactionRecord>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl History {
    /// Create an empty history. A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend a record, evicting the oldest one if the log is full.
    pub fn record(&mut self, record: TransactionRecord) {
        if self.records.len() == self.capacity {
            if let Some(evicted) = self.records.pop_back() {
                debug!(id = %evicted.id, "Evicted oldest transaction record");
            }
        }

        debug!(
            id = %record.id,
            kind = ?record.kind,
            status = ?record.status,
            "Recorded transaction"
        );
        self.records.push_front(record);
    }

    /// The `limit` most recent records, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter().take(limit)
    }

    /// Records shown in the history panel.
    pub fn displayed(&self) -> Vec<TransactionRecord> {
        self.recent(DISPLAY_LIMIT).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn record(id: &str) -> TransactionRecord {
        TransactionRecord::withdrawal(
            Some(id.to_string()),
            Decimal::from(500),
            withdrawal::WithdrawalMethod::Bank,
            TransactionStatus::Success,
            "ok",
            None,
        )
    }

    fn ids<'a>(records: impl Iterator<Item = &'a TransactionRecord>) -> Vec<&'a str> {
        records.map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_most_recent_first() {
        let mut history = History::default();
        history.record(record("T1"));
        history.record(record("T2"));
        history.record(record("T3"));

        assert_eq!(ids(history.recent(10)), vec!["T3", "T2", "T1"]);
    }

    #[test]
    fn test_display_limited_to_five() {
        let mut history = History::default();
        for i in 1..=8 {
            history.record(record(&format!("T{i}")));
        }

        let shown = history.displayed();
        assert_eq!(shown.len(), DISPLAY_LIMIT);
        assert_eq!(shown[0].id, "T8");
        assert_eq!(shown[4].id, "T4");
        assert_eq!(history.len(), 8);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::with_capacity(3);
        for i in 1..=5 {
            history.record(record(&format!("T{i}")));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(ids(history.recent(10)), vec!["T5", "T4", "T3"]);
    }

    #[test]
    fn test_zero_capacity_keeps_latest() {
        let mut history = History::with_capacity(0);
        history.record(record("T1"));
        history.record(record("T2"));

        assert_eq!(history.capacity(), 1);
        assert_eq!(ids(history.recent(10)), vec!["T2"]);
    }
}
