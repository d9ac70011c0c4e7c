//! In-memory log store for tests and embedding.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::LogStoreError;
use crate::store::traits::{LogCategory, LogRow, LogStore};

/// Log store that keeps rows in memory. Header handling is implicit: the
/// canonical header exists by construction, so `ensure_ready` only records
/// that it ran.
#[derive(Default)]
pub struct MemoryLogStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    ready_calls: usize,
    rows: HashMap<LogCategory, Vec<LogRow>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows appended to one category, in append order.
    pub fn rows(&self, category: LogCategory) -> Vec<LogRow> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .get(&category)
            .cloned()
            .unwrap_or_default()
    }

    /// Total rows across both categories.
    pub fn total_rows(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .rows
            .values()
            .map(Vec::len)
            .sum()
    }

    /// How many times `ensure_ready` has been called.
    pub fn ready_calls(&self) -> usize {
        self.inner.lock().unwrap().ready_calls
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn ensure_ready(&self) -> Result<(), LogStoreError> {
        self.inner.lock().unwrap().ready_calls += 1;
        Ok(())
    }

    async fn append(&self, category: LogCategory, row: &LogRow) -> Result<(), LogStoreError> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .entry(category)
            .or_default()
            .push(row.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(message: &str) -> LogRow {
        LogRow {
            timestamp_utc: "t".into(),
            customer_message: message.into(),
            sentiment: "Neutral".into(),
            intent: "Other".into(),
            urgency_score: 2,
            summary_hy: "x".into(),
            suggested_reply: "y".into(),
            lead_tag: String::new(),
            email_status: String::new(),
            email_error: String::new(),
        }
    }

    #[tokio::test]
    async fn appends_are_kept_per_category() {
        let store = MemoryLogStore::new();
        store.ensure_ready().await.unwrap();
        store.append(LogCategory::Crm, &row("a")).await.unwrap();
        store
            .append(LogCategory::SupportTickets, &row("b"))
            .await
            .unwrap();

        assert_eq!(store.rows(LogCategory::Crm).len(), 1);
        assert_eq!(store.rows(LogCategory::SupportTickets).len(), 1);
        assert_eq!(store.total_rows(), 2);
        assert_eq!(store.ready_calls(), 1);
    }
}
