//! CSV workbook backend — one directory, one file per category.
//!
//! `ensure_ready` is self-healing: a missing or empty category file gets the
//! canonical header written as row 1, and a file whose first row drifted from
//! the canonical header has row 1 rewritten in place with all data rows kept.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::LogStoreError;
use crate::store::traits::{CANONICAL_HEADER, LogCategory, LogRow, LogStore};

/// File-backed log store rooted at a workbook directory.
pub struct CsvLogStore {
    root: PathBuf,
}

impl CsvLogStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of one category's file inside the workbook directory.
    pub fn category_path(&self, category: LogCategory) -> PathBuf {
        self.root.join(format!("{}.csv", category.file_stem()))
    }

    fn header_line() -> String {
        CANONICAL_HEADER.join(",")
    }

    /// Enforce the canonical header on one category file.
    fn ensure_header(path: &Path) -> Result<(), LogStoreError> {
        let header = Self::header_line();

        if !path.exists() {
            fs::write(path, format!("{header}\n"))?;
            info!(path = %path.display(), "Created log category");
            return Ok(());
        }

        let contents = fs::read_to_string(path)?;
        if contents.is_empty() {
            fs::write(path, format!("{header}\n"))?;
            return Ok(());
        }

        let (first_line, rest) = match contents.split_once('\n') {
            Some((first, rest)) => (first, rest),
            None => (contents.as_str(), ""),
        };

        if first_line.trim_end_matches('\r') == header {
            return Ok(());
        }

        // Row 1 drifted: rewrite it, keep every data row below.
        debug!(path = %path.display(), "Rewriting non-canonical header row");
        fs::write(path, format!("{header}\n{rest}"))?;
        Ok(())
    }
}

#[async_trait]
impl LogStore for CsvLogStore {
    async fn ensure_ready(&self) -> Result<(), LogStoreError> {
        fs::create_dir_all(&self.root)?;
        for category in LogCategory::ALL {
            Self::ensure_header(&self.category_path(category))?;
        }
        Ok(())
    }

    async fn append(&self, category: LogCategory, row: &LogRow) -> Result<(), LogStoreError> {
        let path = self.category_path(category);
        if !path.exists() {
            return Err(LogStoreError::NotReady(format!(
                "{} missing at {}",
                category.name(),
                path.display()
            )));
        }

        let file = OpenOptions::new().append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(row)?;
        writer.flush()?;

        debug!(category = category.name(), "Appended log row");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(message: &str) -> LogRow {
        LogRow {
            timestamp_utc: "2025-06-01T12:00:00+00:00".into(),
            customer_message: message.into(),
            sentiment: "Neutral".into(),
            intent: "Support".into(),
            urgency_score: 4,
            summary_hy: "հարցում".into(),
            suggested_reply: "We are on it.".into(),
            lead_tag: String::new(),
            email_status: String::new(),
            email_error: String::new(),
        }
    }

    #[tokio::test]
    async fn ensure_ready_creates_both_categories_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLogStore::new(dir.path().join("log"));
        store.ensure_ready().await.unwrap();

        for category in LogCategory::ALL {
            let contents = fs::read_to_string(store.category_path(category)).unwrap();
            assert_eq!(contents, format!("{}\n", CANONICAL_HEADER.join(",")));
        }
    }

    #[tokio::test]
    async fn ensure_ready_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLogStore::new(dir.path());
        store.ensure_ready().await.unwrap();
        store
            .append(LogCategory::Crm, &sample_row("hello"))
            .await
            .unwrap();

        let before = fs::read_to_string(store.category_path(LogCategory::Crm)).unwrap();
        store.ensure_ready().await.unwrap();
        let after = fs::read_to_string(store.category_path(LogCategory::Crm)).unwrap();

        assert_eq!(before, after);
        // One header, one data row — no duplicated header.
        assert_eq!(after.lines().count(), 2);
    }

    #[tokio::test]
    async fn ensure_ready_heals_corrupted_header_and_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLogStore::new(dir.path());
        store.ensure_ready().await.unwrap();
        store
            .append(LogCategory::SupportTickets, &sample_row("row one"))
            .await
            .unwrap();

        // Corrupt row 1.
        let path = store.category_path(LogCategory::SupportTickets);
        let contents = fs::read_to_string(&path).unwrap();
        let data = contents.split_once('\n').unwrap().1.to_string();
        fs::write(&path, format!("bogus,header\n{data}")).unwrap();

        store.ensure_ready().await.unwrap();

        let healed = fs::read_to_string(&path).unwrap();
        let mut lines = healed.lines();
        assert_eq!(lines.next().unwrap(), CANONICAL_HEADER.join(","));
        let row = lines.next().unwrap();
        assert!(row.contains("row one"));
        assert!(lines.next().is_none());
    }

    #[tokio::test]
    async fn ensure_ready_handles_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLogStore::new(dir.path());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(store.category_path(LogCategory::Crm), "").unwrap();

        store.ensure_ready().await.unwrap();
        let contents = fs::read_to_string(store.category_path(LogCategory::Crm)).unwrap();
        assert_eq!(contents, format!("{}\n", CANONICAL_HEADER.join(",")));
    }

    #[tokio::test]
    async fn append_without_ensure_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLogStore::new(dir.path().join("nope"));
        let err = store
            .append(LogCategory::Crm, &sample_row("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, LogStoreError::NotReady(_)));
    }

    #[tokio::test]
    async fn append_quotes_messages_with_commas_and_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLogStore::new(dir.path());
        store.ensure_ready().await.unwrap();
        store
            .append(
                LogCategory::Crm,
                &sample_row("Hello, team.\nSecond line."),
            )
            .await
            .unwrap();

        let path = store.category_path(LogCategory::Crm);
        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<LogRow> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].customer_message, "Hello, team.\nSecond line.");
    }

    #[tokio::test]
    async fn appends_accumulate_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLogStore::new(dir.path());
        store.ensure_ready().await.unwrap();
        for i in 0..3 {
            store
                .append(LogCategory::Crm, &sample_row(&format!("msg {i}")))
                .await
                .unwrap();
        }

        let mut reader = csv::Reader::from_path(store.category_path(LogCategory::Crm)).unwrap();
        let rows: Vec<LogRow> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].customer_message, "msg 2");
    }
}
