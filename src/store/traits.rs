//! Backend-agnostic `LogStore` trait and the row/category contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LogStoreError;

/// Canonical column header for every log category, in row order.
pub const CANONICAL_HEADER: [&str; 10] = [
    "timestamp_utc",
    "customer_message",
    "sentiment",
    "intent",
    "urgency_score",
    "summary_hy",
    "suggested_reply",
    "lead_tag",
    "email_status",
    "email_error",
];

/// The two named log categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogCategory {
    Crm,
    SupportTickets,
}

impl LogCategory {
    /// Display name, as a spreadsheet tab would be titled.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Crm => "CRM",
            Self::SupportTickets => "Support Tickets",
        }
    }

    /// File stem used by file-backed stores.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::Crm => "crm",
            Self::SupportTickets => "support_tickets",
        }
    }

    pub const ALL: [LogCategory; 2] = [Self::Crm, Self::SupportTickets];
}

/// One appended record. Field order matches [`CANONICAL_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRow {
    pub timestamp_utc: String,
    pub customer_message: String,
    pub sentiment: String,
    pub intent: String,
    pub urgency_score: u8,
    pub summary_hy: String,
    pub suggested_reply: String,
    pub lead_tag: String,
    pub email_status: String,
    pub email_error: String,
}

/// Append-only log store with two named categories.
///
/// Appends are independent open-write-persist cycles; there is no locking
/// across writers, so concurrent invocations sharing one store race
/// (last writer wins).
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Idempotently guarantee both categories exist with the canonical
    /// header as row 1, preserving any data rows already present.
    async fn ensure_ready(&self) -> Result<(), LogStoreError>;

    /// Append one row to the given category and persist.
    async fn append(&self, category: LogCategory, row: &LogRow) -> Result<(), LogStoreError>;
}
