//! Shared types for the triage pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Classification ──────────────────────────────────────────────────

/// Message intent as classified by the model.
///
/// This is the only enumerated model field the validator enforces; an
/// out-of-set value fails the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Sales,
    Support,
    Spam,
    Other,
}

impl Intent {
    /// Parse one of the four allowed wire values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Sales" => Some(Self::Sales),
            "Support" => Some(Self::Support),
            "Spam" => Some(Self::Spam),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Support => "Support",
            Self::Spam => "Spam",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated model output for one customer message.
///
/// `sentiment` and `summary` are passed through as the model produced them;
/// only intent membership and the urgency range are enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub sentiment: String,
    pub intent: Intent,
    /// Integer in 1..=10.
    pub urgency_score: u8,
    /// Armenian one-line summary (by prompt contract, not checked).
    pub summary: String,
    pub suggested_reply: String,
}

// ── Routing outcome ─────────────────────────────────────────────────

/// Terminal routing case for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutedCase {
    SpamNoAction,
    Sales,
    SalesHotLead,
    Support,
    Other,
}

impl RoutedCase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpamNoAction => "SPAM_NO_ACTION",
            Self::Sales => "SALES",
            Self::SalesHotLead => "SALES_HOT_LEAD",
            Self::Support => "SUPPORT",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for RoutedCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the hot-lead notification attempt.
///
/// Serializes to the empty string until a send is actually attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EmailStatus {
    #[default]
    #[serde(rename = "")]
    NotAttempted,
    #[serde(rename = "SENT")]
    Sent,
    #[serde(rename = "FAILED")]
    Failed,
}

impl EmailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAttempted => "",
            Self::Sent => "SENT",
            Self::Failed => "FAILED",
        }
    }
}

// ── Merged report ───────────────────────────────────────────────────

/// The merged record returned to the caller: the five classification fields
/// plus the routing metadata for this invocation.
#[derive(Debug, Clone, Serialize)]
pub struct TriageReport {
    pub sentiment: String,
    pub intent: Intent,
    pub urgency_score: u8,
    pub summary: String,
    pub suggested_reply: String,
    pub routed_case: RoutedCase,
    /// "" or "HOT LEAD".
    pub lead_tag: String,
    pub email_status: EmailStatus,
    /// Empty unless `email_status` is FAILED.
    pub email_error: String,
}

impl TriageReport {
    /// Build a report with an empty routing tail.
    pub fn new(classification: Classification, routed_case: RoutedCase) -> Self {
        Self {
            sentiment: classification.sentiment,
            intent: classification.intent,
            urgency_score: classification.urgency_score,
            summary: classification.summary,
            suggested_reply: classification.suggested_reply,
            routed_case,
            lead_tag: String::new(),
            email_status: EmailStatus::NotAttempted,
            email_error: String::new(),
        }
    }
}
