//! Triage router — classifies one message and routes it to its terminal case.
//!
//! Flow for one invocation:
//! 1. `LogStore::ensure_ready()` — before anything else
//! 2. `Classifier::classify()` → `validate()` — failures abort, nothing written
//! 3. Routing policy: Spam ends immediately; Sales logs to CRM (escalating
//!    hot leads to a notification); Support/Other log to Support Tickets
//!
//! The notification outcome is data, never a failure: a dead relay still
//! yields an Ok report with `email_status: FAILED`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::classifier::Classifier;
use crate::error::Result;
use crate::notify::Notifier;
use crate::pipeline::types::{Classification, EmailStatus, Intent, RoutedCase, TriageReport};
use crate::pipeline::validate::validate;
use crate::store::{LogCategory, LogRow, LogStore};

/// Sales messages strictly above this urgency escalate to a hot lead.
const HOT_LEAD_URGENCY: u8 = 7;

/// Tag written to the log and the report for escalated leads.
const HOT_LEAD_TAG: &str = "HOT LEAD";

/// Subject line of the alert email.
const HOT_LEAD_SUBJECT: &str = "HOT LEAD";

/// Orchestrates classifier, validator, log store, and notifier for one
/// message at a time.
pub struct Router {
    classifier: Arc<dyn Classifier>,
    store: Arc<dyn LogStore>,
    notifier: Arc<dyn Notifier>,
    hot_lead_recipient: String,
}

impl Router {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        store: Arc<dyn LogStore>,
        notifier: Arc<dyn Notifier>,
        hot_lead_recipient: impl Into<String>,
    ) -> Self {
        Self {
            classifier,
            store,
            notifier,
            hot_lead_recipient: hot_lead_recipient.into(),
        }
    }

    /// Run one message through the pipeline.
    ///
    /// `notify_to` overrides the configured hot-lead recipient for this
    /// invocation only.
    #[instrument(
        skip(self, customer_message, notify_to),
        fields(invocation = %Uuid::new_v4(), model = %self.classifier.model_name())
    )]
    pub async fn run(
        &self,
        customer_message: &str,
        notify_to: Option<&str>,
    ) -> Result<TriageReport> {
        self.store.ensure_ready().await?;

        let timestamp = Utc::now();
        let raw = self.classifier.classify(customer_message).await?;
        let classification = validate(&raw)?;

        info!(
            intent = %classification.intent,
            urgency = classification.urgency_score,
            "Message classified"
        );

        if classification.intent == Intent::Spam {
            info!("Routed as spam (no action)");
            return Ok(TriageReport::new(classification, RoutedCase::SpamNoAction));
        }

        if classification.intent == Intent::Sales {
            return self
                .route_sales(customer_message, classification, timestamp, notify_to)
                .await;
        }

        self.route_support(customer_message, classification, timestamp)
            .await
    }

    /// Sales path: CRM row always; urgency above the threshold escalates to
    /// a hot lead with a contained notification attempt.
    async fn route_sales(
        &self,
        customer_message: &str,
        classification: Classification,
        timestamp: DateTime<Utc>,
        notify_to: Option<&str>,
    ) -> Result<TriageReport> {
        let mut report = TriageReport::new(classification, RoutedCase::Sales);

        if report.urgency_score > HOT_LEAD_URGENCY {
            report.routed_case = RoutedCase::SalesHotLead;
            report.lead_tag = HOT_LEAD_TAG.to_string();

            let to = notify_to.unwrap_or(&self.hot_lead_recipient);
            let body = hot_lead_body(&report, customer_message);
            match self
                .notifier
                .notify_hot_lead(to, HOT_LEAD_SUBJECT, &body)
                .await
            {
                Ok(()) => {
                    report.email_status = EmailStatus::Sent;
                    info!(to, "Hot lead notification sent");
                }
                Err(e) => {
                    report.email_status = EmailStatus::Failed;
                    report.email_error = e.to_string();
                    warn!(error = %e, "Hot lead notification failed");
                }
            }
        }

        let row = build_row(timestamp, customer_message, &report);
        self.store.append(LogCategory::Crm, &row).await?;
        info!("Routed to CRM");
        Ok(report)
    }

    /// Support and Other both land in the Support Tickets category with an
    /// empty routing tail.
    async fn route_support(
        &self,
        customer_message: &str,
        classification: Classification,
        timestamp: DateTime<Utc>,
    ) -> Result<TriageReport> {
        let routed_case = if classification.intent == Intent::Support {
            RoutedCase::Support
        } else {
            RoutedCase::Other
        };
        let report = TriageReport::new(classification, routed_case);

        let row = build_row(timestamp, customer_message, &report);
        self.store.append(LogCategory::SupportTickets, &row).await?;
        info!("Routed to support tickets");
        Ok(report)
    }
}

/// One log row from the report's current state.
fn build_row(timestamp: DateTime<Utc>, customer_message: &str, report: &TriageReport) -> LogRow {
    LogRow {
        timestamp_utc: timestamp.to_rfc3339(),
        customer_message: customer_message.to_string(),
        sentiment: report.sentiment.clone(),
        intent: report.intent.as_str().to_string(),
        urgency_score: report.urgency_score,
        summary_hy: report.summary.clone(),
        suggested_reply: report.suggested_reply.clone(),
        lead_tag: report.lead_tag.clone(),
        email_status: report.email_status.as_str().to_string(),
        email_error: report.email_error.clone(),
    }
}

/// Alert body: urgency, original message, Armenian summary, suggested reply.
fn hot_lead_body(report: &TriageReport, customer_message: &str) -> String {
    format!(
        "HOT LEAD DETECTED\n\n\
         Urgency: {}\n\n\
         Customer message:\n{}\n\n\
         Summary (hy):\n{}\n\n\
         Suggested reply:\n{}\n",
        report.urgency_score, customer_message, report.summary, report.suggested_reply
    )
}
