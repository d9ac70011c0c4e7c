//! Outbound notification — best-effort hot-lead alerts.

pub mod smtp;

use async_trait::async_trait;

use crate::error::NotifyError;

pub use smtp::SmtpNotifier;

/// Sends a single plain-text alert. Failures are reported to the caller,
/// which decides whether they are fatal (the router records them instead).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_hot_lead(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotifyError>;
}
