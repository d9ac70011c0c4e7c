//! SMTP notifier — STARTTLS relay via lettre.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::ExposeSecret;
use tracing::info;

use crate::config::SmtpConfig;
use crate::error::NotifyError;
use crate::notify::Notifier;

/// Notifier that authenticates against a fixed SMTP relay and sends one
/// plain-text message per call. The lettre transport is blocking, so the
/// send runs under `spawn_blocking`.
pub struct SmtpNotifier {
    config: SmtpConfig,
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Notifier configured from `SMTP_USER` / `SMTP_PASS` and the
    /// `TRIAGE_SMTP_*` overrides.
    pub fn from_env() -> Self {
        Self::new(SmtpConfig::from_env())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify_hot_lead(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotifyError> {
        if self.config.username.is_empty() || self.config.password.expose_secret().is_empty() {
            return Err(NotifyError::MissingCredentials);
        }

        let config = self.config.clone();
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();

        tokio::task::spawn_blocking(move || send_via_smtp(&config, &to, &subject, &body))
            .await
            .map_err(|e| NotifyError::Transport(format!("send task panicked: {e}")))??;

        info!("Hot lead email sent");
        Ok(())
    }
}

/// One full SMTP session: connect with STARTTLS, authenticate, send, quit.
fn send_via_smtp(
    config: &SmtpConfig,
    to: &str,
    subject: &str,
    body: &str,
) -> Result<(), NotifyError> {
    let creds = Credentials::new(
        config.username.clone(),
        config.password.expose_secret().to_string(),
    );

    let transport = SmtpTransport::starttls_relay(&config.host)
        .map_err(|e| NotifyError::Transport(format!("SMTP relay error: {e}")))?
        .port(config.port)
        .credentials(creds)
        .timeout(Some(config.timeout))
        .build();

    let email = Message::builder()
        .from(config.from_address.parse().map_err(|e| {
            NotifyError::InvalidAddress {
                address: config.from_address.clone(),
                reason: format!("{e}"),
            }
        })?)
        .to(to.parse().map_err(|e| NotifyError::InvalidAddress {
            address: to.to_string(),
            reason: format!("{e}"),
        })?)
        .subject(subject)
        .body(body.to_string())
        .map_err(|e| NotifyError::Build(e.to_string()))?;

    transport
        .send(&email)
        .map_err(|e| NotifyError::Transport(e.to_string()))?;

    Ok(())
}
