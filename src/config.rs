//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

/// Default Gemini model used for classification.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default workbook directory for the triage log.
pub const DEFAULT_LOG_DIR: &str = "./triage_log";

/// Default recipient for hot-lead alerts (override with `TRIAGE_HOT_LEAD_TO`).
pub const DEFAULT_HOT_LEAD_RECIPIENT: &str = "sales@example.com";

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Model name passed to the classifier.
    pub model: String,
    /// Workbook directory holding the CRM and Support Tickets logs.
    pub log_dir: PathBuf,
    /// Default recipient for hot-lead alerts (callers may override per run).
    pub hot_lead_recipient: String,
    /// Outbound mail settings.
    pub smtp: SmtpConfig,
}

impl TriageConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let model = std::env::var("TRIAGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let log_dir = std::env::var("TRIAGE_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR));
        let hot_lead_recipient = std::env::var("TRIAGE_HOT_LEAD_TO")
            .unwrap_or_else(|_| DEFAULT_HOT_LEAD_RECIPIENT.to_string());

        Self {
            model,
            log_dir,
            hot_lead_recipient,
            smtp: SmtpConfig::from_env(),
        }
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            hot_lead_recipient: DEFAULT_HOT_LEAD_RECIPIENT.to_string(),
            smtp: SmtpConfig::default(),
        }
    }
}

/// Outbound SMTP configuration.
///
/// Credentials may be empty at construction; the notifier rejects the send
/// with a credential error when they are actually needed.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
    /// Bound on the whole SMTP session (connect, auth, send).
    pub timeout: Duration,
}

impl SmtpConfig {
    /// Build config from environment variables.
    ///
    /// `SMTP_USER` / `SMTP_PASS` carry the credentials; host, port, and from
    /// address have relay defaults and `TRIAGE_SMTP_*` overrides.
    pub fn from_env() -> Self {
        let username = std::env::var("SMTP_USER").unwrap_or_default();
        let password = SecretString::from(std::env::var("SMTP_PASS").unwrap_or_default());

        let host =
            std::env::var("TRIAGE_SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let port: u16 = std::env::var("TRIAGE_SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);
        let from_address =
            std::env::var("TRIAGE_SMTP_FROM").unwrap_or_else(|_| username.clone());

        Self {
            host,
            port,
            username,
            password,
            from_address,
            timeout: Duration::from_secs(20),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: String::new(),
            password: SecretString::from(String::new()),
            from_address: String::new(),
            timeout: Duration::from_secs(20),
        }
    }
}
