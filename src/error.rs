//! Error types for the triage pipeline.

/// Top-level error type for the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Log store error: {0}")]
    Store(#[from] LogStoreError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Classification errors — all fatal for the invocation.
///
/// The parse/schema/intent/urgency variants carry a bounded excerpt of the
/// raw model output so a bad response can be diagnosed from the error alone.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Classifier request failed: {reason}")]
    Request { reason: String },

    #[error("Model did not return valid JSON: {reason}. Raw: {excerpt}")]
    Parse { reason: String, excerpt: String },

    #[error("Missing key '{key}' in model JSON. Raw: {excerpt}")]
    Schema { key: String, excerpt: String },

    #[error("Invalid intent '{intent}'. Raw: {excerpt}")]
    InvalidIntent { intent: String, excerpt: String },

    #[error("Invalid urgency_score '{value}' (expected integer 1..=10). Raw: {excerpt}")]
    InvalidUrgency { value: String, excerpt: String },
}

/// Log store errors — propagate uncaught.
#[derive(Debug, thiserror::Error)]
pub enum LogStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Log category not initialized: {0}")]
    NotReady(String),
}

/// Notification errors — contained by the router, never abort routing.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("SMTP_USER / SMTP_PASS missing (app password required)")]
    MissingCredentials,

    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("SMTP send failed: {0}")]
    Transport(String),
}

/// Result type alias for the pipeline.
pub type Result<T> = std::result::Result<T, Error>;
