//! Classifier client — free text in, raw structured model output out.
//!
//! The production implementation calls the Gemini `generateContent` REST API
//! in JSON-response mode. Validation of the returned text lives in
//! `pipeline::validate`, behind this seam, so fakes can feed the router any
//! raw output.

pub mod gemini;

use async_trait::async_trait;

use crate::error::ClassifierError;

pub use gemini::GeminiClassifier;

/// Turns one customer message into the model's raw structured response.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Model identifier, for logs and diagnostics.
    fn model_name(&self) -> &str;

    /// Classify one message. Returns the raw response text, expected to be
    /// a JSON object with the five triage keys.
    async fn classify(&self, message: &str) -> Result<String, ClassifierError>;
}
