//! Gemini `generateContent` client.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::Classifier;
use crate::error::{ClassifierError, ConfigError};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Low temperature keeps the five-key JSON output stable.
const CLASSIFY_TEMPERATURE: f32 = 0.2;

/// Fixed system instruction: exactly five keys, enumerated values, Armenian
/// summary. The JSON-only demand is backed up by `responseMimeType` below.
const SYSTEM_INSTRUCTIONS: &str = "You are an automated customer inquiry triage system.\n\
Return ONLY valid JSON (no markdown, no extra text).\n\
JSON must contain EXACTLY these keys:\n\
sentiment, intent, urgency_score, summary, suggested_reply.\n\
Allowed values:\n\
- sentiment: Positive | Neutral | Negative\n\
- intent: Sales | Support | Spam | Other\n\
- urgency_score: integer 1..10\n\
summary MUST be in Armenian.";

/// Per-call prompt embedding the raw customer message.
fn build_classify_prompt(message: &str) -> String {
    format!(
        "Analyze the customer message and output ONLY JSON in this exact format:\n\
         \n\
         {{\n\
         \x20 \"sentiment\": \"Positive|Neutral|Negative\",\n\
         \x20 \"intent\": \"Sales|Support|Spam|Other\",\n\
         \x20 \"urgency_score\": 1-10,\n\
         \x20 \"summary\": \"Հաղորդագրության հակիրճ նկարագրություն՝ հայերեն\",\n\
         \x20 \"suggested_reply\": \"AI-ի կողմից գեներացված պատասխանի սևագիր\"\n\
         }}\n\
         \n\
         Customer message:\n\
         {message}"
    )
}

/// Classifier backed by the Gemini REST API.
#[derive(Debug)]
pub struct GeminiClassifier {
    http: reqwest::Client,
    api_key: SecretString,
    model: String,
}

impl GeminiClassifier {
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: model.into(),
        }
    }

    /// Build from `GEMINI_API_KEY`. A missing key is fatal here, before any
    /// classification, log write, or email.
    pub fn from_env(model: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;
        Ok(Self::new(SecretString::from(api_key), model))
    }
}

#[async_trait::async_trait]
impl Classifier for GeminiClassifier {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn classify(&self, message: &str) -> Result<String, ClassifierError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![TextPart {
                    text: build_classify_prompt(message),
                }],
            }],
            system_instruction: SystemInstruction {
                parts: vec![TextPart {
                    text: SYSTEM_INSTRUCTIONS.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: CLASSIFY_TEMPERATURE,
                response_mime_type: "application/json",
            },
        };

        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        debug!(model = %self.model, "Sending classification request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassifierError::Request {
                reason: format!("request to Gemini failed: {e}"),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ClassifierError::Request {
            reason: format!("failed to read Gemini response: {e}"),
        })?;

        if !status.is_success() {
            return Err(ClassifierError::Request {
                reason: format!("Gemini returned {status}: {}", truncate(&body, 500)),
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| ClassifierError::Request {
                reason: format!("unexpected Gemini response shape: {e}"),
            })?;

        if let Some(error) = parsed.error {
            return Err(ClassifierError::Request {
                reason: format!("Gemini API error: {}", error.message),
            });
        }

        parsed
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content.parts)
            .and_then(|parts| parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| ClassifierError::Request {
                reason: "Gemini response contained no text candidate".to_string(),
            })
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "systemInstruction")]
    system_instruction: SystemInstruction,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_the_customer_message() {
        let prompt = build_classify_prompt("My invoice is wrong");
        assert!(prompt.contains("My invoice is wrong"));
        assert!(prompt.contains("\"urgency_score\": 1-10"));
        // The format block pins the Armenian summary placeholder.
        assert!(prompt.contains("հայերեն"));
    }

    #[test]
    fn system_instructions_pin_the_contract() {
        assert!(SYSTEM_INSTRUCTIONS.contains("EXACTLY these keys"));
        assert!(SYSTEM_INSTRUCTIONS.contains("Sales | Support | Spam | Other"));
        assert!(SYSTEM_INSTRUCTIONS.contains("summary MUST be in Armenian"));
    }

    #[test]
    fn request_serializes_with_camel_case_wire_names() {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![TextPart { text: "hi".into() }],
            }],
            system_instruction: SystemInstruction {
                parts: vec![TextPart {
                    text: "sys".into(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: CLASSIFY_TEMPERATURE,
                response_mime_type: "application/json",
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("systemInstruction").is_some());
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn response_candidate_text_extracts() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"intent\": \"Spam\"}"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let text = parsed
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content.parts)
            .and_then(|p| p.into_iter().next())
            .and_then(|p| p.text)
            .unwrap();
        assert_eq!(text, "{\"intent\": \"Spam\"}");
    }

    #[test]
    fn missing_env_key_is_a_config_error() {
        // Temporarily clear the variable for this process.
        // SAFETY: tests in this module do not race on GEMINI_API_KEY.
        unsafe { std::env::remove_var("GEMINI_API_KEY") };
        let err = GeminiClassifier::from_env("gemini-2.5-flash").unwrap_err();
        match err {
            ConfigError::MissingEnvVar(name) => assert_eq!(name, "GEMINI_API_KEY"),
            other => panic!("Expected MissingEnvVar, got {other:?}"),
        }
    }
}
