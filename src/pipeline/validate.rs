//! Validation of raw classifier output.
//!
//! The model is instructed to return a JSON object with exactly five keys.
//! This module turns that raw text into a [`Classification`] or fails the
//! invocation with a typed error carrying a bounded excerpt of the response.

use serde_json::Value;

use crate::error::ClassifierError;
use crate::pipeline::types::{Classification, Intent};

/// Keys the model JSON must contain.
pub const REQUIRED_KEYS: [&str; 5] = [
    "sentiment",
    "intent",
    "urgency_score",
    "summary",
    "suggested_reply",
];

/// Cap on raw-response excerpts embedded in errors.
const RAW_EXCERPT_MAX: usize = 500;

/// Parse and validate raw model output.
///
/// Checks, in order: valid JSON object, all five keys present (first missing
/// key reported), intent in the allowed set, urgency_score coercible to an
/// integer in 1..=10. Sentiment and summary are trusted from the model and
/// passed through untouched.
pub fn validate(raw: &str) -> Result<Classification, ClassifierError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| ClassifierError::Parse {
        reason: e.to_string(),
        excerpt: excerpt(raw),
    })?;

    let object = value.as_object().ok_or_else(|| ClassifierError::Parse {
        reason: "top-level value is not a JSON object".to_string(),
        excerpt: excerpt(raw),
    })?;

    for key in REQUIRED_KEYS {
        if !object.contains_key(key) {
            return Err(ClassifierError::Schema {
                key: key.to_string(),
                excerpt: excerpt(raw),
            });
        }
    }

    let intent_value = &object["intent"];
    let intent = intent_value
        .as_str()
        .and_then(Intent::parse)
        .ok_or_else(|| ClassifierError::InvalidIntent {
            intent: plain_string(intent_value),
            excerpt: excerpt(raw),
        })?;

    let urgency_score =
        coerce_urgency(&object["urgency_score"]).map_err(|value| ClassifierError::InvalidUrgency {
            value,
            excerpt: excerpt(raw),
        })?;

    Ok(Classification {
        sentiment: plain_string(&object["sentiment"]),
        intent,
        urgency_score,
        summary: plain_string(&object["summary"]),
        suggested_reply: plain_string(&object["suggested_reply"]),
    })
}

fn excerpt(raw: &str) -> String {
    raw.chars().take(RAW_EXCERPT_MAX).collect()
}

/// String value as-is; anything else rendered as its JSON text.
fn plain_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce a JSON value to an urgency integer in 1..=10.
///
/// Accepts integers, floats (truncated toward zero), and numeric strings.
fn coerce_urgency(value: &Value) -> Result<u8, String> {
    let n = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(f) = n.as_f64() {
                f.trunc() as i64
            } else {
                return Err(n.to_string());
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| s.clone())?,
        other => return Err(other.to_string()),
    };

    if (1..=10).contains(&n) {
        Ok(n as u8)
    } else {
        Err(n.to_string())
    }
}
