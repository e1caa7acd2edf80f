//! Backend failure classification.
//!
//! ERROR HANDLING
//! ==============
//! The backend reports generation failures through the HTTP status plus a
//! `detail` field that is either a string or an object carrying
//! `error_type`/`message`. [`classify_generate_failure`] turns that into an
//! [`ApiError`] whose `Display` is the message shown to the user.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Generation requested before the wizard was completed.
    #[error("wizard data is required: complete the step-by-step wizard before generating a prototype")]
    MissingWizardData,
    /// 502 from the backend without a more specific cause.
    #[error("backend error (502 Bad Gateway): the backend raised an exception while processing the request")]
    BackendException,
    /// 500 with the backend's detail text.
    #[error("backend internal error (500): {0}")]
    Internal(String),
    /// API quota exhausted; the backend will retry.
    #[error("AI API quota exceeded, try again shortly")]
    QuotaExceeded,
    /// Structured or plain `detail` message.
    #[error("{0}")]
    Detail(String),
    /// Resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Any other non-success status.
    #[error("request failed with status {0}")]
    Status(u16),
    /// Request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// Response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Classify a non-success reply to `POST /api/ai/generate`.
///
/// `body` is the raw response text; non-JSON bodies are tolerated.
#[must_use]
pub fn classify_generate_failure(status: u16, body: &str) -> ApiError {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let detail = parsed.get("detail");

    match status {
        502 => {
            let error_type = detail.and_then(|d| d.get("error_type")).and_then(Value::as_str);
            if error_type == Some("missing_wizard_data") {
                ApiError::MissingWizardData
            } else {
                ApiError::BackendException
            }
        }
        500 => ApiError::Internal(
            detail
                .and_then(detail_text)
                .unwrap_or_else(|| "see backend logs for details".to_owned()),
        ),
        429 => ApiError::QuotaExceeded,
        _ => classify_detail(status, detail),
    }
}

/// Classify a failure from any other endpoint using its `detail` field.
#[must_use]
pub fn classify_failure(status: u16, body: &str) -> ApiError {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    match status {
        404 => ApiError::NotFound(
            parsed
                .get("detail")
                .and_then(detail_text)
                .unwrap_or_else(|| "resource".to_owned()),
        ),
        429 => ApiError::QuotaExceeded,
        _ => classify_detail(status, parsed.get("detail")),
    }
}

fn classify_detail(status: u16, detail: Option<&Value>) -> ApiError {
    match detail.and_then(detail_text) {
        Some(text) if is_quota_message(&text) => ApiError::QuotaExceeded,
        Some(text) => ApiError::Detail(text),
        None => ApiError::Status(status),
    }
}

fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => map.get("message").and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

fn is_quota_message(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    lower.contains("quota") || lower.contains("rate limit") || lower.contains("resource_exhausted")
}
