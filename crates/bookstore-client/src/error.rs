//! # API Error Type
//!
//! Every failed call, whatever went wrong, becomes one [`ApiError`] with a
//! displayable message.
//!
//! ## Message Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  non-2xx response body                                                 │
//! │       │                                                                 │
//! │       ├── {"error": "..."}            ──► "..."                         │
//! │       ├── {"message": "..."}          ──► "..."                         │
//! │       ├── {"detail": "..."}           ──► "..."                         │
//! │       ├── {"field": ["msg", ..], ..}  ──► "field: msg; other: msg"      │
//! │       └── anything else               ──► "Request failed with status   │
//! │                                             code N"                     │
//! │                                                                         │
//! │  transport failure (refused, timeout) ──► reqwest's error text         │
//! │  nothing usable at all                ──► "An error occurred"           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::Value;
use thiserror::Error;

/// Shown when no better message can be found.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// Field errors that are not about a particular field.
const NON_FIELD_KEYS: [&str; 2] = ["non_field_errors", "__all__"];

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// A failed API call.
///
/// ## Fields
/// - `status`: HTTP status when the service answered, `None` for transport,
///   decode and configuration failures
/// - `message`: human-readable text, shown verbatim to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        };
        ApiError { status, message }
    }

    /// Invalid client configuration (bad base URL, client build failure).
    pub fn config(message: impl Into<String>) -> Self {
        ApiError::new(None, message)
    }

    /// Builds the error for a non-2xx response from its raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| message_from_body(&value))
            .unwrap_or_else(|| format!("Request failed with status code {}", status));
        ApiError::new(Some(status), message)
    }

    /// A 2xx response whose body did not match the expected shape.
    pub fn decode(status: u16, err: &serde_json::Error) -> Self {
        ApiError::new(Some(status), format!("Unexpected response from server: {}", err))
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        ApiError::new(status, err.to_string())
    }
}

/// Picks the most specific message out of an error body.
pub fn message_from_body(body: &Value) -> Option<String> {
    for key in ["error", "message", "detail"] {
        if let Some(text) = body.get(key).and_then(as_text) {
            return Some(text);
        }
    }

    let fields = body.as_object()?;
    let mut parts = Vec::new();
    for (field, value) in fields {
        let Some(text) = as_text(value) else {
            continue;
        };
        if NON_FIELD_KEYS.contains(&field.as_str()) {
            parts.push(text);
        } else {
            parts.push(format!("{}: {}", field, text));
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

/// A string, or an array of strings joined with spaces.
fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(" "),
        _ => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
