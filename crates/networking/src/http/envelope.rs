//! Response envelope handling
//!
//! Endpoints wrap their payload as `{"data": {"data": T}}`, `{"data": T}` or send `T`
//! bare. Everything the client returns goes through [`unwrap_body`] exactly once.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Parse a response body and strip whichever envelope it uses.
///
/// Shapes are tried nested first, then wrapped, then bare. When none fits, the error
/// from the innermost payload present is returned so the offending field is named.
pub fn unwrap_body<T: DeserializeOwned>(body: &str) -> serde_json::Result<T> {
    let value: Value = serde_json::from_str(body)?;

    let mut first_error = None;
    if let Some(data) = value.get("data") {
        let nested = data.get("data").cloned();
        for candidate in nested.into_iter().chain(Some(data.clone())) {
            match serde_json::from_value(candidate) {
                Ok(payload) => return Ok(payload),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
    }

    serde_json::from_value(value).map_err(|bare| first_error.unwrap_or(bare))
}

/// Error body as the backend sends it; every field is optional
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Extract the human-readable message from an error response body
pub fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}
