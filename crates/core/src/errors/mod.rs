//! Error types and Result alias for the rewards admin client

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Main error type for the rewards admin client
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not authorized: the session token was rejected")]
    Unauthorized,

    #[error("Access forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("No active session; add one with `session add`")]
    NoActiveSession,
}

impl Error {
    /// The message a user should see for this error.
    ///
    /// API errors surface the server's own text rather than the status line.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}

/// Field-keyed validation failures collected from a form.
///
/// Field keys are dotted paths such as `"bonusDay"` or `"rewards.1.value"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
    form: Option<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field. The first message for a field wins.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Record a form-level error (not tied to one field).
    pub fn set_form(&mut self, message: impl Into<String>) {
        if self.form.is_none() {
            self.form = Some(message.into());
        }
    }

    /// Merge another set of errors, prefixing their field keys.
    pub fn merge_prefixed(&mut self, prefix: &str, other: ValidationErrors) {
        for (field, message) in other.fields {
            self.add(format!("{prefix}.{field}"), message);
        }
        if let Some(form) = other.form {
            self.add(prefix.to_string(), form);
        }
    }

    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn form(&self) -> Option<&str> {
        self.form.as_deref()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_none()
    }

    pub fn len(&self) -> usize {
        self.fields.len() + usize::from(self.form.is_some())
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::with_capacity(self.len());
        if let Some(form) = &self.form {
            parts.push(form);
        }
        parts.extend(self.fields.values().map(String::as_str));
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
