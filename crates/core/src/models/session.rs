//! Locally stored admin sessions

use serde::{Deserialize, Serialize};

/// A saved admin session (the token itself is stored encrypted, separately)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub name: String,
    pub base_url: String,
    pub last_used: Option<chrono::DateTime<chrono::Utc>>,
    pub is_active: bool,
}

/// Summary of a session for display (no sensitive data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub name: String,
    pub base_url: String,
    pub last_used: Option<String>,
    pub is_active: bool,
}

impl From<Session> for SessionSummary {
    fn from(s: Session) -> Self {
        SessionSummary {
            name: s.name,
            base_url: s.base_url,
            last_used: s.last_used.map(|dt| dt.to_rfc3339()),
            is_active: s.is_active,
        }
    }
}
