//! Shared types between the extension and the Lexly backend
//!
//! These types are used by:
//! - the content script (save bubble)
//! - the side panel (auth forms, word list)
//!
//! Serializable with serde for JSON over HTTP

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Session
// ============================================================================

/// Storage key holding the bearer token
pub const STORAGE_KEY_TOKEN: &str = "lexly_token";
/// Storage key holding the signed-in email
pub const STORAGE_KEY_EMAIL: &str = "lexly_email";
/// Storage key holding the display name
pub const STORAGE_KEY_NAME: &str = "lexly_name";

/// Every key a session occupies in host storage
pub const SESSION_STORAGE_KEYS: [&str; 3] = [STORAGE_KEY_TOKEN, STORAGE_KEY_EMAIL, STORAGE_KEY_NAME];

/// The signed-in user as persisted by the extension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer token issued by the backend
    pub token: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

impl Session {
    pub fn new(token: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            email: email.into(),
            name: name.into(),
        }
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        bearer(&self.token)
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

// ============================================================================
// Words
// ============================================================================

/// A word saved by the user. Owned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedWord {
    pub id: String,
    pub word: String,

    /// Definition, when the backend already generated one
    #[serde(default)]
    pub meaning: Option<String>,

    /// Raw creation timestamp; see [`SavedWord::created_at_utc`]
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
}

impl SavedWord {
    /// Parse `created_at` leniently. Malformed or empty timestamps yield `None`.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Inline definition, ignoring blank strings
    pub fn inline_meaning(&self) -> Option<&str> {
        self.meaning.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// `null` and non-string values read as an empty string
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(raw)) => raw,
        _ => String::new(),
    })
}

/// Accepts RFC 3339 and naive `YYYY-MM-DD[ T]HH:MM:SS[.f]` (read as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordsResponse {
    #[serde(default)]
    pub words: Vec<SavedWord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveWordRequest {
    pub word: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeaningResponse {
    #[serde(default)]
    pub meaning: Option<String>,
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Profile fields some backend deployments echo back on auth
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

impl AuthResponse {
    pub fn user_name(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .filter(|n| !n.is_empty())
    }
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// ============================================================================
// Tests
// ============================================================================
