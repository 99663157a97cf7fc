// ============================================================================
// Error Types
// ============================================================================

/// Failure talking to the Lexly backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status
    #[error("HTTP error: {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// Message the backend put in its `{error}` body, if any
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }
}

/// Failure reading or writing host storage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable")]
    Unavailable,

    #[error("Storage call failed: {0}")]
    Js(String),
}

/// Client-side form validation. Never reaches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

pub(crate) fn js_error_text(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}
