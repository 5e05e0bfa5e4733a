//! Error types for the Gemini adapter

use crate::gemini::protocol::ApiErrorEnvelope;
use parley_application::GatewayError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when talking to the Gemini REST API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Failed to reach Gemini API: {0}")]
    Connection(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Gemini API rejected the API key ({status}): {message}")]
    Authentication { status: u16, message: String },

    #[error("Gemini API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Prompt was blocked: {0}")]
    Blocked(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Stream error: {0}")]
    Stream(String),
}

impl GeminiError {
    /// Classify a non-2xx response from its status code and body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok();
        let message = parsed
            .as_ref()
            .map(|e| e.error.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.trim().chars().take(200).collect());

        let rejected_key = parsed.as_ref().is_some_and(|e| {
            matches!(
                e.error.status.as_deref(),
                Some("UNAUTHENTICATED") | Some("PERMISSION_DENIED")
            ) || e.error.reasons().any(|r| r == "API_KEY_INVALID")
        });

        if status == 401 || status == 403 || rejected_key {
            GeminiError::Authentication { status, message }
        } else {
            GeminiError::Api { status, message }
        }
    }
}

impl From<reqwest::Error> for GeminiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GeminiError::Timeout
        } else if e.is_connect() {
            GeminiError::Connection(e.to_string())
        } else if e.is_decode() {
            GeminiError::Parse(e.to_string())
        } else {
            GeminiError::Stream(e.to_string())
        }
    }
}

impl From<GeminiError> for GatewayError {
    fn from(e: GeminiError) -> Self {
        match e {
            GeminiError::Authentication { .. } => GatewayError::AuthenticationFailed(e.to_string()),
            GeminiError::Connection(_) | GeminiError::ClientBuild(_) => {
                GatewayError::ConnectionError(e.to_string())
            }
            GeminiError::Timeout => GatewayError::Timeout,
            GeminiError::Parse(_) => GatewayError::InvalidResponse(e.to_string()),
            GeminiError::Api { .. } | GeminiError::Blocked(_) | GeminiError::Stream(_) => {
                GatewayError::RequestFailed(e.to_string())
            }
        }
    }
}
