//! Turn rendering port
//!
//! Defines the incremental UI-update sink the turn processor writes to.

use super::llm_gateway::GatewayError;
use thiserror::Error;

/// Why a turn did not produce a completed assistant reply
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// The send was rejected before any chunk arrived.
    #[error(transparent)]
    Send(#[from] GatewayError),

    /// The stream broke after it was established.
    #[error("Stream interrupted: {0}")]
    Interrupted(String),

    /// The producer went away without a terminal event.
    #[error("Stream closed before the response completed")]
    Truncated,
}

impl TurnError {
    /// Check if this error means the credential was rejected
    pub fn is_authentication(&self) -> bool {
        matches!(self, TurnError::Send(e) if e.is_authentication())
    }
}

/// Callback for UI updates while a turn is processed
///
/// Implementations live in the presentation layer. Calls arrive strictly in
/// this order: one `on_user_turn`, zero or more `on_assistant_chunk`, then
/// exactly one of `on_assistant_complete` / `on_turn_error`.
pub trait TurnSink: Send + Sync {
    /// The user's text, shown before any network activity
    fn on_user_turn(&self, text: &str);

    /// One fragment of the assistant reply, in arrival order
    fn on_assistant_chunk(&self, chunk: &str);

    /// The reply finished; `text` is the full concatenated reply
    fn on_assistant_complete(&self, _text: &str) {}

    /// The turn failed; `partial` is whatever was shown so far
    fn on_turn_error(&self, error: &TurnError, partial: &str);
}

/// No-op sink for when nothing needs to be rendered
pub struct NoTurnSink;

impl TurnSink for NoTurnSink {
    fn on_user_turn(&self, _text: &str) {}
    fn on_assistant_chunk(&self, _chunk: &str) {}
    fn on_turn_error(&self, _error: &TurnError, _partial: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_is_detected_through_send_errors() {
        let err = TurnError::from(GatewayError::AuthenticationFailed("API key not valid".into()));
        assert!(err.is_authentication());
        assert_eq!(err.to_string(), "Authentication failed: API key not valid");

        assert!(!TurnError::Truncated.is_authentication());
        assert!(!TurnError::Interrupted("reset".into()).is_authentication());
    }
}
