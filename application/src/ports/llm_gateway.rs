//! LLM Gateway port
//!
//! Defines the interface for communicating with the hosted chat model.

use async_trait::async_trait;
use parley_domain::{History, Model, StreamEvent, SystemInstruction};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The remote service rejected the credential.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

impl GatewayError {
    /// Check if this error means the credential was rejected
    pub fn is_authentication(&self) -> bool {
        matches!(self, GatewayError::AuthenticationFailed(_))
    }
}

/// Gateway for LLM communication
///
/// A gateway is bound to one credential. Implementations (adapters) live in
/// the infrastructure layer.
pub trait LlmGateway: Send + Sync {
    /// Create a new session bound to `model` and `system_instruction`.
    ///
    /// Must not perform any network I/O: a bad credential only surfaces on
    /// the first send.
    fn create_session(
        &self,
        model: &Model,
        system_instruction: &SystemInstruction,
    ) -> Arc<dyn LlmSession>;
}

/// Handle for receiving streaming events from an LLM session.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`. Finite, single-consumer and not
/// restartable.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next event, or `None` once the producer is gone.
    pub async fn recv(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Consume the stream and collect all text into a single string.
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed(text) => {
                    if full_text.is_empty() {
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
                StreamEvent::Error(e) => {
                    return Err(GatewayError::RequestFailed(e));
                }
            }
        }
        Err(GatewayError::InvalidResponse(
            "stream closed before completion".to_string(),
        ))
    }
}

/// An active chat session.
///
/// The session owns the conversation history. A successful send records the
/// user turn and the assistant reply; a failed send records nothing.
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Get the instruction this session was created with
    fn system_instruction(&self) -> &SystemInstruction;

    /// Snapshot of the recorded turns, oldest first
    fn history(&self) -> History;

    /// Send a message and wait for the whole reply
    async fn send(&self, content: &str) -> Result<String, GatewayError>;

    /// Send a message and get a streaming response.
    ///
    /// Errors returned here happen before any chunk was produced (connection
    /// refused, rejected credential, HTTP error status). Failures after the
    /// stream is established arrive as [`StreamEvent::Error`].
    ///
    /// Default implementation calls `send()` and wraps the result in a single
    /// `Completed` event.
    async fn send_streaming(&self, content: &str) -> Result<StreamHandle, GatewayError> {
        let result = self.send(content).await?;
        let (tx, rx) = mpsc::channel(1);
        // A dropped receiver is not an error here
        let _ = tx.send(StreamEvent::Completed(result)).await;
        Ok(StreamHandle::new(rx))
    }
}
