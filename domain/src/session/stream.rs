//! Streaming events for LLM session communication.
//!
//! [`StreamEvent`] represents individual events in a streaming chat
//! response, enabling real-time display of model output as it's generated.

/// An event in a streaming chat response.
///
/// Bridges infrastructure-level streaming (SSE frames from the remote API)
/// to the application layer. A well-formed stream is zero or more `Delta`
/// events followed by exactly one terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text chunk from the model.
    Delta(String),
    /// The complete response text (signals stream end).
    Completed(String),
    /// The stream failed after it was established (signals stream end).
    Error(String),
}
