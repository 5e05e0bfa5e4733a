//! Handle Input use case.
//!
//! Processes one user submission:
//! 1. Render the user's text immediately (before any network activity)
//! 2. Send it through the session, requesting a streamed reply
//! 3. Render each chunk as it arrives, in arrival order
//! 4. On completion the session has already recorded both turns
//!
//! Failures end the current turn only. They are rendered through the
//! [`TurnSink`] and reported in the [`TurnOutcome`]; the session stays
//! usable and nothing is retried.

use crate::ports::llm_gateway::LlmSession;
use crate::ports::turn_sink::{TurnError, TurnSink};
use parley_domain::util::preview;
use parley_domain::{StreamEvent, UserMessage};
use tracing::{debug, info, warn};

/// Result of processing one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// No (or blank) input: nothing happened
    Skipped,
    /// The reply completed and was recorded
    Completed { reply: String },
    /// The turn failed; `partial` is what had been rendered
    Failed { error: TurnError, partial: String },
}

impl TurnOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TurnOutcome::Completed { .. })
    }
}

/// Use case for processing a user submission.
#[derive(Debug, Clone, Default)]
pub struct HandleInputUseCase;

impl HandleInputUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Process `input` against `session`, rendering into `sink`.
    ///
    /// Suspends only while waiting on the remote stream.
    pub async fn execute(
        &self,
        session: &dyn LlmSession,
        input: Option<&str>,
        sink: &dyn TurnSink,
    ) -> TurnOutcome {
        let Some(message) = input.and_then(UserMessage::try_new) else {
            return TurnOutcome::Skipped;
        };

        sink.on_user_turn(message.content());

        info!("Sending turn to {}", session.model());
        debug!("User: {}", preview(message.content(), 80));

        let mut handle = match session.send_streaming(message.content()).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Send failed: {}", e);
                return Self::fail(sink, TurnError::Send(e), String::new());
            }
        };

        let mut partial = String::new();
        while let Some(event) = handle.recv().await {
            match event {
                StreamEvent::Delta(chunk) => {
                    if chunk.is_empty() {
                        continue;
                    }
                    partial.push_str(&chunk);
                    sink.on_assistant_chunk(&chunk);
                }
                StreamEvent::Completed(full) => {
                    // Non-streaming sessions deliver everything at once
                    if partial.is_empty() && !full.is_empty() {
                        sink.on_assistant_chunk(&full);
                    }
                    let reply = if full.is_empty() { partial } else { full };
                    debug!("Assistant: {}", preview(&reply, 80));
                    sink.on_assistant_complete(&reply);
                    return TurnOutcome::Completed { reply };
                }
                StreamEvent::Error(message) => {
                    warn!("Stream failed after {} bytes: {}", partial.len(), message);
                    return Self::fail(sink, TurnError::Interrupted(message), partial);
                }
            }
        }

        warn!("Stream closed without a terminal event");
        Self::fail(sink, TurnError::Truncated, partial)
    }

    fn fail(sink: &dyn TurnSink, error: TurnError, partial: String) -> TurnOutcome {
        sink.on_turn_error(&error, &partial);
        TurnOutcome::Failed { error, partial }
    }
}
