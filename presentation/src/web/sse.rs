//! Server-sent events for a streaming turn

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};
use parley_application::{TurnError, TurnSink};
use serde::Serialize;
use std::convert::Infallible;
use tokio::sync::mpsc;
use tracing::warn;

/// What the page receives while a turn runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEvent {
    UserTurn {
        role: &'static str,
        text: String,
    },
    AssistantChunk {
        text: String,
    },
    AssistantDone {
        role: &'static str,
        text: String,
    },
    TurnError {
        message: String,
        /// Text shown before the failure
        partial: String,
        authentication: bool,
    },
}

impl TurnEvent {
    /// `data: {json}\n\n`
    pub fn to_frame(&self) -> Option<Bytes> {
        match serde_json::to_string(self) {
            Ok(json) => Some(Bytes::from(format!("data: {json}\n\n"))),
            Err(e) => {
                warn!("Failed to serialize turn event: {}", e);
                None
            }
        }
    }
}

/// [`TurnSink`] that frames every callback as an SSE event.
///
/// Sending never blocks. If the page went away the frames are dropped and
/// the turn carries on.
pub struct SseTurnSink {
    tx: mpsc::UnboundedSender<Bytes>,
}

impl SseTurnSink {
    pub fn new(tx: mpsc::UnboundedSender<Bytes>) -> Self {
        Self { tx }
    }

    fn emit(&self, event: TurnEvent) {
        if let Some(frame) = event.to_frame() {
            let _ = self.tx.send(frame);
        }
    }
}

impl TurnSink for SseTurnSink {
    fn on_user_turn(&self, text: &str) {
        self.emit(TurnEvent::UserTurn {
            role: "user",
            text: text.to_string(),
        });
    }

    fn on_assistant_chunk(&self, chunk: &str) {
        self.emit(TurnEvent::AssistantChunk {
            text: chunk.to_string(),
        });
    }

    fn on_assistant_complete(&self, reply: &str) {
        self.emit(TurnEvent::AssistantDone {
            role: "assistant",
            text: reply.to_string(),
        });
    }

    fn on_turn_error(&self, error: &TurnError, partial: &str) {
        self.emit(TurnEvent::TurnError {
            message: error.to_string(),
            partial: partial.to_string(),
            authentication: error.is_authentication(),
        });
    }
}

pub fn sse_body_stream(
    mut rx: mpsc::UnboundedReceiver<Bytes>,
) -> impl futures::Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
    async_stream::stream! {
        while let Some(chunk) = rx.recv().await {
            yield Ok::<Bytes, Infallible>(chunk);
        }
    }
}

pub fn sse_response<S>(stream: S) -> Response
where
    S: futures::Stream<Item = Result<Bytes, Infallible>> + Send + 'static,
{
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/event-stream"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    (headers, Body::from_stream(stream)).into_response()
}
