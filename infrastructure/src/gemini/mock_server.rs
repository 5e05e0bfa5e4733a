//! In-process stand-in for the Gemini REST API, for adapter tests.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// What the mock answers to the next request.
#[derive(Debug, Clone)]
pub enum Reply {
    /// SSE body made of the given raw `data:` payloads
    Frames(Vec<String>),
    /// Plain JSON body with status 200
    Json(Value),
    /// Error status with a raw body
    Status(u16, String),
}

/// One request as the mock saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub action: String,
    pub api_key: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct MockGemini {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockGemini {
    /// Start serving on an ephemeral port; returns the base URL.
    pub async fn start(replies: Vec<Reply>) -> (Self, String) {
        let mock = Self {
            replies: Arc::new(Mutex::new(replies.into())),
            requests: Arc::default(),
        };

        let app = Router::new()
            .route("/v1beta/models/{action}", post(handle))
            .with_state(mock.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (mock, format!("http://{addr}"))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

/// A streamed chunk carrying `text`.
pub fn chunk(text: &str) -> String {
    json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    })
    .to_string()
}

/// The closing chunk, carrying the finish reason and usage.
pub fn finish() -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": ""}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 3, "totalTokenCount": 7}
    })
    .to_string()
}

pub fn invalid_key_body() -> String {
    json!({
        "error": {
            "code": 400,
            "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT",
            "details": [{
                "@type": "type.googleapis.com/google.rpc.ErrorInfo",
                "reason": "API_KEY_INVALID"
            }]
        }
    })
    .to_string()
}

async fn handle(
    State(mock): State<MockGemini>,
    Path(action): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    mock.requests.lock().unwrap().push(Recorded {
        action,
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    let reply = mock.replies.lock().unwrap().pop_front();
    match reply {
        Some(Reply::Frames(frames)) => {
            let body: String = frames
                .iter()
                .map(|f| format!("data: {f}\r\n\r\n"))
                .collect();
            ([(header::CONTENT_TYPE, "text/event-stream")], body).into_response()
        }
        Some(Reply::Json(value)) => axum::Json(value).into_response(),
        Some(Reply::Status(code, body)) => (
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}
