//! HTTP routes
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/` | chat page (or the blocking error page) |
//! | GET | `/health` | liveness |
//! | POST | `/api/sessions` | open a UI session |
//! | DELETE | `/api/sessions/{id}` | drop a UI session |
//! | GET | `/api/sessions/{id}/history` | rendered turns, oldest first |
//! | POST | `/api/sessions/{id}/messages` | submit text; replies with an SSE stream |

use crate::web::error::ApiError;
use crate::web::page::{chat_page, error_page};
use crate::web::sse::{SseTurnSink, sse_body_stream, sse_response};
use crate::web::state::ChatState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{any, delete, get, post};
use axum::{Json, Router};
use parley_application::{HandleInputUseCase, RenderedTurn, TurnOutcome, render_history};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Router for a server that has a credential.
pub fn chat_router(state: ChatState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(|| health(true)))
        .route("/api/sessions", post(open_session))
        .route("/api/sessions/{id}", delete(close_session))
        .route("/api/sessions/{id}/history", get(session_history))
        .route("/api/sessions/{id}/messages", post(submit_message))
        .with_state(state)
}

/// Router for a server without a credential: the error page, and `503`
/// for the whole API.
pub fn unavailable_router(message: impl Into<String>) -> Router {
    let message: Arc<str> = Arc::from(message.into());
    Router::new()
        .route("/", get(error_index))
        .route("/health", get(|| health(false)))
        .route("/api", any(api_unavailable))
        .route("/api/{*path}", any(api_unavailable))
        .with_state(message)
}

async fn health(chat_ready: bool) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "chat": if chat_ready { "ready" } else { "unavailable" },
    }))
}

async fn index(State(state): State<ChatState>) -> Html<String> {
    Html(chat_page(state.ensure.settings().model.as_str()))
}

async fn error_index(State(message): State<Arc<str>>) -> Html<String> {
    Html(error_page(&message))
}

async fn api_unavailable(State(message): State<Arc<str>>) -> ApiError {
    ApiError::Unavailable(message.to_string())
}

async fn open_session(State(state): State<ChatState>) -> (StatusCode, Json<SessionCreated>) {
    let id = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionCreated { id }))
}

async fn close_session(
    State(state): State<ChatState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound(id))
    }
}

async fn session_history(
    State(state): State<ChatState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RenderedTurn>>, ApiError> {
    let ui = state
        .sessions
        .get(&id)
        .await
        .ok_or(ApiError::SessionNotFound(id))?;
    let session = ui.ensure(&state.ensure);
    Ok(Json(render_history(session.as_ref()).collect()))
}

async fn submit_message(
    State(state): State<ChatState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let ui = state
        .sessions
        .get(&id)
        .await
        .ok_or(ApiError::SessionNotFound(id))?;
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let Some(text) = request.text.filter(|t| !t.trim().is_empty()) else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let turn = ui.begin_turn().ok_or_else(|| {
        warn!("Rejected submission for {}: turn in progress", id);
        ApiError::TurnInProgress
    })?;
    let session = ui.ensure(&state.ensure);

    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let sink = SseTurnSink::new(tx);
        let outcome = HandleInputUseCase::new()
            .execute(session.as_ref(), Some(text.as_str()), &sink)
            .await;
        match &outcome {
            TurnOutcome::Completed { .. } => debug!("Turn completed for {}", id),
            TurnOutcome::Failed { error, .. } => info!("Turn failed for {}: {}", id, error),
            TurnOutcome::Skipped => {}
        }
        drop(turn);
    });

    Ok(sse_response(sse_body_stream(rx)))
}
