//! Router for the chat API

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};

use super::public;
use crate::api::public::{ApiError, ErrorResponse};
use crate::api::state::SharedState;
use crate::chat::{ChatError, ChatInput};

/// Header clients use to continue an existing session
pub const SESSION_ID_HEADER: &str = "x-session-id";

/// Send a message and get the assistant's reply
async fn chat_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    payload: Result<Json<public::ChatRequest>, JsonRejection>,
) -> Result<Json<public::ChatResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ChatError::MalformedBody(e.body_text()))?;

    let session_id = headers
        .get(SESSION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let reply = state
        .chat
        .next_msg(ChatInput {
            session_id,
            message: payload.message(),
            language: payload.language(),
        })
        .await?;

    Ok(Json(public::ChatResponse::new(
        &reply.message,
        &reply.session_id,
    )))
}

/// Get the transcript kept for a session
async fn chat_session(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    match state.chat.sessions().history(&id) {
        Some(history) => Json(public::ChatTranscriptResponse {
            transcript: history.turns(),
        })
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Session not found")),
        )
            .into_response(),
    }
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(chat_handler))
        .route("/{id}", get(chat_session))
}
