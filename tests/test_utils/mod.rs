//! Test utilities for integration tests
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, body::Body};

use pika::api::app;
use pika::api::{AppState, SharedState};
use pika::chat::SessionLimits;
use pika::core::AppConfig;

/// Creates a test application router that sends completions to
/// `openai_api_hostname`, normally a `mockito` server.
///
/// The shared state is returned as well so tests can look at the
/// session store directly.
pub fn test_app(openai_api_hostname: &str) -> (Router, SharedState) {
    let app_config = AppConfig {
        openai_model: String::from("gpt-4o-mini"),
        openai_api_hostname: openai_api_hostname.to_string(),
        openai_api_key: String::from("test-api-key"),
        upstream_timeout: Duration::from_secs(5),
        session_limits: SessionLimits::default(),
    };
    let state = Arc::new(AppState::new(&app_config));
    (app(Arc::clone(&state)), state)
}

/// A chat completion response body with `content` as the reply.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not valid UTF-8")
}
