//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::chat::ChatError;

/// JSON body returned for every error response
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

// Errors

pub struct ApiError(anyhow::Error);

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<ChatError>() {
            Some(ChatError::InvalidRequest) | Some(ChatError::MalformedBody(_)) => {
                tracing::debug!("Rejected chat request: {}", self.0);
                StatusCode::BAD_REQUEST
            }
            // Already logged with its cause by the chat handler
            Some(ChatError::Upstream(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            None => {
                tracing::error!("{}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if self.0.is::<ChatError>() {
            self.0.to_string()
        } else {
            format!("Something went wrong: {}", self.0)
        };

        (status, Json(ErrorResponse::new(&message))).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
