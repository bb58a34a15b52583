//! Public types for the chat API
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::{Language, Turn};

/// Fields are kept as raw JSON so a wrongly typed value is treated
/// like a missing one instead of failing the whole body.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ChatRequest {
    pub message: Option<Value>,
    pub language: Option<Value>,
}

impl ChatRequest {
    /// Only a JSON string counts as a message.
    pub fn message(&self) -> Option<String> {
        self.message.as_ref().and_then(Value::as_str).map(String::from)
    }

    pub fn language(&self) -> Language {
        Language::from_code(self.language.as_ref().and_then(Value::as_str))
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ChatResponse {
    pub message: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

impl ChatResponse {
    pub fn new(message: &str, session_id: &str) -> Self {
        Self {
            message: message.into(),
            session_id: session_id.into(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ChatTranscriptResponse {
    pub transcript: Vec<Turn>,
}
