use uuid::Uuid;

use super::models::{History, Turn};
use super::prompt::Language;
use super::store::SessionStore;
use crate::openai::{CompletionParams, Message, Role, SharedCompletion};

/// Used as the assistant's reply when the completion comes back
/// without any text.
pub const FALLBACK_REPLY: &str = "Pika pika!";

pub const COMPLETION_PARAMS: CompletionParams = CompletionParams {
    temperature: 0.9,
    max_tokens: 500,
};

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Message is required")]
    InvalidRequest,
    #[error("Invalid request body: {0}")]
    MalformedBody(String),
    #[error("Failed to generate response")]
    Upstream(anyhow::Error),
}

#[derive(Debug, Default)]
pub struct ChatInput {
    pub session_id: Option<String>,
    pub message: Option<String>,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub message: String,
    pub session_id: String,
}

/// Session IDs are only used to look up history, they are not a
/// secret.
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// The system instruction for `language` followed by the history in
/// conversation order.
pub fn build_prompt(language: Language, history: &History) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(Message::new(Role::System, language.system_prompt()));
    messages.extend(history.iter().map(Message::from));
    messages
}

/// Runs one request/response exchange against the completion API
/// while keeping the session history up to date.
#[derive(Clone)]
pub struct Chat {
    sessions: SessionStore,
    client: SharedCompletion,
}

impl Chat {
    pub fn new(sessions: SessionStore, client: SharedCompletion) -> Self {
        Self { sessions, client }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Records the user's message, asks the completion API for a
    /// reply and records that too.
    ///
    /// If the completion fails the user's turn stays in the history
    /// without a matching assistant turn.
    pub async fn next_msg(&self, input: ChatInput) -> Result<ChatReply, ChatError> {
        let message = match input.message {
            Some(m) if !m.is_empty() => m,
            _ => return Err(ChatError::InvalidRequest),
        };
        let session_id = input
            .session_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(new_session_id);

        // Held until the reply is recorded so expiry and eviction skip
        // this session while the completion is pending
        let session = self.sessions.lease(&session_id);
        let history = session.append_and_trim(Turn::user(&message));
        let prompt = build_prompt(input.language, &history);

        // No store lock is held here, only the snapshot in `prompt`
        let completion = self.client.complete(&prompt, &COMPLETION_PARAMS).await;

        let reply = match completion {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => {
                tracing::warn!("Empty completion for session {}", session_id);
                FALLBACK_REPLY.to_string()
            }
            Err(e) => {
                tracing::error!("OpenAI error: {}. Root cause: {}", e, e.root_cause());
                return Err(ChatError::Upstream(e));
            }
        };

        session.append_and_trim(Turn::assistant(&reply));

        Ok(ChatReply {
            message: reply,
            session_id,
        })
    }
}
