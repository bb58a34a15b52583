use std::sync::Arc;

use crate::chat::{Chat, SessionStore};
use crate::core::AppConfig;
use crate::openai::OpenAiClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub chat: Chat,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let client = OpenAiClient::new(
            &config.openai_api_hostname,
            &config.openai_api_key,
            &config.openai_model,
            config.upstream_timeout,
        );
        let sessions = SessionStore::new(config.session_limits);
        Self {
            chat: Chat::new(sessions, Arc::new(client)),
        }
    }
}
