use std::env;
use std::time::Duration;

use crate::chat::SessionLimits;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_model: String,
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub upstream_timeout: Duration,
    pub session_limits: SessionLimits,
}

// Unset or unparseable values fall back to `None` so a bad env var
// doesn't take down the server on boot
fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    let value = env::var(key).ok()?;
    match value.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring invalid value for {}: {}", key, value);
            None
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let openai_api_hostname =
            env::var("PIKA_LLM_HOST").unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_api_key =
            env::var("OPENAI_API_KEY").unwrap_or_else(|_| "thiswontworkforopenai".to_string());
        let openai_model =
            env::var("PIKA_LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let upstream_timeout =
            Duration::from_secs(env_number("PIKA_UPSTREAM_TIMEOUT_SECS").unwrap_or(60));
        let session_limits = SessionLimits {
            ttl: env_number("PIKA_SESSION_TTL_SECS").map(Duration::from_secs),
            max_sessions: env_number("PIKA_MAX_SESSIONS"),
        };

        Self {
            openai_model,
            openai_api_hostname,
            openai_api_key,
            upstream_timeout,
            session_limits,
        }
    }
}
