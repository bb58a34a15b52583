//! Chat sessions with a bounded, in-memory history.
mod core;
mod models;
mod prompt;
mod store;

pub use self::core::{
    COMPLETION_PARAMS, Chat, ChatError, ChatInput, ChatReply, FALLBACK_REPLY, build_prompt,
    new_session_id,
};
pub use models::{History, MAX_HISTORY_TURNS, Turn, TurnRole};
pub use prompt::Language;
pub use store::{SessionLease, SessionLimits, SessionStore};
