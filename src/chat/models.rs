//! The core models for keeping a bounded chat history per session.
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::openai::{Message, Role};

/// Maximum number of turns kept for a session. Older turns are
/// dropped first.
pub const MAX_HISTORY_TURNS: usize = 20;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum TurnRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

impl From<TurnRole> for Role {
    fn from(role: TurnRole) -> Self {
        match role {
            TurnRole::User => Role::User,
            TurnRole::Assistant => Role::Assistant,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    pub fn user(content: &str) -> Self {
        Self {
            role: TurnRole::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.to_string(),
        }
    }
}

impl From<&Turn> for Message {
    fn from(turn: &Turn) -> Self {
        Message::new(turn.role.into(), &turn.content)
    }
}

/// Ordered turns of one conversation, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct History(VecDeque<Turn>);

impl History {
    pub fn new() -> Self {
        Self(VecDeque::new())
    }

    /// Append a turn, then drop from the front until at most
    /// `MAX_HISTORY_TURNS` remain.
    pub fn push(&mut self, turn: Turn) {
        self.0.push_back(turn);
        while self.0.len() > MAX_HISTORY_TURNS {
            self.0.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, Turn> {
        self.0.iter()
    }

    pub fn turns(&self) -> Vec<Turn> {
        self.0.iter().cloned().collect()
    }
}
