//! Conversation state: the displayed transcript and the memory fed to the agent.
//!
//! Both are append-only during a session and are cleared together. They are
//! kept apart because a failed turn is shown to the user but never becomes
//! reasoning context.

pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use memory::ConversationMemory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Transcript + memory for one session.
#[derive(Debug, Default)]
pub struct Conversation {
    transcript: Vec<Turn>,
    memory: ConversationMemory,
}

impl Conversation {
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn push_user(&mut self, content: &str) {
        self.transcript.push(Turn::new(Role::User, content));
    }

    /// Records a successful exchange: the reply is displayed and both sides
    /// become context for the next turn.
    pub fn record_exchange(&mut self, utterance: &str, reply: &str) {
        self.transcript.push(Turn::new(Role::Assistant, reply));
        self.memory.append(Role::User, utterance);
        self.memory.append(Role::Assistant, reply);
    }

    /// Records a failed turn's diagnostic. Display only.
    pub fn record_failure(&mut self, diagnostic: &str) {
        self.transcript.push(Turn::new(Role::Assistant, diagnostic));
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
        self.memory.clear();
    }
}
