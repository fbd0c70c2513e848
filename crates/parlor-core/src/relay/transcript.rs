//! The conversation transcript.
//!
//! Append-only, alternating user/assistant turns, owned exclusively by
//! the relay loop for the lifetime of the process. Never persisted.

use parlor_types::llm::{Role, WireMessage};

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// Ordered user/assistant turn history sent with every request to give
/// the model conversational context.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Append a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn {
            role: Role::User,
            content: content.into(),
        });
    }

    /// Append an assistant turn.
    ///
    /// Called with the full concatenated response on success, or with
    /// whatever partial text accumulated before a mid-stream failure --
    /// a sent user turn always gains a matching assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn {
            role: Role::Assistant,
            content: content.into(),
        });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// True when turns strictly alternate user/assistant starting with
    /// user.
    pub fn is_alternating(&self) -> bool {
        self.turns.iter().enumerate().all(|(i, turn)| {
            if i % 2 == 0 {
                turn.role == Role::User
            } else {
                turn.role == Role::Assistant
            }
        })
    }

    /// Project the transcript onto completion wire messages.
    pub fn to_wire(&self) -> Vec<WireMessage> {
        self.turns
            .iter()
            .map(|t| WireMessage::text(t.role.clone(), t.content.clone()))
            .collect()
    }
}
