use crate::conversation::{Role, Turn};

/// Ordered, unbounded buffer of prior turns exposed to the reasoning loop.
#[derive(Debug, Default, Clone)]
pub struct ConversationMemory {
    turns: Vec<Turn>,
}

impl ConversationMemory {
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(Turn::new(role, content));
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Read-only view in insertion order.
    pub fn as_context(&self) -> &[Turn] {
        &self.turns
    }

    /// Renders the buffer as `Human:` / `AI:` lines for inclusion in a prompt.
    pub fn render(turns: &[Turn]) -> String {
        turns
            .iter()
            .map(|t| match t.role {
                Role::User => format!("Human: {}", t.content),
                Role::Assistant => format!("AI: {}", t.content),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
