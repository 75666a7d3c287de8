use crate::types::{Role, Turn};

/// The ordered, append-only history of turns for one chat session.
///
/// A transcript always opens with the system instruction.  That turn is sent
/// to the remote model with the rest of the context but is never displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Start a transcript seeded with the given system instruction.
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(system_instruction)],
        }
    }

    /// Append a turn.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns, including the system instruction.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The turns a user gets to see: everything after the leading system turn.
    pub fn visible(&self) -> &[Turn] {
        match self.turns.first() {
            Some(first) if first.role() == Role::System => &self.turns[1..],
            _ => &self.turns,
        }
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// The number of turns, including the system instruction.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when the transcript holds no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_with_system_turn() {
        let transcript = Transcript::new("be medical");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.turns()[0].role(), Role::System);
        assert!(transcript.visible().is_empty());
    }

    #[test]
    fn visible_skips_system_turn() {
        let mut transcript = Transcript::new("be medical");
        transcript.push(Turn::user("hello"));
        transcript.push(Turn::model("Hello! How can I help?"));
        let visible = transcript.visible();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].role(), Role::User);
        assert_eq!(visible[1].role(), Role::Model);
        assert_eq!(transcript.last().unwrap().text(), "Hello! How can I help?");
    }
}
