//! Conversation transcript entities
//!
//! The [`Transcript`] is the user-visible message list. Streaming writes go
//! through a [`TurnHandle`] captured when the placeholder agent turn is
//! created: a handle addresses one specific turn, so a chunk arriving after
//! the user switched agents (and newer turns were pushed) still lands in the
//! turn it belongs to instead of "the last turn".

use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    User,
    Agent,
}

/// A single turn in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Agent,
            text: text.into(),
        }
    }
}

/// Stable reference to one turn in a transcript.
///
/// Turns are append-only while a handle is live (removal only happens for
/// the handle's own empty placeholder), so the index stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnHandle(usize);

/// The ordered, user-visible conversation (Entity)
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
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

    /// Append a user turn
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::user(text));
    }

    /// Append a complete agent turn (e.g. the greeting)
    pub fn push_agent(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::agent(text));
    }

    /// Append an empty agent turn and return a handle to it.
    ///
    /// The placeholder makes latency visible immediately; chunks are
    /// appended to it as they stream in.
    pub fn push_placeholder(&mut self) -> TurnHandle {
        self.turns.push(Turn::agent(""));
        TurnHandle(self.turns.len() - 1)
    }

    /// Append a chunk to the turn addressed by `handle`.
    ///
    /// Returns false if the handle no longer addresses a turn (the
    /// placeholder was removed after an early failure).
    pub fn append_chunk(&mut self, handle: TurnHandle, chunk: &str) -> bool {
        match self.turns.get_mut(handle.0) {
            Some(turn) => {
                turn.text.push_str(chunk);
                true
            }
            None => false,
        }
    }

    /// Text currently accumulated in the turn addressed by `handle`
    pub fn text_at(&self, handle: TurnHandle) -> Option<&str> {
        self.turns.get(handle.0).map(|t| t.text.as_str())
    }

    /// Remove the turn addressed by `handle` if it is still an empty agent
    /// placeholder. A turn that received any chunk is kept.
    ///
    /// Returns true if the turn was removed.
    pub fn remove_if_empty(&mut self, handle: TurnHandle) -> bool {
        match self.turns.get(handle.0) {
            Some(turn) if turn.speaker == Speaker::Agent && turn.text.is_empty() => {
                self.turns.remove(handle.0);
                true
            }
            _ => false,
        }
    }

    /// Drop all turns (agent switch resets the visible conversation)
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_chunk_targets_handle_turn() {
        let mut transcript = Transcript::new();
        transcript.push_user("hola");
        let handle = transcript.push_placeholder();

        assert!(transcript.append_chunk(handle, "Buenos"));
        assert!(transcript.append_chunk(handle, " días"));

        assert_eq!(transcript.text_at(handle), Some("Buenos días"));
        assert_eq!(transcript.turns()[0].text, "hola");
    }

    #[test]
    fn test_handle_survives_later_turns() {
        let mut transcript = Transcript::new();
        let handle = transcript.push_placeholder();
        transcript.push_user("otra pregunta");
        transcript.push_agent("otra respuesta");

        assert!(transcript.append_chunk(handle, "tarde"));
        assert_eq!(transcript.text_at(handle), Some("tarde"));
        assert_eq!(transcript.turns()[2].text, "otra respuesta");
    }

    #[test]
    fn test_remove_if_empty_only_removes_empty_placeholder() {
        let mut transcript = Transcript::new();
        transcript.push_user("hola");
        let handle = transcript.push_placeholder();

        transcript.append_chunk(handle, "parcial");
        assert!(!transcript.remove_if_empty(handle));
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_remove_if_empty_removes_untouched_placeholder() {
        let mut transcript = Transcript::new();
        transcript.push_user("hola");
        let handle = transcript.push_placeholder();

        assert!(transcript.remove_if_empty(handle));
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.turns()[0].speaker, Speaker::User);
    }

    #[test]
    fn test_remove_if_empty_never_removes_user_turn() {
        let mut transcript = Transcript::new();
        let handle = transcript.push_placeholder();
        transcript.remove_if_empty(handle);
        transcript.push_user("");

        // Stale handle now points at the empty user turn; it must stay.
        assert!(!transcript.remove_if_empty(handle));
        assert_eq!(transcript.len(), 1);
    }
}
