//! Streaming events for chat session communication.
//!
//! [`StreamEvent`] represents individual events in a streaming model
//! response, bridging infrastructure-level streaming (SSE chunks from the
//! Gemini API, or the synthesized mock stream) to the application layer so
//! output can be displayed as it is generated.

/// An event in a streaming chat response.
///
/// Chunks within one turn are strictly ordered: the consumer awaits each
/// event before the next is requested, never buffering out of order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text chunk from the model.
    Delta(String),
    /// The complete response text (signals stream end).
    Completed(String),
    /// A transport failure that occurred during streaming.
    Error(String),
}

impl StreamEvent {
    /// Returns the text content if this is a Delta or Completed event.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta(s) | StreamEvent::Completed(s) => Some(s),
            StreamEvent::Error(_) => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed(_) | StreamEvent::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_text_returns_content() {
        let event = StreamEvent::Delta("hola".to_string());
        assert_eq!(event.text(), Some("hola"));
        assert!(!event.is_terminal());
    }

    #[test]
    fn completed_is_terminal() {
        let event = StreamEvent::Completed("respuesta completa".to_string());
        assert_eq!(event.text(), Some("respuesta completa"));
        assert!(event.is_terminal());
    }

    #[test]
    fn error_is_terminal_without_text() {
        let event = StreamEvent::Error("boom".to_string());
        assert_eq!(event.text(), None);
        assert!(event.is_terminal());
    }
}
