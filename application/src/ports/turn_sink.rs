//! Port for delivering live-turn output to the UI.
//!
//! The sink is supplied by the presentation layer on every submit. Chunks
//! arrive strictly in stream order; a failed turn produces exactly one
//! `on_error` call with a user-facing, already-localized message (the root
//! cause goes to the diagnostic log, never to the sink).

/// Caller-supplied callbacks receiving chunks and errors for one turn.
pub trait TurnSink: Send {
    /// One incremental fragment of the agent's response.
    fn on_chunk(&mut self, chunk: &str);

    /// The turn failed. `message` is safe to show to the end user.
    fn on_error(&mut self, message: &str);
}

/// No-op sink for tests and headless runs.
pub struct NoTurnSink;

impl TurnSink for NoTurnSink {
    fn on_chunk(&mut self, _chunk: &str) {}
    fn on_error(&mut self, _message: &str) {}
}
