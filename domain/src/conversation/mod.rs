//! Conversation transcript and streaming events

pub mod entities;
pub mod stream;
