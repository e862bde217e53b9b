//! Domain layer for chatzia
//!
//! This crate contains the core entities and pure logic of the conversation
//! core: agent profiles, the conversation transcript, streaming events, and
//! the knowledge compiler. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Agent
//!
//! A named, user-configured knowledge-grounded chat persona. Its documents
//! and Q&A pairs form the *grounding text* that constrains model answers.
//!
//! ## Transcript
//!
//! The ordered sequence of turns visible to the user. Chunk writes go
//! through an explicit [`TurnHandle`] captured at submit time, so a late
//! chunk from an abandoned stream can never corrupt a newer turn.

pub mod agent;
pub mod conversation;
pub mod core;
pub mod knowledge;

// Re-export commonly used types
pub use agent::entities::{AgentProfile, QaPair, TrainingDocument};
pub use conversation::{
    entities::{Speaker, Transcript, Turn, TurnHandle},
    stream::StreamEvent,
};
pub use core::{error::DomainError, model::Model};
pub use knowledge::compiler::{CompiledKnowledge, KnowledgeCompiler};
