//! Infrastructure layer for chatzia
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the live Gemini streaming transport, the deterministic
//! mock transport used when no credential is configured, configuration file
//! loading, the TOML agent store, and the JSONL conversation logger.

pub mod agents;
pub mod config;
pub mod gemini;
pub mod logging;
pub mod mock;

// Re-export commonly used types
pub use agents::{AgentStoreError, TomlAgentStore};
pub use config::{ConfigLoader, FileApiConfig, FileChatConfig, FileConfig};
pub use gemini::{error::GeminiError, gateway::GeminiChatGateway, session::GeminiChatSession};
pub use logging::JsonlConversationLogger;
pub use mock::MockChatGateway;
