//! Agent profile storage — TOML agent files for the CLI tester

mod toml_store;

pub use toml_store::{AgentStoreError, TomlAgentStore};
