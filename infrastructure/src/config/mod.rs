//! Configuration file loading for chatzia
//!
//! Handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment (`CHATZIA_*`, plus `GEMINI_API_KEY` for the credential)
//! 2. `--config <path>` specified file
//! 3. Project root: `./chatzia.toml` or `./.chatzia.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/chatzia/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileApiConfig, FileChatConfig, FileConfig};
pub use loader::ConfigLoader;
