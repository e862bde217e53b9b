//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use chatzia_domain::Model;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw API configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Gemini API key. Absence is not an error: it routes turns to the
    /// mock transport instead.
    pub key: Option<String>,
    /// Model to create sessions with
    pub model: Option<Model>,
}

/// Raw chat configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Path for the JSONL conversation log (disabled when unset)
    pub log_conversation: Option<PathBuf>,
    /// Path to the REPL history file
    pub history_file: Option<PathBuf>,
}

/// Root configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api: FileApiConfig,
    pub chat: FileChatConfig,
}

impl FileConfig {
    /// Whether a live-transport credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api.key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// The model to use, falling back to the domain default.
    pub fn model(&self) -> Model {
        self.api.model.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_credential() {
        let config = FileConfig::default();
        assert!(!config.has_credential());
        assert_eq!(config.model(), Model::default());
    }

    #[test]
    fn test_blank_key_is_no_credential() {
        let config = FileConfig {
            api: FileApiConfig {
                key: Some("   ".to_string()),
                model: None,
            },
            ..Default::default()
        };
        assert!(!config.has_credential());
    }

    #[test]
    fn test_parse_full_config() {
        let config: FileConfig = toml::from_str(
            r#"
            [api]
            key = "AIza-test"
            model = "gemini-2.5-pro"

            [chat]
            log_conversation = "logs/chat.jsonl"
            "#,
        )
        .unwrap();

        assert!(config.has_credential());
        assert_eq!(config.model(), Model::Gemini25Pro);
        assert_eq!(
            config.chat.log_conversation,
            Some(PathBuf::from("logs/chat.jsonl"))
        );
    }
}
