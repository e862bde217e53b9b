//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `CHATZIA_API__KEY` etc., plus `GEMINI_API_KEY`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./chatzia.toml` or `./.chatzia.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/chatzia/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        for filename in &["chatzia.toml", ".chatzia.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("CHATZIA_").split("__"));

        let mut config: FileConfig = figment.extract().map_err(Box::new)?;

        // The credential the original platform reads from the environment.
        if config.api.key.is_none()
            && let Ok(key) = std::env::var("GEMINI_API_KEY")
            && !key.trim().is_empty()
        {
            config.api.key = Some(key);
        }

        Ok(config)
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("chatzia").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_credential_is_picked_up() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GEMINI_API_KEY", "AIza-from-env");
            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert!(config.has_credential());
            assert_eq!(config.api.key.as_deref(), Some("AIza-from-env"));
            Ok(())
        });
    }

    #[test]
    fn test_project_file_is_merged() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "chatzia.toml",
                r#"
                [api]
                model = "gemini-2.0-flash"
                "#,
            )?;
            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.model(), chatzia_domain::Model::Gemini20Flash);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_path_overrides_project_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("chatzia.toml", "[api]\nmodel = \"gemini-2.0-flash\"\n")?;
            jail.create_file("other.toml", "[api]\nmodel = \"gemini-2.5-pro\"\n")?;
            let config =
                ConfigLoader::load(Some(&PathBuf::from("other.toml"))).map_err(|e| *e)?;
            assert_eq!(config.model(), chatzia_domain::Model::Gemini25Pro);
            Ok(())
        });
    }
}
