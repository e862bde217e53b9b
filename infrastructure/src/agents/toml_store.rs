//! TOML agent file loader.
//!
//! The web platform keeps agent profiles in a remote table store; the CLI
//! tester loads them from a TOML file instead:
//!
//! ```toml
//! id = "soporte-tienda"
//! name = "Soporte"
//!
//! [[documents]]
//! name = "precios.txt"
//! content = "El plan base cuesta 10€ al mes."
//!
//! [[documents]]
//! path = "docs/horario.txt"   # read relative to the agent file
//!
//! [[qa]]
//! title = "Devoluciones"
//! question = "¿Aceptan devoluciones?"
//! answer = "Sí, dentro de 30 días."
//! ```

use chatzia_domain::{AgentProfile, QaPair, TrainingDocument};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading an agent file
#[derive(Error, Debug)]
pub enum AgentStoreError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid agent file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Document '{0}' has neither inline content nor a path")]
    MissingContent(String),
}

#[derive(serde::Deserialize)]
struct AgentFile {
    id: Option<String>,
    name: String,
    #[serde(default)]
    documents: Vec<DocumentEntry>,
    #[serde(default, rename = "qa")]
    qa_pairs: Vec<QaEntry>,
}

#[derive(serde::Deserialize)]
struct DocumentEntry {
    name: Option<String>,
    content: Option<String>,
    path: Option<PathBuf>,
}

#[derive(serde::Deserialize)]
struct QaEntry {
    id: Option<String>,
    title: Option<String>,
    question: String,
    answer: String,
}

/// Loads [`AgentProfile`]s from TOML files.
pub struct TomlAgentStore;

impl TomlAgentStore {
    /// Load the agent profile at `path`.
    ///
    /// A missing `id` defaults to the file stem, so the profile identity is
    /// stable across reloads of the same file.
    pub fn load(path: impl AsRef<Path>) -> Result<AgentProfile, AgentStoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| AgentStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: AgentFile = toml::from_str(&raw)?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let id = file.id.unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.name.clone())
        });

        let mut profile = AgentProfile::new(id, file.name);

        for entry in file.documents {
            profile.documents.push(Self::resolve_document(entry, base_dir)?);
        }

        for (index, entry) in file.qa_pairs.into_iter().enumerate() {
            profile.qa_pairs.push(QaPair {
                id: entry.id.unwrap_or_else(|| format!("qa-{}", index + 1)),
                title: entry.title.unwrap_or_else(|| entry.question.clone()),
                question: entry.question,
                answer: entry.answer,
            });
        }

        Ok(profile)
    }

    fn resolve_document(
        entry: DocumentEntry,
        base_dir: &Path,
    ) -> Result<TrainingDocument, AgentStoreError> {
        match (entry.content, entry.path) {
            (Some(content), _) => {
                let name = entry.name.unwrap_or_else(|| "inline".to_string());
                Ok(TrainingDocument::new(name, content))
            }
            (None, Some(rel_path)) => {
                let full_path = base_dir.join(&rel_path);
                let content =
                    std::fs::read_to_string(&full_path).map_err(|source| AgentStoreError::Io {
                        path: full_path,
                        source,
                    })?;
                let name = entry.name.unwrap_or_else(|| {
                    rel_path
                        .file_name()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_else(|| rel_path.display().to_string())
                });
                Ok(TrainingDocument::new(name, content))
            }
            (None, None) => Err(AgentStoreError::MissingContent(
                entry.name.unwrap_or_else(|| "<unnamed>".to_string()),
            )),
        }
    }
}
