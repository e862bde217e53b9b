//! Agent profile domain entities
//!
//! An [`AgentProfile`] is the immutable-per-turn snapshot the conversation
//! core receives on every submit: the agent's display name plus the uploaded
//! documents and authored Q&A pairs that ground its answers.

use serde::{Deserialize, Serialize};

/// An uploaded training document (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingDocument {
    /// Original filename, used to label the content in the grounding text
    pub name: String,
    /// Full text content of the document
    pub content: String,
    /// Size of the original upload in bytes
    pub byte_size: u64,
}

impl TrainingDocument {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let byte_size = content.len() as u64;
        Self {
            name: name.into(),
            content,
            byte_size,
        }
    }
}

/// A manually authored question/answer pair (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub id: String,
    pub title: String,
    pub question: String,
    pub answer: String,
}

/// A knowledge-grounded chat persona (Entity)
///
/// `id` is the stable identity for the lifetime of a conversation: editing
/// the name, documents, or Q&A pairs never changes it. The session cache
/// keys on `id` alone, so content-only edits do not evict a warm session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub documents: Vec<TrainingDocument>,
    #[serde(default)]
    pub qa_pairs: Vec<QaPair>,
}

impl AgentProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            documents: Vec::new(),
            qa_pairs: Vec::new(),
        }
    }

    /// Add a document (builder style)
    pub fn with_document(mut self, document: TrainingDocument) -> Self {
        self.documents.push(document);
        self
    }

    /// Add a Q&A pair (builder style)
    pub fn with_qa_pair(mut self, qa: QaPair) -> Self {
        self.qa_pairs.push(qa);
        self
    }

    /// Total byte size of all uploaded documents
    pub fn total_document_bytes(&self) -> u64 {
        self.documents.iter().map(|d| d.byte_size).sum()
    }
}
