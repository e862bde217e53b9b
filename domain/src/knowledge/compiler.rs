//! Knowledge compiler
//!
//! Serializes an [`AgentProfile`] into the grounding text blob and the
//! system instruction that constrains the model to answer only from that
//! grounding. Pure and deterministic: identical input yields byte-identical
//! output, with no side effects.

use crate::agent::entities::AgentProfile;

/// The compiled grounding for one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledKnowledge {
    /// Natural-language instruction for the model, with the grounding
    /// text embedded.
    pub system_instruction: String,
    /// The raw concatenated document/Q&A content.
    pub grounding_text: String,
}

/// Compiles agent profiles into prompts.
///
/// Recompiled on every session construction (agent-identity change or
/// post-failure rebuild). Within-agent content edits do not reach a live
/// session until the next rebuild; see `SessionCache::get_or_create`.
pub struct KnowledgeCompiler;

impl KnowledgeCompiler {
    /// Compile a profile into its system instruction and grounding text.
    pub fn compile(profile: &AgentProfile) -> CompiledKnowledge {
        let grounding_text = Self::grounding_text(profile);
        let system_instruction = Self::system_instruction(profile, &grounding_text);

        CompiledKnowledge {
            system_instruction,
            grounding_text,
        }
    }

    /// Concatenate documents and Q&A pairs, in array order, with labels.
    fn grounding_text(profile: &AgentProfile) -> String {
        let files = profile
            .documents
            .iter()
            .map(|doc| format!("File: {}\nContent: {}", doc.name, doc.content))
            .collect::<Vec<_>>()
            .join("\n\n");

        let qas = profile
            .qa_pairs
            .iter()
            .map(|qa| format!("Q: {}\nA: {}", qa.question, qa.answer))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "---\nFiles content:\n{}\n---\nFrequently Asked Questions:\n{}\n---",
            files, qas
        )
    }

    fn system_instruction(profile: &AgentProfile, grounding_text: &str) -> String {
        format!(
            r#"Eres un agente de IA de atención al cliente para la plataforma ChatzIA. Tu nombre es "{}".
Tu única función es responder a las preguntas de los usuarios basándote ESTRICTAMENTE en la información proporcionada en el contenido de los archivos y las preguntas frecuentes (Q&A).
NO uses ningún conocimiento externo. Si la respuesta no se encuentra en la información proporcionada, debes decir amablemente: "Lo siento, no tengo información sobre eso." o una frase similar.
Habla siempre en español. Sé conciso y amable.
Aquí está la base de conocimientos: {}"#,
            profile.name, grounding_text
        )
    }
}
