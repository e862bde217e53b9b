//! Console output for the agent tester

use chatzia_application::TurnSink;
use chatzia_domain::{AgentProfile, Speaker, Transcript};
use colored::Colorize;
use std::io::Write;

/// Sink that prints streamed chunks to stdout as they arrive.
///
/// Chunks are flushed immediately so the answer appears character by
/// character; a failed turn prints a red banner under whatever partial
/// output was already shown.
pub struct ConsoleTurnSink;

impl TurnSink for ConsoleTurnSink {
    fn on_chunk(&mut self, chunk: &str) {
        print!("{}", chunk);
        let _ = std::io::stdout().flush();
    }

    fn on_error(&mut self, message: &str) {
        println!();
        println!("{}", message.red().bold());
    }
}

/// Formats transcripts and agent summaries for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the full transcript with speaker labels
    pub fn format_transcript(transcript: &Transcript) -> String {
        let mut output = String::new();

        for turn in transcript.turns() {
            let label = match turn.speaker {
                Speaker::User => "Tú:".blue().bold(),
                Speaker::Agent => "IA:".green().bold(),
            };
            output.push_str(&format!("{} {}\n", label, turn.text));
        }

        if transcript.is_empty() {
            output.push_str("(sin mensajes)\n");
        }

        output
    }

    /// Format a one-screen summary of the loaded agent
    pub fn format_agent_summary(profile: &AgentProfile) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} ({})\n",
            "Agente:".cyan().bold(),
            profile.name,
            profile.id
        ));
        output.push_str(&format!(
            "{} {} ({} bytes)\n",
            "Documentos:".cyan().bold(),
            profile.documents.len(),
            profile.total_document_bytes()
        ));
        for doc in &profile.documents {
            output.push_str(&format!("  - {} ({} bytes)\n", doc.name, doc.byte_size));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Preguntas y respuestas:".cyan().bold(),
            profile.qa_pairs.len()
        ));
        for qa in &profile.qa_pairs {
            output.push_str(&format!("  - {}\n", qa.title));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_formatting_contains_all_turns() {
        let mut transcript = Transcript::new();
        transcript.push_agent("Hola, soy Soporte.");
        transcript.push_user("¿precio?");

        let output = ConsoleFormatter::format_transcript(&transcript);
        assert!(output.contains("Hola, soy Soporte."));
        assert!(output.contains("¿precio?"));
    }

    #[test]
    fn test_agent_summary_lists_documents() {
        let profile = AgentProfile::new("a-1", "Soporte").with_document(
            chatzia_domain::TrainingDocument::new("faq.txt", "contenido"),
        );

        let output = ConsoleFormatter::format_agent_summary(&profile);
        assert!(output.contains("Soporte"));
        assert!(output.contains("faq.txt"));
    }
}
