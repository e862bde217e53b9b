//! REPL (Read-Eval-Print Loop) for testing an agent interactively
//!
//! The REPL owns the visible transcript and serializes turns: each line is
//! submitted and awaited before the next prompt is shown, which is what
//! enforces the controller's single-outstanding-turn precondition.

use crate::output::console::{ConsoleFormatter, ConsoleTurnSink};
use chatzia_application::SubmitTurnUseCase;
use chatzia_domain::{AgentProfile, Transcript};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

/// Interactive chat REPL for one agent
pub struct ChatRepl {
    use_case: SubmitTurnUseCase,
    profile: AgentProfile,
    transcript: Transcript,
    show_banner: bool,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl for the given agent
    pub fn new(use_case: SubmitTurnUseCase, profile: AgentProfile) -> Self {
        let mut repl = Self {
            use_case,
            profile,
            transcript: Transcript::new(),
            show_banner: true,
            history_file: None,
        };
        repl.seed_greeting();
        repl
    }

    /// Set whether to show the welcome banner
    pub fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// Override the readline history location (defaults to the user data dir).
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    fn greeting(&self) -> String {
        let name = if self.profile.name.is_empty() {
            "tu asistente"
        } else {
            &self.profile.name
        };
        format!("Hola, soy {}. ¿Cómo puedo ayudarte?", name)
    }

    /// The greeting is part of the transcript, so it is included in the
    /// history a freshly built session is seeded with.
    fn seed_greeting(&mut self) {
        let greeting = self.greeting();
        self.transcript.push_agent(greeting);
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self
            .history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("chatzia").join("history.txt")));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        if self.show_banner {
            self.print_welcome();
        }
        println!("{}", self.greeting());
        println!();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.process_message(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("¡Hasta luego!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           ChatzIA - Prueba tu Agente        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Agente: {}", self.profile.name);
        println!();
        println!("Comandos:");
        println!("  /help        - Mostrar esta ayuda");
        println!("  /agent       - Resumen del agente cargado");
        println!("  /transcript  - Mostrar la conversación");
        println!("  /clear       - Reiniciar la conversación");
        println!("  /quit        - Salir");
        println!();
    }

    /// Handle slash commands. Returns true if the REPL should exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("¡Hasta luego!");
                true
            }
            "/help" | "/h" | "/?" => {
                self.print_welcome();
                false
            }
            "/agent" => {
                println!();
                print!("{}", ConsoleFormatter::format_agent_summary(&self.profile));
                println!();
                false
            }
            "/transcript" => {
                println!();
                print!("{}", ConsoleFormatter::format_transcript(&self.transcript));
                println!();
                false
            }
            "/clear" => {
                // The warm session still holds the old exchange; drop it so
                // the next turn starts from the visible (empty) history.
                self.use_case.invalidate_session();
                self.transcript.clear();
                self.seed_greeting();
                println!("Conversación reiniciada.");
                println!("{}", self.greeting());
                println!();
                false
            }
            _ => {
                println!("Comando desconocido: {}", cmd);
                println!("Escribe /help para ver los comandos disponibles");
                false
            }
        }
    }

    async fn process_message(&mut self, message: &str) {
        println!();

        let mut sink = ConsoleTurnSink;
        self.use_case
            .submit(message, &self.profile, &mut self.transcript, &mut sink)
            .await;

        println!();
        println!();
    }
}
