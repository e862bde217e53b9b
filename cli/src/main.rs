//! CLI entrypoint for chatzia
//!
//! This is the main binary that wires together all layers using
//! dependency injection: config, agent profile, transport selection
//! (live Gemini vs mock), and the interactive REPL.

use anyhow::{Context, Result};
use chatzia_application::{ChatGateway, ConversationLogger, SubmitTurnUseCase};
use chatzia_domain::Model;
use chatzia_infrastructure::{
    ConfigLoader, GeminiChatGateway, JsonlConversationLogger, MockChatGateway, TomlAgentStore,
};
use chatzia_presentation::{ChatRepl, Cli};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting chatzia");

    let config = ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to load configuration")?;

    // CLI flag overrides the configured model
    let model: Model = match &cli.model {
        Some(name) => name.parse().with_context(|| {
            format!(
                "Valid models: {}",
                Model::all()
                    .iter()
                    .map(Model::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?,
        None => config.model(),
    };

    let profile = TomlAgentStore::load(&cli.agent)
        .with_context(|| format!("Failed to load agent file {}", cli.agent.display()))?;

    info!(
        "Loaded agent '{}' ({} documents, {} Q&A pairs)",
        profile.name,
        profile.documents.len(),
        profile.qa_pairs.len()
    );

    // === Dependency Injection ===
    // Credential presence selects the transport; absence is not an error.
    let gateway: Arc<dyn ChatGateway> = if cli.mock || !config.has_credential() {
        if !cli.mock {
            warn!("No API key configured; using the mock transport");
        }
        Arc::new(MockChatGateway)
    } else {
        let key = config.api.key.clone().unwrap_or_default();
        Arc::new(GeminiChatGateway::new(key))
    };

    let mut use_case = SubmitTurnUseCase::new(gateway, model);

    let log_path = cli.log_conversation.clone().or(config.chat.log_conversation.clone());
    if let Some(path) = log_path {
        match JsonlConversationLogger::open(&path) {
            Ok(logger) => {
                info!("Conversation log: {}", logger.path().display());
                use_case =
                    use_case.with_conversation_logger(Arc::new(logger) as Arc<dyn ConversationLogger>);
            }
            Err(e) => warn!(
                "Conversation logging disabled ({}: {})",
                path.display(),
                e
            ),
        }
    }

    let mut repl = ChatRepl::new(use_case, profile)
        .with_banner(!cli.quiet)
        .with_history_file(config.chat.history_file.clone());
    repl.run().await?;

    Ok(())
}
