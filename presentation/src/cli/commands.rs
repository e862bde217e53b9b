//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for chatzia
#[derive(Parser, Debug)]
#[command(name = "chatzia")]
#[command(author, version, about = "Test a knowledge agent in an interactive chat")]
#[command(long_about = r#"
Chatzia loads an agent profile (documents + Q&A pairs) from a TOML file and
starts an interactive chat grounded strictly in that knowledge.

With a Gemini API key (GEMINI_API_KEY, or api.key in the config) responses
stream from the live model; without one, a deterministic mock stream is used
so the tester still works offline.

Configuration files are loaded from (in priority order):
1. --config <path>    Explicit config file
2. ./chatzia.toml     Project-level config
3. ~/.config/chatzia/config.toml   Global config

Example:
  chatzia agents/soporte.toml
  chatzia agents/soporte.toml -m gemini-2.5-pro
  chatzia agents/soporte.toml --mock --log-conversation chat.jsonl
"#)]
pub struct Cli {
    /// Path to the agent profile TOML file
    pub agent: PathBuf,

    /// Path to a config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Model to create sessions with (e.g. gemini-2.5-flash)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Force the mock transport even if a credential is configured
    #[arg(long)]
    pub mock: bool,

    /// Write a JSONL conversation log to this path
    #[arg(long, value_name = "PATH")]
    pub log_conversation: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the welcome banner
    #[arg(short, long)]
    pub quiet: bool,
}
