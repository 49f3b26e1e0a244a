//! Murmur CLI — entry point.
//!
//! # Commands
//!
//! - `murmur chat [-m MESSAGE]` — chat with a local model (single-shot or REPL)
//! - `murmur onboard` — initialize config
//! - `murmur status` — show configuration

mod display;
mod onboard;
mod repl;
mod status;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use murmur_client::{ChatSession, OllamaClient};
use murmur_core::config::{load_config, Config};

use crate::display::TerminalView;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Murmur — chat with a locally running language model
#[derive(Parser)]
#[command(name = "murmur", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the model (single-shot or interactive REPL)
    Chat {
        /// Single message (non-interactive). Omit for REPL mode.
        #[arg(short, long)]
        message: Option<String>,

        /// Model to use (overrides config)
        #[arg(long)]
        model: Option<String>,

        /// System prompt / persona (overrides config)
        #[arg(long)]
        system: Option<String>,

        /// Disable streamed replies for this session
        #[arg(long, default_value_t = false)]
        no_stream: bool,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Initialize configuration
    Onboard,

    /// Show configuration
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            message,
            model,
            system,
            no_stream,
            logs,
        } => {
            init_logging(logs);
            run_chat(message, model, system, no_stream).await
        }
        Commands::Onboard => onboard::run(),
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Chat command
// ─────────────────────────────────────────────

async fn run_chat(
    message: Option<String>,
    model: Option<String>,
    system: Option<String>,
    no_stream: bool,
) -> Result<()> {
    let config = load_config(None);
    let host = config.chat.host.clone();
    let mut session = build_session(&config, model, system, no_stream);

    match message {
        Some(msg) => {
            // Single-shot mode
            info!(model = session.transcript().model(), "processing single message");
            let mut view = TerminalView::new();
            session
                .submit(&msg, &mut view)
                .await
                .context("chat request failed")?;
        }
        None => {
            // Interactive REPL mode
            repl::run(&mut session, &host).await?;
        }
    }

    Ok(())
}

/// Build a `ChatSession` from the loaded configuration plus CLI overrides.
fn build_session(
    config: &Config,
    model: Option<String>,
    system: Option<String>,
    no_stream: bool,
) -> ChatSession<OllamaClient> {
    let model = model.unwrap_or_else(|| config.chat.model.clone());
    let system_prompt = system.or_else(|| config.chat.system_prompt.clone());
    let streaming = config.chat.stream && !no_stream;

    let backend = OllamaClient::new(config.chat.host.clone(), model.clone());
    ChatSession::new(backend, Some(model), system_prompt.as_deref(), streaming)
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("murmur_core=debug,murmur_client=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_session_uses_config_defaults() {
        let config = Config::default();
        let session = build_session(&config, None, None, false);
        assert_eq!(session.transcript().model(), "llama3");
        assert!(session.transcript().turns().is_empty());
    }

    #[test]
    fn build_session_applies_overrides() {
        let config = Config::default();
        let session = build_session(
            &config,
            Some("mistral".into()),
            Some("You are terse".into()),
            true,
        );
        assert_eq!(session.transcript().model(), "mistral");
        assert_eq!(session.transcript().turns().len(), 1);
        assert_eq!(session.transcript().turns()[0].content, "You are terse");
    }
}
