//! Interactive REPL.
//!
//! Uses `rustyline` for readline-style editing with persistent history.

use anyhow::Result;
use colored::Colorize;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use murmur_client::{ChatSession, OllamaClient};
use murmur_core::render_transcript;

use crate::display::{print_banner, TerminalView};

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Run the interactive REPL loop.
pub async fn run(session: &mut ChatSession<OllamaClient>, host: &str) -> Result<()> {
    print_banner(session.transcript().model(), host);

    let mut view = TerminalView::new();
    render_transcript(session.transcript(), &mut view);

    let mut editor = create_editor()?;

    loop {
        // Read input
        let input = match editor.readline("› ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ctrl-C — exit cleanly
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                // Ctrl-D — exit cleanly
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        // Check exit commands
        if is_exit_command(trimmed) {
            println!("\nGoodbye!");
            break;
        }

        // Add to history
        let _ = editor.add_history_entry(&input);

        debug!(input = trimmed, "processing input");

        if let Err(e) = session.submit(trimmed, &mut view).await {
            eprintln!("\n{} {e}\n", "error:".red().bold());
        }
    }

    // Save history
    save_history(&mut editor);

    Ok(())
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    // Load history from ~/.murmur/history/cli_history
    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded REPL history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save history to disk.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// Path to the history file.
fn history_path() -> std::path::PathBuf {
    murmur_core::utils::get_history_path().join("cli_history")
}

/// Check if input is an exit command.
fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
