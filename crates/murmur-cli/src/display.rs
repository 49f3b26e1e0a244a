//! Terminal display surface.
//!
//! Committed turns print as labeled blocks; the in-progress reply redraws
//! its open (last) line in place with `\r`, committing completed lines to
//! the scrollback as they are produced.

use std::io::Write;

use colored::Colorize;

use murmur_core::{Role, Turn, TranscriptView};

/// A `TranscriptView` backed by stdout.
pub struct TerminalView {
    /// Whether an in-progress reply block is open (label already printed).
    pending_active: bool,
    /// Byte offset into the reply text already committed to the scrollback.
    committed: usize,
    /// Display width (chars) of the currently drawn open line.
    drawn: usize,
}

impl TerminalView {
    pub fn new() -> Self {
        TerminalView {
            pending_active: false,
            committed: 0,
            drawn: 0,
        }
    }

    fn assistant_label() -> colored::ColoredString {
        "Murmur ›".cyan().bold()
    }

    /// Open the in-progress block if this is the first update.
    fn begin_pending(&mut self) {
        if !self.pending_active {
            println!("{}", Self::assistant_label());
            self.pending_active = true;
            self.committed = 0;
            self.drawn = 0;
        }
    }

    /// Erase the currently drawn open line.
    fn clear_open_line(&self, out: &mut impl Write) {
        let _ = write!(out, "\r{}\r", " ".repeat(self.drawn));
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptView for TerminalView {
    fn show_turn(&mut self, turn: &Turn) {
        match turn.role {
            Role::System => {}
            Role::User => {
                println!("{} {}", "You ›".green().bold(), turn.content);
            }
            Role::Assistant => {
                println!("{}", Self::assistant_label());
                println!("{}", turn.content);
                println!();
            }
        }
    }

    fn update_pending(&mut self, preview: &str) {
        self.begin_pending();
        let mut out = std::io::stdout();

        // The preview grows by appending, so everything before the last
        // newline is stable and can be committed to the scrollback.
        let open_start = open_line_start(preview);
        if open_start > self.committed {
            self.clear_open_line(&mut out);
            let _ = write!(out, "{}", preview.get(self.committed..open_start).unwrap_or(""));
            self.committed = open_start;
            self.drawn = 0;
        }

        let open = preview.get(open_start..).unwrap_or("");
        let width = open.chars().count();
        let pad = self.drawn.saturating_sub(width);
        let _ = write!(out, "\r{}{}", open, " ".repeat(pad));
        let _ = out.flush();
        self.drawn = width;
    }

    fn finish_pending(&mut self, text: &str) {
        self.begin_pending();
        let mut out = std::io::stdout();

        self.clear_open_line(&mut out);
        let _ = write!(out, "{}", text.get(self.committed..).unwrap_or(""));
        let _ = writeln!(out);
        let _ = writeln!(out);
        let _ = out.flush();

        self.pending_active = false;
        self.committed = 0;
        self.drawn = 0;
    }
}

/// Byte offset where the open (last) line of `s` starts.
fn open_line_start(s: &str) -> usize {
    s.rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Print the banner shown at REPL start.
pub fn print_banner(model: &str, host: &str) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "Murmur".cyan().bold(), version.dimmed());
    println!("{}", format!("{model} @ {host}").dimmed());
    println!("{}", "Type a message, or \"exit\" to quit.".dimmed());
    println!();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
