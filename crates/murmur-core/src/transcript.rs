//! Transcript accumulator — the ordered turn history of one chat session.
//!
//! A [`Transcript`] is exclusively owned by its session and only ever grows:
//! a user turn is appended when input is submitted, and the matching
//! assistant turn is appended once the reply has fully resolved. While a
//! streamed reply is in flight, fragments are folded into a [`ReplyBuffer`]
//! whose preview (`accumulated text + cursor marker`) feeds the display
//! surface's in-progress slot.

use tracing::debug;

use crate::types::{Role, Turn};
use crate::view::TranscriptView;

/// Marker appended to in-progress previews while a reply streams in.
pub const CURSOR: &str = "▌";

// ─────────────────────────────────────────────
// Transcript
// ─────────────────────────────────────────────

/// Ordered, append-only sequence of turns for one session.
///
/// Invariants (maintained by well-formed usage, not enforced): at most one
/// system turn, and if present it is first; user and assistant turns
/// alternate after it, starting with user.
#[derive(Clone, Debug)]
pub struct Transcript {
    turns: Vec<Turn>,
    model: String,
}

impl Transcript {
    /// Create an empty transcript bound to a model for the session lifetime.
    pub fn new(model: impl Into<String>) -> Self {
        Transcript {
            turns: Vec::new(),
            model: model.into(),
        }
    }

    /// Seed the transcript with an optional system prompt.
    ///
    /// Ignored once any turn exists — seeding is a session-start operation.
    pub fn seed(&mut self, system_prompt: Option<&str>) {
        if !self.turns.is_empty() {
            debug!("seed called on a non-empty transcript, ignoring");
            return;
        }
        if let Some(prompt) = system_prompt {
            self.turns.push(Turn::system(prompt));
        }
    }

    /// Append a user turn.
    ///
    /// Empty or whitespace-only input counts as "no submission": nothing is
    /// appended and `false` is returned.
    pub fn append_user(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.turns.push(Turn::user(text));
        true
    }

    /// Append the assistant turn for a fully resolved reply.
    pub fn commit_reply(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::assistant(text));
    }

    /// The full turn history, in conversation order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The model identifier for this session.
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Bulk-render all committed turns to a view, skipping system turns.
pub fn render_transcript(transcript: &Transcript, view: &mut dyn TranscriptView) {
    for turn in transcript.turns() {
        if turn.role != Role::System {
            view.show_turn(turn);
        }
    }
}

// ─────────────────────────────────────────────
// ReplyBuffer
// ─────────────────────────────────────────────

/// Accumulates streamed reply fragments in arrival order.
///
/// The fold is pure: it owns no display state, so concatenation can be
/// tested without a UI. The owner decides when to push each preview to the
/// in-progress slot.
#[derive(Debug, Default)]
pub struct ReplyBuffer {
    text: String,
}

impl ReplyBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one fragment into the buffer.
    ///
    /// A `None` fragment contributes nothing. Returns `true` when the
    /// buffer changed, i.e. when the in-progress slot is worth redrawing.
    pub fn push(&mut self, fragment: Option<&str>) -> bool {
        match fragment {
            Some(delta) if !delta.is_empty() => {
                self.text.push_str(delta);
                true
            }
            _ => false,
        }
    }

    /// The accumulated text followed by the cursor marker.
    pub fn preview(&self) -> String {
        format!("{}{}", self.text, CURSOR)
    }

    /// The accumulated text so far.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the buffer, yielding the final reply text.
    pub fn finish(self) -> String {
        self.text
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
