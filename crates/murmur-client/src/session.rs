//! Chat session driver — one exchange at a time against a backend.
//!
//! A [`ChatSession`] owns the transcript for its lifetime and runs the
//! exchange cycle: append the user turn, request a reply (streamed or not),
//! drive the view's in-progress slot while it accumulates, and commit the
//! finished assistant turn. `submit` is a single sequential operation; the
//! fragment stream is fully drained before it returns.

use futures_util::StreamExt;
use tracing::{debug, warn};

use murmur_core::{ChatError, ReplyBuffer, Transcript, TranscriptView};

use crate::traits::ChatBackend;

/// One chat session: a transcript bound to a backend and a streaming mode.
pub struct ChatSession<B: ChatBackend> {
    transcript: Transcript,
    backend: B,
    streaming: bool,
}

impl<B: ChatBackend> ChatSession<B> {
    /// Create a session, seeding the transcript with an optional persona.
    ///
    /// `model` falls back to the backend's default when `None`.
    pub fn new(
        backend: B,
        model: Option<String>,
        system_prompt: Option<&str>,
        streaming: bool,
    ) -> Self {
        let model = model.unwrap_or_else(|| backend.default_model().to_string());
        let mut transcript = Transcript::new(model);
        transcript.seed(system_prompt);

        ChatSession {
            transcript,
            backend,
            streaming,
        }
    }

    /// The session's turn history.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Run one exchange: append the user turn, resolve the reply, commit it.
    ///
    /// Returns `Ok(false)` for empty input (nothing submitted). On failure
    /// the user turn stays appended, no assistant turn is committed, and no
    /// retry is attempted — the caller decides what to do next.
    pub async fn submit(
        &mut self,
        input: &str,
        view: &mut dyn TranscriptView,
    ) -> Result<bool, ChatError> {
        if !self.transcript.append_user(input) {
            return Ok(false);
        }
        if let Some(turn) = self.transcript.turns().last() {
            view.show_turn(turn);
        }

        let reply = self.request_reply(view).await.map_err(|e| {
            warn!(error = %e, "exchange aborted, no assistant turn committed");
            e
        })?;

        self.transcript.commit_reply(reply);
        Ok(true)
    }

    /// Resolve one reply from the backend, driving the in-progress slot.
    async fn request_reply(&self, view: &mut dyn TranscriptView) -> Result<String, ChatError> {
        let model = self.transcript.model();
        let turns = self.transcript.turns();

        debug!(
            backend = self.backend.display_name(),
            model,
            turns = turns.len(),
            streaming = self.streaming,
            "requesting reply"
        );

        if self.streaming {
            let mut fragments = self.backend.chat_stream(model, turns).await?;
            let mut buffer = ReplyBuffer::new();
            while let Some(fragment) = fragments.next().await {
                if buffer.push(fragment?.as_deref()) {
                    view.update_pending(&buffer.preview());
                }
            }
            let text = buffer.finish();
            view.finish_pending(&text);
            Ok(text)
        } else {
            // One atomic fragment.
            let text = self.backend.chat(model, turns).await?;
            view.finish_pending(&text);
            Ok(text)
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
