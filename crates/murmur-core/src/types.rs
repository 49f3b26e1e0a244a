//! Chat types — typed turns and the Ollama `/api/chat` wire format.
//!
//! A conversation is a sequence of role-tagged [`Turn`]s. The wire types
//! (`ChatRequest`, `ChatResponse`, `ChatChunk`) mirror the JSON bodies the
//! Ollama chat endpoint exchanges, so format errors surface at decode time
//! instead of deep inside the client.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Turns
// ─────────────────────────────────────────────

/// The author of a turn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message in a conversation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    /// Create a system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Turn {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Turn {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Turn {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Request body
// ─────────────────────────────────────────────

/// Request body for `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Turn>,
    pub stream: bool,
}

// ─────────────────────────────────────────────
// Response bodies
// ─────────────────────────────────────────────

/// Non-streaming response: one complete reply.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub message: ReplyMessage,
}

/// The assistant message inside a non-streaming response.
#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    pub content: String,
}

/// One NDJSON line of a streaming response.
///
/// Content may be absent on keepalive-style lines and on the terminal
/// `done: true` line; an `error` field reports an in-band failure.
#[derive(Debug, Deserialize)]
pub struct ChatChunk {
    #[serde(default)]
    pub message: Option<ChunkMessage>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// The partial assistant message inside a streaming chunk.
#[derive(Debug, Deserialize)]
pub struct ChunkMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatChunk {
    /// The text delta this chunk contributes, if any.
    pub fn delta(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.content.as_deref())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
