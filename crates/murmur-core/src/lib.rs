//! Core of Murmur — the transcript accumulator and its supporting types.
//!
//! # Architecture
//!
//! - [`types`] — role-tagged turns and the chat wire format
//! - [`transcript`] — the append-only [`transcript::Transcript`] plus the
//!   [`transcript::ReplyBuffer`] streaming fold
//! - [`view`] — the display-surface contract
//! - [`error`] — the [`error::ChatError`] taxonomy
//! - [`config`] — on-disk configuration with env overrides
//! - [`utils`] — data-directory paths

pub mod config;
pub mod error;
pub mod transcript;
pub mod types;
pub mod utils;
pub mod view;

// Re-export main types for convenience
pub use error::ChatError;
pub use transcript::{render_transcript, ReplyBuffer, Transcript, CURSOR};
pub use types::{ChatChunk, ChatRequest, ChatResponse, Role, Turn};
pub use view::TranscriptView;
