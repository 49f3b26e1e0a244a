//! Inference client layer for Murmur.
//!
//! # Architecture
//!
//! - [`traits::ChatBackend`] — trait the inference capability implements
//! - [`ollama::OllamaClient`] — HTTP client for a local Ollama server
//! - [`session::ChatSession`] — the exchange driver owning one transcript

pub mod ollama;
pub mod session;
pub mod traits;

// Re-export main types for convenience
pub use ollama::{OllamaClient, DEFAULT_HOST};
pub use session::ChatSession;
pub use traits::{ChatBackend, Fragment, FragmentStream};
