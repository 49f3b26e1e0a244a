//! Inference backend trait — the consumed chat capability.
//!
//! The backend is an opaque external dependency: given the model and the
//! full turn history it produces either one complete reply or a lazy
//! sequence of fragments. [`crate::ollama::OllamaClient`] is the HTTP
//! implementation; tests substitute scripted backends.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use murmur_core::{ChatError, Turn};

/// One increment of a streamed reply. `None` carries no text and
/// contributes nothing to the accumulated reply.
pub type Fragment = Option<String>;

/// A finite, ordered, non-restartable sequence of reply fragments.
///
/// The sequence ends when the underlying call completes; an `Err` item
/// aborts the reply.
pub type FragmentStream = BoxStream<'static, Result<Fragment, ChatError>>;

/// Trait that all inference backends implement.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Request one complete reply for the given turn history.
    ///
    /// Blocks (asynchronously) until the backend returns the full text.
    async fn chat(&self, model: &str, turns: &[Turn]) -> Result<String, ChatError>;

    /// Request a streamed reply for the given turn history.
    ///
    /// Fragments arrive in generation order and must be concatenated in
    /// arrival order by the consumer.
    async fn chat_stream(&self, model: &str, turns: &[Turn]) -> Result<FragmentStream, ChatError>;

    /// The default model for this backend instance.
    fn default_model(&self) -> &str;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
