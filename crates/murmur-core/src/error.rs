//! Error taxonomy for chat exchanges.
//!
//! All failures surface to the caller; the transcript keeps whatever was
//! committed before the failure and no assistant turn is appended for the
//! aborted exchange.

use thiserror::Error;

/// Failures while requesting a reply from the inference backend.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The backend could not be reached, or the connection dropped mid-reply.
    #[error("inference backend unavailable: {0}")]
    InferenceUnavailable(String),

    /// The backend was reached but reported an error (HTTP status or an
    /// in-band error line in a stream).
    #[error("inference backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The backend sent a body or stream line that could not be decoded.
    #[error("malformed reply from backend: {0}")]
    MalformedReply(String),
}
