//! Display surface contract.
//!
//! The transcript owner drives a [`TranscriptView`] in two modes: bulk
//! rendering of committed turns, and repeated overwrites of a single
//! in-progress slot while a reply is being accumulated.

use crate::types::Turn;

/// A surface that can display a conversation.
///
/// The in-progress slot is a single mutable display location: every
/// `update_pending` call replaces whatever the previous call showed, and
/// `finish_pending` replaces it one last time with the completed text.
pub trait TranscriptView {
    /// Display one committed turn.
    fn show_turn(&mut self, turn: &Turn);

    /// Overwrite the in-progress slot with a reply preview.
    fn update_pending(&mut self, preview: &str);

    /// Overwrite the in-progress slot with the final reply text.
    fn finish_pending(&mut self, text: &str);
}
