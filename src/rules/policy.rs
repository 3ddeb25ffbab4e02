//! Wrong-answer policy application.
//!
//! The answer transition calls `apply` with whatever policy the path's
//! config row names. Adding a path or a policy only touches the config
//! table and the match below.

use crate::core::{PathKind, PenaltyPolicy, PlayerSlot};
use crate::session::Session;

impl PenaltyPolicy {
    /// Rewind `session`'s progress on `path` after a wrong answer.
    ///
    /// Returns the index of the question to serve next, or `None` when the
    /// team has been sent back to path selection.
    pub(crate) fn apply(self, session: &mut Session, path: PathKind) -> Option<usize> {
        match self {
            Self::Retry => Some(session.current_question_index),
            Self::ResetToStart => {
                session.current_question_index = 0;
                session.current_player = PlayerSlot::One;
                Some(0)
            }
            Self::EjectAndLock => {
                session.current_path = None;
                session.current_question_index = 0;
                session.current_player = PlayerSlot::One;
                session.lock_path(path);
                None
            }
        }
    }
}
