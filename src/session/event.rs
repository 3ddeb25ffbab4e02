//! Session audit log entries.
//!
//! Events are appended on every state transition and never read back by
//! the state machine. They exist for dashboards and post-game review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{PathKind, PlayerSlot};
use crate::questions::QuestionId;

/// A state transition, tagged by `type` on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    GameStart {
        timestamp: DateTime<Utc>,
    },
    PathSelected {
        path: PathKind,
        timestamp: DateTime<Utc>,
    },
    AnswerSubmitted {
        player: PlayerSlot,
        path: PathKind,
        question_id: QuestionId,
        answer: String,
        correct: bool,
        timestamp: DateTime<Utc>,
    },
    GameCompleted {
        timestamp: DateTime<Utc>,
    },
}

impl SessionEvent {
    /// When the transition happened.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::GameStart { timestamp }
            | Self::PathSelected { timestamp, .. }
            | Self::AnswerSubmitted { timestamp, .. }
            | Self::GameCompleted { timestamp } => *timestamp,
        }
    }

    /// Wire tag of the event.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GameStart { .. } => "game_start",
            Self::PathSelected { .. } => "path_selected",
            Self::AnswerSubmitted { .. } => "answer_submitted",
            Self::GameCompleted { .. } => "game_completed",
        }
    }
}

/// An incorrect submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongAnswer {
    pub path: PathKind,
    pub question_id: QuestionId,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}
