//! Results of mutating transitions, shaped for the request layer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::{PathConfig, PathKind, PenaltyPolicy, PlayerSlot};
use crate::questions::Question;

/// Result of `start`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StartOutcome {
    pub start_time: DateTime<Utc>,
    /// The game had already been started; nothing changed.
    pub already_started: bool,
}

/// Result of a successful path selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathSelection {
    pub path: PathKind,
    pub question: Question,
    pub current_player: PlayerSlot,
    pub total_questions: usize,
}

/// Result of a wrong answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Penalty {
    pub path: PathKind,
    /// Seconds added by this answer.
    pub penalty: u32,
    pub policy: PenaltyPolicy,
    /// `retry`, `reset_path` or `eject`.
    pub penalty_type: &'static str,
    /// Player-facing message.
    pub message: String,
    /// Penalty total after this answer.
    pub total_penalties: u32,
    /// Question to serve next; `None` after an eject.
    pub next_question: Option<Question>,
    pub current_player: PlayerSlot,
    pub hard_path_locked: bool,
}

impl Penalty {
    /// Build the payload for a wrong answer charged against `row`.
    #[must_use]
    pub fn new(
        row: &PathConfig,
        total_penalties: u32,
        next_question: Option<Question>,
        current_player: PlayerSlot,
        hard_path_locked: bool,
    ) -> Self {
        let base = format!("Wrong! {}s penalty.", row.penalty_seconds);
        let message = match row.policy {
            PenaltyPolicy::Retry => base,
            PenaltyPolicy::ResetToStart => format!("{base} Reset!"),
            PenaltyPolicy::EjectAndLock => format!("{base} Ejected!"),
        };
        Self {
            path: row.path,
            penalty: row.penalty_seconds,
            policy: row.policy,
            penalty_type: row.policy.tag(),
            message,
            total_penalties,
            next_question,
            current_player,
            hard_path_locked,
        }
    }
}

/// Result of an answer submission.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// Correct, and the path has more questions.
    Correct {
        next_question: Question,
        current_player: PlayerSlot,
        /// 1-based position of `next_question`.
        question_number: usize,
        total_questions: usize,
    },
    /// Correct, and it was the path's last question.
    Completed {
        total_time: f64,
        penalties: u32,
    },
    Incorrect(Penalty),
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        !matches!(self, Self::Incorrect(_))
    }
}
