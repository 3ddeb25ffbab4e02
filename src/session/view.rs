//! Read-only projections of a session.
//!
//! Views are built while the session lock is held and own all their data,
//! so callers never keep a reference into the session table. The audit
//! logs are `im::Vector`s, so snapshots share them instead of copying.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::Serialize;

use super::event::{SessionEvent, WrongAnswer};
use super::state::Session;
use crate::core::{GameConfig, PathKind, PlayerSlot};
use crate::questions::Question;

/// Full session status.
#[derive(Clone, Debug, Serialize)]
pub struct SessionSnapshot {
    pub team_name: String,
    pub player1: String,
    pub player2: String,
    pub created_at: DateTime<Utc>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub path_start_time: Option<DateTime<Utc>>,
    pub current_path: Option<PathKind>,
    pub current_question: usize,
    pub current_player: PlayerSlot,
    pub total_penalties: u32,
    pub wrong_answers: Vector<WrongAnswer>,
    pub hard_path_locked: bool,
    pub locked_paths: Vec<PathKind>,
    /// Elapsed plus penalties; 0 if never started.
    pub total_time: f64,
    pub events: Vector<SessionEvent>,
    pub state_version: u64,
}

impl SessionSnapshot {
    #[must_use]
    pub fn capture(session: &Session, now: DateTime<Utc>) -> Self {
        Self {
            team_name: session.team_name.clone(),
            player1: session.player_name(PlayerSlot::One).to_string(),
            player2: session.player_name(PlayerSlot::Two).to_string(),
            created_at: session.created_at,
            start_time: session.start_time,
            end_time: session.end_time,
            path_start_time: session.path_start_time,
            current_path: session.current_path,
            current_question: session.current_question_index,
            current_player: session.current_player,
            total_penalties: session.total_penalty_seconds,
            wrong_answers: session.wrong_answers.clone(),
            hard_path_locked: session.hard_path_locked(),
            locked_paths: session.locked_paths().to_vec(),
            total_time: session.total_time_secs(now),
            events: session.events.clone(),
            state_version: session.state_version,
        }
    }
}

/// A question as shown to players: labels only, never correctness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub text: String,
    pub options: Vec<String>,
    /// 1-based position on the path.
    pub number: usize,
    pub total: usize,
}

impl QuestionView {
    #[must_use]
    pub fn new(question: &Question, index: usize, total: usize) -> Self {
        Self {
            text: question.text.clone(),
            options: question.labels().map(str::to_string).collect(),
            number: index + 1,
            total,
        }
    }
}

/// Answer to a poll: what changed since the client's version and what the
/// client should render now.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PollView {
    pub has_changes: bool,
    pub state_version: u64,
    pub game_started: bool,
    pub game_complete: bool,
    pub current_path: Option<PathKind>,
    pub current_player: PlayerSlot,
    pub current_question: usize,
    pub is_your_turn: bool,
    pub total_penalties: u32,
    pub hard_path_locked: bool,
    /// Present only while a path is active and the game is not complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    /// Present only once the game is complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
}

impl PollView {
    #[must_use]
    pub fn project(
        session: &Session,
        config: &GameConfig,
        since_version: u64,
        as_player: PlayerSlot,
        now: DateTime<Utc>,
    ) -> Self {
        let question = match session.current_path {
            Some(path) if !session.is_complete() => {
                let questions = config.questions.path(path);
                questions
                    .get(session.current_question_index)
                    .map(|q| QuestionView::new(q, session.current_question_index, questions.len()))
            }
            _ => None,
        };

        Self {
            has_changes: session.state_version > since_version,
            state_version: session.state_version,
            game_started: session.is_started(),
            game_complete: session.is_complete(),
            current_path: session.current_path,
            current_player: session.current_player,
            current_question: session.current_question_index,
            is_your_turn: session.is_live() && session.current_player == as_player,
            total_penalties: session.total_penalty_seconds,
            hard_path_locked: session.hard_path_locked(),
            question,
            total_time: session.is_complete().then(|| session.total_time_secs(now)),
        }
    }
}

/// The question the team must answer now, with its correctness map.
///
/// Only for trusted callers such as the admin view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CurrentQuestion {
    Active {
        question: Question,
        current_player: PlayerSlot,
        /// 1-based position on the path.
        question_number: usize,
        total_questions: usize,
    },
    Complete,
}
