//! # maze-quiz
//!
//! Session engine for a two-player quiz game played along difficulty
//! paths, with version-based polling so both players' browsers stay in
//! step.
//!
//! ## Design Principles
//!
//! 1. **Table-Driven Penalties**: Each path names a penalty magnitude and a
//!    `PenaltyPolicy` (retry, reset to start, eject and lock). The state
//!    machine applies whatever the table says.
//!
//! 2. **Strict Turns**: Only the current player's answer is accepted. The
//!    turn passes on a correct answer.
//!
//! 3. **Versioned State**: Every mutating call bumps the session version
//!    exactly once. Polls are read-only and compare against it.
//!
//! ## Concurrency
//!
//! Each session sits behind its own lock, so operations on one team are
//! serialized while different teams proceed in parallel. See
//! `engine::registry`.
//!
//! ## Modules
//!
//! - `core`: Players, clock, configuration, errors
//! - `questions`: Questions and the per-path question bank
//! - `session`: Session state, audit log, read-only views
//! - `rules`: State transitions and penalty policies
//! - `engine`: Session registry and leaderboard
//!
//! ## Example
//!
//! ```
//! use maze_quiz::{PlayerSlot, SessionEngine, AnswerOutcome};
//!
//! let engine = SessionEngine::default();
//! engine.create("Alpha", "Ada", "Brian").unwrap();
//! engine.start("Alpha").unwrap();
//! engine.select_path("Alpha", "easy").unwrap();
//!
//! let outcome = engine.submit_answer("Alpha", "ls", PlayerSlot::One).unwrap();
//! assert!(matches!(outcome, AnswerOutcome::Correct { current_player: PlayerSlot::Two, .. }));
//!
//! let poll = engine.poll("Alpha", 0, PlayerSlot::Two).unwrap();
//! assert!(poll.has_changes && poll.is_your_turn);
//! ```

pub mod core;
pub mod engine;
pub mod questions;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Clock, ConfigError, GameConfig, ManualClock, PathConfig, PathKind, PenaltyPolicy,
    PlayerPair, PlayerSlot, SessionError, SystemClock,
};

pub use crate::questions::{AnswerOption, Question, QuestionBank, QuestionId};

pub use crate::session::{
    CurrentQuestion, PollView, QuestionView, Session, SessionEvent, SessionSnapshot, WrongAnswer,
};

pub use crate::rules::{AnswerOutcome, PathSelection, Penalty, StartOutcome};

pub use crate::engine::{LeaderboardEntry, Registration, SessionEngine};
