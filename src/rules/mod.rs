//! The session state machine.
//!
//! `Unregistered → Created → Started → PathSelecting ⇄ AnsweringQuestion → Completed`
//!
//! - `transition`: start, select path, submit answer, current question
//! - `policy`: the single wrong-answer step, driven by the config table
//! - `outcome`: result payloads of the mutating transitions
//!
//! Transitions operate on one `Session` and know nothing about locking;
//! the engine registry serializes calls per session.

pub mod outcome;
pub mod policy;
pub mod transition;

pub use outcome::{AnswerOutcome, PathSelection, Penalty, StartOutcome};
pub use transition::{current_question, select_path, start, submit_answer};
