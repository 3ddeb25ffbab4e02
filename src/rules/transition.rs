//! Session state transitions.
//!
//! Each function takes one session, checks every precondition, and only
//! then writes. A transition that returns `Err` has not touched the
//! session. A transition that returns `Ok` after changing anything has
//! bumped the version exactly once.

use chrono::{DateTime, Utc};

use super::outcome::{AnswerOutcome, PathSelection, Penalty, StartOutcome};
use crate::core::{GameConfig, PathKind, PlayerSlot, SessionError};
use crate::session::{CurrentQuestion, Session, SessionEvent, WrongAnswer};

/// Start the game clock. Idempotent.
pub fn start(session: &mut Session, now: DateTime<Utc>) -> StartOutcome {
    if let Some(start_time) = session.start_time {
        return StartOutcome {
            start_time,
            already_started: true,
        };
    }

    session.start_time = Some(now);
    session.bump_version();
    session.record(SessionEvent::GameStart { timestamp: now });

    StartOutcome {
        start_time: now,
        already_started: false,
    }
}

/// Put the team on `path` at its first question.
///
/// Switching paths mid-way is allowed and restarts the new path; the
/// current player is left as is.
pub fn select_path(
    session: &mut Session,
    config: &GameConfig,
    path: PathKind,
    now: DateTime<Utc>,
) -> Result<PathSelection, SessionError> {
    let questions = config.questions.path(path);
    let first = match (config.path(path), questions.first()) {
        (Some(_), Some(first)) => first,
        _ => {
            return Err(SessionError::InvalidInput(format!(
                "{path} path is not configured"
            )))
        }
    };
    ensure_live(session)?;
    if session.is_locked(path) {
        return Err(SessionError::PathLocked(path));
    }

    session.current_path = Some(path);
    session.current_question_index = 0;
    session.path_start_time = Some(now);
    session.bump_version();
    session.record(SessionEvent::PathSelected {
        path,
        timestamp: now,
    });

    Ok(PathSelection {
        path,
        question: first.clone(),
        current_player: session.current_player,
        total_questions: questions.len(),
    })
}

/// Judge `answer` from `player` against the current question.
pub fn submit_answer(
    session: &mut Session,
    config: &GameConfig,
    answer: &str,
    player: PlayerSlot,
    now: DateTime<Utc>,
) -> Result<AnswerOutcome, SessionError> {
    ensure_live(session)?;
    if player != session.current_player {
        return Err(SessionError::WrongPlayer {
            expected: session.current_player,
        });
    }
    let path = session
        .current_path
        .ok_or_else(|| SessionError::InvalidState("No path selected yet".to_string()))?;
    let row = config
        .path(path)
        .ok_or_else(|| SessionError::InvalidState(format!("{path} path is not configured")))?;
    let questions = config.questions.path(path);
    let question = questions.get(session.current_question_index).ok_or_else(|| {
        SessionError::InvalidState(format!(
            "question {} is past the end of the {path} path",
            session.current_question_index + 1
        ))
    })?;

    let correct = question.is_correct(answer);
    session.bump_version();
    session.record(SessionEvent::AnswerSubmitted {
        player,
        path,
        question_id: question.id,
        answer: answer.to_string(),
        correct,
        timestamp: now,
    });

    if correct {
        session.current_question_index += 1;
        session.current_player = session.current_player.other();

        return Ok(match questions.get(session.current_question_index) {
            Some(next) => AnswerOutcome::Correct {
                next_question: next.clone(),
                current_player: session.current_player,
                question_number: session.current_question_index + 1,
                total_questions: questions.len(),
            },
            None => {
                session.end_time = Some(now);
                session.record(SessionEvent::GameCompleted { timestamp: now });
                AnswerOutcome::Completed {
                    total_time: session.total_time_secs(now),
                    penalties: session.total_penalty_seconds,
                }
            }
        });
    }

    session.wrong_answers.push_back(WrongAnswer {
        path,
        question_id: question.id,
        answer: answer.to_string(),
        timestamp: now,
    });
    session.total_penalty_seconds =
        session.total_penalty_seconds.saturating_add(row.penalty_seconds);
    let next = row.policy.apply(session, path);

    Ok(AnswerOutcome::Incorrect(Penalty::new(
        row,
        session.total_penalty_seconds,
        next.and_then(|i| questions.get(i)).cloned(),
        session.current_player,
        session.hard_path_locked(),
    )))
}

/// The full current question, or `Complete` once the path is exhausted.
pub fn current_question(
    session: &Session,
    config: &GameConfig,
) -> Result<CurrentQuestion, SessionError> {
    let path = session
        .current_path
        .ok_or_else(|| SessionError::InvalidState("No path selected yet".to_string()))?;
    if session.is_complete() {
        return Ok(CurrentQuestion::Complete);
    }

    let questions = config.questions.path(path);
    Ok(match questions.get(session.current_question_index) {
        Some(question) => CurrentQuestion::Active {
            question: question.clone(),
            current_player: session.current_player,
            question_number: session.current_question_index + 1,
            total_questions: questions.len(),
        },
        None => CurrentQuestion::Complete,
    })
}

fn ensure_live(session: &Session) -> Result<(), SessionError> {
    if !session.is_started() {
        return Err(SessionError::InvalidState("Game not started".to_string()));
    }
    if session.is_complete() {
        return Err(SessionError::InvalidState("Game already complete".to_string()));
    }
    Ok(())
}
