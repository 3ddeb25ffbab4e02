//! Per-team session state.
//!
//! ## Session
//!
//! One session per team, holding:
//! - Team name and the two player names
//! - Start / end timestamps (end is the terminal marker)
//! - Current path, question index and whose turn it is
//! - Penalty total, wrong answer log and locked paths
//! - Audit event log
//! - State version for change-detection polling
//!
//! Fields are only written by the transitions in `crate::rules`, each of
//! which bumps `state_version` exactly once.

use chrono::{DateTime, Utc};
use im::Vector;
use smallvec::SmallVec;

use super::event::{SessionEvent, WrongAnswer};
use crate::core::{seconds_between, PathKind, PlayerPair, PlayerSlot};

/// State of one team's game.
#[derive(Clone, Debug)]
pub struct Session {
    pub(crate) team_name: String,
    pub(crate) players: PlayerPair<String>,
    /// Registration order, used to keep leaderboard ties stable.
    pub(crate) registration_seq: u64,
    pub(crate) created_at: DateTime<Utc>,

    pub(crate) start_time: Option<DateTime<Utc>>,
    pub(crate) end_time: Option<DateTime<Utc>>,
    pub(crate) path_start_time: Option<DateTime<Utc>>,

    pub(crate) current_path: Option<PathKind>,
    /// Only meaningful while `current_path` is set.
    pub(crate) current_question_index: usize,
    pub(crate) current_player: PlayerSlot,

    pub(crate) total_penalty_seconds: u32,
    pub(crate) wrong_answers: Vector<WrongAnswer>,
    /// One-way: paths are added, never removed.
    pub(crate) locked_paths: SmallVec<[PathKind; 3]>,
    pub(crate) events: Vector<SessionEvent>,

    pub(crate) state_version: u64,
}

impl Session {
    /// Create a fresh session. Nothing started, no path, version 0.
    #[must_use]
    pub fn new(
        team_name: impl Into<String>,
        player1: impl Into<String>,
        player2: impl Into<String>,
        registration_seq: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            team_name: team_name.into(),
            players: PlayerPair::new(player1.into(), player2.into()),
            registration_seq,
            created_at,
            start_time: None,
            end_time: None,
            path_start_time: None,
            current_path: None,
            current_question_index: 0,
            current_player: PlayerSlot::One,
            total_penalty_seconds: 0,
            wrong_answers: Vector::new(),
            locked_paths: SmallVec::new(),
            events: Vector::new(),
            state_version: 0,
        }
    }

    #[must_use]
    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    /// Display name of a player.
    #[must_use]
    pub fn player_name(&self, slot: PlayerSlot) -> &str {
        &self.players[slot]
    }

    /// "P1 & P2", as shown on the leaderboard.
    #[must_use]
    pub fn players_label(&self) -> String {
        let names: Vec<&str> = self.players.iter().map(|(_, name)| name.as_str()).collect();
        names.join(" & ")
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    #[must_use]
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    #[must_use]
    pub fn path_start_time(&self) -> Option<DateTime<Utc>> {
        self.path_start_time
    }

    #[must_use]
    pub fn current_path(&self) -> Option<PathKind> {
        self.current_path
    }

    #[must_use]
    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerSlot {
        self.current_player
    }

    #[must_use]
    pub fn total_penalty_seconds(&self) -> u32 {
        self.total_penalty_seconds
    }

    #[must_use]
    pub fn wrong_answers(&self) -> &Vector<WrongAnswer> {
        &self.wrong_answers
    }

    #[must_use]
    pub fn events(&self) -> &Vector<SessionEvent> {
        &self.events
    }

    #[must_use]
    pub fn state_version(&self) -> u64 {
        self.state_version
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.end_time.is_some()
    }

    /// Started, not finished.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.is_started() && !self.is_complete()
    }

    /// Check if a path can no longer be selected.
    #[must_use]
    pub fn is_locked(&self, path: PathKind) -> bool {
        self.locked_paths.contains(&path)
    }

    #[must_use]
    pub fn hard_path_locked(&self) -> bool {
        self.is_locked(PathKind::Hard)
    }

    /// Locked paths in the order they were locked.
    #[must_use]
    pub fn locked_paths(&self) -> &[PathKind] {
        &self.locked_paths
    }

    /// Elapsed seconds from start to end (or `now` while running) plus
    /// penalties. Zero if never started. Frozen once the game ends.
    #[must_use]
    pub fn total_time_secs(&self, now: DateTime<Utc>) -> f64 {
        let Some(start) = self.start_time else {
            return 0.0;
        };
        let end = self.end_time.unwrap_or(now);
        seconds_between(start, end) + f64::from(self.total_penalty_seconds)
    }

    // === Mutation helpers for rules ===

    pub(crate) fn bump_version(&mut self) -> u64 {
        self.state_version += 1;
        self.state_version
    }

    pub(crate) fn record(&mut self, event: SessionEvent) {
        self.events.push_back(event);
    }

    pub(crate) fn lock_path(&mut self, path: PathKind) {
        if !self.is_locked(path) {
            self.locked_paths.push(path);
        }
    }
}
