//! The session registry.
//!
//! `SessionEngine` owns every live session, keyed by team name. The table
//! itself sits behind an `RwLock` that is only held long enough to look up,
//! insert or remove an entry. Each session has its own `Mutex`, held for the
//! whole read-modify-write of one operation, so:
//!
//! - operations on one team apply in a total order and never observe a
//!   half-applied transition
//! - operations on different teams run in parallel
//!
//! Nothing blocks on I/O while a lock is held.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::leaderboard::{self, LeaderboardEntry};
use crate::core::{Clock, ConfigError, GameConfig, PathKind, PlayerSlot, SessionError, SystemClock};
use crate::rules::{self, AnswerOutcome, PathSelection, StartOutcome};
use crate::session::{CurrentQuestion, PollView, Session, SessionSnapshot};

type SessionHandle = Arc<Mutex<Session>>;

/// Result of `create`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub team_name: String,
    /// The team was already registered; its session is unchanged.
    pub already_exists: bool,
}

/// All live game sessions plus the configuration they play against.
pub struct SessionEngine {
    config: GameConfig,
    clock: Arc<dyn Clock>,
    sessions: RwLock<FxHashMap<String, SessionHandle>>,
    next_registration: AtomicU64,
}

impl Default for SessionEngine {
    /// The Linux maze game on the system clock.
    fn default() -> Self {
        Self::build(GameConfig::linux_maze(), Arc::new(SystemClock))
    }
}

impl SessionEngine {
    /// Create an engine on the system clock.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an engine with an injected time source.
    pub fn with_clock(config: GameConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, clock))
    }

    fn build(config: GameConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            sessions: RwLock::new(FxHashMap::default()),
            next_registration: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of registered sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    #[must_use]
    pub fn contains(&self, team_name: &str) -> bool {
        self.table().contains_key(team_name)
    }

    // === Operations ===

    /// Register a team. Registering an existing team name is not an error;
    /// the existing session is left untouched.
    pub fn create(
        &self,
        team_name: &str,
        player1: &str,
        player2: &str,
    ) -> Result<Registration, SessionError> {
        for (field, value) in [
            ("team_name", team_name),
            ("player1", player1),
            ("player2", player2),
        ] {
            if value.trim().is_empty() {
                return Err(SessionError::InvalidInput(format!(
                    "Missing required field: {field}"
                )));
            }
        }

        let mut table = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        if table.contains_key(team_name) {
            debug!(team = %team_name, "session already exists");
            return Ok(Registration {
                team_name: team_name.to_string(),
                already_exists: true,
            });
        }

        let seq = self.next_registration.fetch_add(1, Ordering::Relaxed);
        let session = Session::new(team_name, player1, player2, seq, self.clock.now());
        table.insert(team_name.to_string(), Arc::new(Mutex::new(session)));
        info!(team = %team_name, player1, player2, "session created");

        Ok(Registration {
            team_name: team_name.to_string(),
            already_exists: false,
        })
    }

    /// Start the team's game clock. Idempotent.
    pub fn start(&self, team_name: &str) -> Result<StartOutcome, SessionError> {
        self.with_session(team_name, |session| {
            let outcome = rules::start(session, self.clock.now());
            if !outcome.already_started {
                info!(team = %team_name, version = session.state_version(), "game started");
            }
            outcome
        })
    }

    /// Put the team on a path. `path` is matched case-insensitively.
    pub fn select_path(&self, team_name: &str, path: &str) -> Result<PathSelection, SessionError> {
        let handle = self.handle(team_name)?;
        let path: PathKind = path.parse()?;
        let mut session = lock(&handle);

        let result = rules::select_path(&mut session, &self.config, path, self.clock.now());
        match &result {
            Ok(_) => info!(
                team = %team_name,
                %path,
                version = session.state_version(),
                "path selected"
            ),
            Err(err) => warn!(team = %team_name, %path, error = %err, "path selection rejected"),
        }
        result
    }

    /// Submit `answer` on behalf of `player`. Only the current player may
    /// answer.
    pub fn submit_answer(
        &self,
        team_name: &str,
        answer: &str,
        player: PlayerSlot,
    ) -> Result<AnswerOutcome, SessionError> {
        let handle = self.handle(team_name)?;
        let mut session = lock(&handle);

        let result =
            rules::submit_answer(&mut session, &self.config, answer, player, self.clock.now());
        match &result {
            Ok(AnswerOutcome::Completed { total_time, penalties }) => info!(
                team = %team_name,
                total_time,
                penalties,
                "game completed"
            ),
            Ok(AnswerOutcome::Incorrect(penalty)) => debug!(
                team = %team_name,
                %player,
                answer,
                policy = penalty.policy.tag(),
                penalty = penalty.penalty,
                version = session.state_version(),
                "wrong answer"
            ),
            Ok(AnswerOutcome::Correct { .. }) => debug!(
                team = %team_name,
                %player,
                version = session.state_version(),
                "correct answer"
            ),
            Err(err) => warn!(team = %team_name, %player, error = %err, "answer rejected"),
        }
        result
    }

    /// Full snapshot of one session.
    pub fn status(&self, team_name: &str) -> Result<SessionSnapshot, SessionError> {
        self.with_session(team_name, |session| {
            SessionSnapshot::capture(session, self.clock.now())
        })
    }

    /// Read-only change check for a polling client. Never mutates.
    pub fn poll(
        &self,
        team_name: &str,
        since_version: u64,
        as_player: PlayerSlot,
    ) -> Result<PollView, SessionError> {
        self.with_session(team_name, |session| {
            PollView::project(session, &self.config, since_version, as_player, self.clock.now())
        })
    }

    /// The full current question, correctness included.
    pub fn current_question(&self, team_name: &str) -> Result<CurrentQuestion, SessionError> {
        let handle = self.handle(team_name)?;
        let session = lock(&handle);
        rules::current_question(&session, &self.config)
    }

    /// Remove one session.
    pub fn delete(&self, team_name: &str) -> Result<(), SessionError> {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(team_name);
        match removed {
            Some(_) => {
                info!(team = %team_name, "session deleted");
                Ok(())
            }
            None => Err(SessionError::NotFound(team_name.to_string())),
        }
    }

    /// Remove every session. Returns how many were removed.
    pub fn clear_all(&self) -> usize {
        let mut table = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let count = table.len();
        table.clear();
        info!(count, "all sessions cleared");
        count
    }

    /// Snapshots of every session in registration order.
    #[must_use]
    pub fn sessions(&self) -> Vec<SessionSnapshot> {
        let now = self.clock.now();
        let mut snapshots: Vec<(u64, SessionSnapshot)> = self
            .handles()
            .iter()
            .map(|handle| {
                let session = lock(handle);
                (session.registration_seq, SessionSnapshot::capture(&session, now))
            })
            .collect();
        snapshots.sort_by_key(|(seq, _)| *seq);
        snapshots.into_iter().map(|(_, s)| s).collect()
    }

    /// Completed sessions ranked by total time.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let sessions: Vec<Session> = self.handles().iter().map(|h| lock(h).clone()).collect();
        leaderboard::rank(&sessions, self.clock.now())
    }

    // === Locking ===

    fn table(&self) -> std::sync::RwLockReadGuard<'_, FxHashMap<String, SessionHandle>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(&self, team_name: &str) -> Result<SessionHandle, SessionError> {
        self.table()
            .get(team_name)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(team_name.to_string()))
    }

    fn handles(&self) -> Vec<SessionHandle> {
        self.table().values().cloned().collect()
    }

    fn with_session<R>(
        &self,
        team_name: &str,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R, SessionError> {
        let handle = self.handle(team_name)?;
        let mut session = lock(&handle);
        Ok(f(&mut session))
    }
}

/// Transitions validate before writing, so a session whose lock was
/// poisoned by a panicking reader is still consistent.
fn lock(handle: &Mutex<Session>) -> MutexGuard<'_, Session> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;

    fn engine() -> SessionEngine {
        SessionEngine::with_clock(GameConfig::linux_maze(), Arc::new(ManualClock::default()))
            .unwrap()
    }

    #[test]
    fn test_create_is_idempotent() {
        let engine = engine();

        let first = engine.create("Alpha", "A", "B").unwrap();
        assert!(!first.already_exists);

        let second = engine.create("Alpha", "X", "Y").unwrap();
        assert!(second.already_exists);
        assert_eq!(engine.len(), 1);

        let status = engine.status("Alpha").unwrap();
        assert_eq!(status.player1, "A");
        assert_eq!(status.player2, "B");
    }

    #[test]
    fn test_create_rejects_empty_fields() {
        let engine = engine();
        for (team, p1, p2) in [("", "A", "B"), ("Alpha", "", "B"), ("Alpha", "A", "  ")] {
            assert!(matches!(
                engine.create(team, p1, p2),
                Err(SessionError::InvalidInput(_))
            ));
        }
        assert!(engine.is_empty());
    }

    #[test]
    fn test_unknown_team_is_not_found() {
        let engine = engine();
        let missing = SessionError::NotFound("Ghost".to_string());

        assert_eq!(engine.start("Ghost").unwrap_err(), missing);
        assert_eq!(engine.select_path("Ghost", "easy").unwrap_err(), missing);
        assert_eq!(engine.select_path("Ghost", "bogus").unwrap_err(), missing);
        assert_eq!(
            engine.submit_answer("Ghost", "ls", PlayerSlot::One).unwrap_err(),
            missing
        );
        assert_eq!(engine.status("Ghost").unwrap_err(), missing);
        assert_eq!(engine.poll("Ghost", 0, PlayerSlot::One).unwrap_err(), missing);
        assert_eq!(engine.current_question("Ghost").unwrap_err(), missing);
        assert_eq!(engine.delete("Ghost").unwrap_err(), missing);
    }

    #[test]
    fn test_invalid_path_name() {
        let engine = engine();
        engine.create("Alpha", "A", "B").unwrap();
        engine.start("Alpha").unwrap();

        assert!(matches!(
            engine.select_path("Alpha", "expert"),
            Err(SessionError::InvalidInput(_))
        ));
        assert_eq!(engine.status("Alpha").unwrap().state_version, 1);
        assert_eq!(engine.select_path("Alpha", "EASY").unwrap().path, PathKind::Easy);
    }

    #[test]
    fn test_delete_and_clear() {
        let engine = engine();
        engine.create("Alpha", "A", "B").unwrap();
        engine.create("Beta", "C", "D").unwrap();
        engine.create("Gamma", "E", "F").unwrap();

        engine.delete("Beta").unwrap();
        assert!(!engine.contains("Beta"));
        assert!(engine.delete("Beta").is_err());

        assert_eq!(engine.clear_all(), 2);
        assert!(engine.is_empty());
        assert_eq!(engine.clear_all(), 0);
    }

    #[test]
    fn test_sessions_in_registration_order() {
        let engine = engine();
        for team in ["Zulu", "Alpha", "Mike"] {
            engine.create(team, "A", "B").unwrap();
        }

        let names: Vec<_> = engine.sessions().into_iter().map(|s| s.team_name).collect();
        assert_eq!(names, vec!["Zulu", "Alpha", "Mike"]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig::new().with_path(crate::core::PathConfig::new(
            PathKind::Easy,
            15,
            crate::core::PenaltyPolicy::Retry,
        ));
        assert!(matches!(
            SessionEngine::new(config),
            Err(ConfigError::EmptyPath(PathKind::Easy))
        ));
    }
}
