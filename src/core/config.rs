//! Game configuration types.
//!
//! The game is configured at startup by providing:
//! - `PathConfig`: penalty magnitude and policy for one difficulty path
//! - `QuestionBank`: the ordered questions of every path
//! - `GameConfig`: combines both
//!
//! The state machine never branches on a path name. Wrong answers are
//! handled by looking up the path's `PenaltyPolicy` in this table.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::questions::{Question, QuestionBank};

/// Difficulty path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    Easy,
    Medium,
    Hard,
}

impl PathKind {
    /// All paths in difficulty order.
    pub const ALL: [PathKind; 3] = [PathKind::Easy, PathKind::Medium, PathKind::Hard];

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl std::fmt::Display for PathKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PathKind {
    type Err = super::error::SessionError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| super::error::SessionError::InvalidInput(format!("Invalid path: {s:?}")))
    }
}

/// What happens to a team's progress after a wrong answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyPolicy {
    /// Same question is served again; the turn does not pass.
    Retry,
    /// The path restarts from its first question with player 1.
    ResetToStart,
    /// The team is sent back to path selection and the path is locked
    /// for the rest of the session.
    EjectAndLock,
}

impl PenaltyPolicy {
    /// Tag reported to clients in the answer payload.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Retry => "retry",
            Self::ResetToStart => "reset_path",
            Self::EjectAndLock => "eject",
        }
    }
}

/// Penalty configuration for one path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Path this row applies to.
    pub path: PathKind,

    /// Seconds added to the team's total for every wrong answer.
    pub penalty_seconds: u32,

    /// Progress rule applied on a wrong answer.
    pub policy: PenaltyPolicy,

    /// Expected answering time, used by dashboards for time estimates.
    #[serde(default)]
    pub avg_seconds_per_question: u32,
}

impl PathConfig {
    /// Create a new path configuration.
    pub fn new(path: PathKind, penalty_seconds: u32, policy: PenaltyPolicy) -> Self {
        Self {
            path,
            penalty_seconds,
            policy,
            avg_seconds_per_question: 0,
        }
    }

    /// Set the expected seconds per question.
    #[must_use]
    pub fn with_avg_seconds(mut self, seconds: u32) -> Self {
        self.avg_seconds_per_question = seconds;
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Penalty table, one row per path.
    pub paths: Vec<PathConfig>,

    /// Ordered questions per path.
    pub questions: QuestionBank,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::linux_maze()
    }
}

impl GameConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            questions: QuestionBank::new(),
        }
    }

    /// The deployed Linux command maze: easy retries, medium resets,
    /// hard ejects and locks.
    #[must_use]
    pub fn linux_maze() -> Self {
        Self {
            paths: vec![
                PathConfig::new(PathKind::Easy, 15, PenaltyPolicy::Retry).with_avg_seconds(30),
                PathConfig::new(PathKind::Medium, 10, PenaltyPolicy::ResetToStart)
                    .with_avg_seconds(45),
                PathConfig::new(PathKind::Hard, 20, PenaltyPolicy::EjectAndLock)
                    .with_avg_seconds(90),
            ],
            questions: QuestionBank::linux_commands(),
        }
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Add or replace a path's penalty row.
    #[must_use]
    pub fn with_path(mut self, row: PathConfig) -> Self {
        self.paths.retain(|p| p.path != row.path);
        self.paths.push(row);
        self
    }

    /// Set the ordered questions of a path.
    #[must_use]
    pub fn with_questions(mut self, path: PathKind, questions: Vec<Question>) -> Self {
        self.questions.set_path(path, questions);
        self
    }

    /// Get a path's penalty row.
    #[must_use]
    pub fn path(&self, path: PathKind) -> Option<&PathConfig> {
        self.paths.iter().find(|p| p.path == path)
    }

    /// Paths that have both a penalty row and questions.
    pub fn playable_paths(&self) -> impl Iterator<Item = PathKind> + '_ {
        PathKind::ALL
            .into_iter()
            .filter(|&p| self.path(p).is_some() && !self.questions.path(p).is_empty())
    }

    /// Check that every path with questions has a policy row, every policy
    /// row has questions, and every question is well formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for row in &self.paths {
            if self.questions.path(row.path).is_empty() {
                return Err(ConfigError::EmptyPath(row.path));
            }
        }
        for path in PathKind::ALL {
            let questions = self.questions.path(path);
            if !questions.is_empty() && self.path(path).is_none() {
                return Err(ConfigError::MissingPolicy(path));
            }
            for question in questions {
                question.validate(path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_kind_parse() {
        assert_eq!("easy".parse::<PathKind>().unwrap(), PathKind::Easy);
        assert_eq!(" Medium ".parse::<PathKind>().unwrap(), PathKind::Medium);
        assert_eq!("HARD".parse::<PathKind>().unwrap(), PathKind::Hard);
        assert!("expert".parse::<PathKind>().is_err());
        assert!("".parse::<PathKind>().is_err());
    }

    #[test]
    fn test_default_penalty_table() {
        let config = GameConfig::default();

        let easy = config.path(PathKind::Easy).unwrap();
        assert_eq!(easy.penalty_seconds, 15);
        assert_eq!(easy.policy, PenaltyPolicy::Retry);

        let medium = config.path(PathKind::Medium).unwrap();
        assert_eq!(medium.penalty_seconds, 10);
        assert_eq!(medium.policy, PenaltyPolicy::ResetToStart);

        let hard = config.path(PathKind::Hard).unwrap();
        assert_eq!(hard.penalty_seconds, 20);
        assert_eq!(hard.policy, PenaltyPolicy::EjectAndLock);
        assert_eq!(hard.avg_seconds_per_question, 90);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::linux_maze();
        config.validate().unwrap();
        assert_eq!(config.playable_paths().count(), 3);
        assert_eq!(config.questions.path(PathKind::Easy).len(), 10);
        assert_eq!(config.questions.path(PathKind::Medium).len(), 6);
        assert_eq!(config.questions.path(PathKind::Hard).len(), 4);
    }

    #[test]
    fn test_with_path_replaces_row() {
        let config = GameConfig::linux_maze()
            .with_path(PathConfig::new(PathKind::Easy, 5, PenaltyPolicy::ResetToStart));

        assert_eq!(config.paths.len(), 3);
        let easy = config.path(PathKind::Easy).unwrap();
        assert_eq!(easy.penalty_seconds, 5);
        assert_eq!(easy.policy, PenaltyPolicy::ResetToStart);
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let config = GameConfig::linux_maze();
        let json = serde_json::to_string(&config).unwrap();
        let loaded = GameConfig::from_json(&json).unwrap();

        assert_eq!(loaded.paths, config.paths);
        assert_eq!(
            loaded.questions.path(PathKind::Medium),
            config.questions.path(PathKind::Medium)
        );
    }

    #[test]
    fn test_from_json_rejects_missing_policy() {
        let json = r#"{
            "paths": [],
            "questions": {
                "easy": [{"id": 1, "text": "Q?", "options": [{"label": "a", "correct": true}, {"label": "b", "correct": false}]}]
            }
        }"#;
        assert!(matches!(
            GameConfig::from_json(json),
            Err(ConfigError::MissingPolicy(PathKind::Easy))
        ));
    }

    #[test]
    fn test_from_json_rejects_empty_path() {
        let json = r#"{
            "paths": [{"path": "hard", "penalty_seconds": 20, "policy": "eject_and_lock"}],
            "questions": {}
        }"#;
        assert!(matches!(
            GameConfig::from_json(json),
            Err(ConfigError::EmptyPath(PathKind::Hard))
        ));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(GameConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_policy_tags() {
        assert_eq!(PenaltyPolicy::Retry.tag(), "retry");
        assert_eq!(PenaltyPolicy::ResetToStart.tag(), "reset_path");
        assert_eq!(PenaltyPolicy::EjectAndLock.tag(), "eject");
    }
}
