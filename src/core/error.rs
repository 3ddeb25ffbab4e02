//! Error types for session operations and configuration loading.

use super::config::PathKind;
use super::player::PlayerSlot;

/// Failure of a single session operation.
///
/// Every variant is reported to the caller; none is fatal to the engine.
/// Operations validate before they mutate, so an `Err` always means the
/// session was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Wrong player! {expected} should answer")]
    WrongPlayer { expected: PlayerSlot },

    #[error("{0} path is locked for this session")]
    PathLocked(PathKind),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl SessionError {
    /// True for the `Forbidden` class: turn violations and locked paths.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::WrongPlayer { .. } | Self::PathLocked(_))
    }

    /// HTTP-style status code for the request layer.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidInput(_) => 400,
            Self::WrongPlayer { .. } | Self::PathLocked(_) => 403,
            Self::InvalidState(_) => 409,
        }
    }
}

/// Problems found while loading or validating a `GameConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse game config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No penalty policy configured for {0} path")]
    MissingPolicy(PathKind),

    #[error("{0} path has no questions")]
    EmptyPath(PathKind),

    #[error("Question {id} on {path} path must have exactly one correct option, found {found}")]
    CorrectOptionCount { path: PathKind, id: u32, found: usize },

    #[error("Question {id} on {path} path repeats option {label:?}")]
    DuplicateOption { path: PathKind, id: u32, label: String },
}
