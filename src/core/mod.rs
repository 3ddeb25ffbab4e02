//! Core types: players, clock, configuration, errors.
//!
//! These are shared by the session state machine and the engine registry.
//! The penalty table in `config` is the only place path behaviour is defined.

pub mod clock;
pub mod config;
pub mod error;
pub mod player;

pub use clock::{seconds_between, Clock, ManualClock, SystemClock};
pub use config::{GameConfig, PathConfig, PathKind, PenaltyPolicy};
pub use error::{ConfigError, SessionError};
pub use player::{PlayerPair, PlayerSlot};
