//! Session engine: the registry of live sessions and the leaderboard.

pub mod leaderboard;
pub mod registry;

pub use leaderboard::LeaderboardEntry;
pub use registry::{Registration, SessionEngine};
