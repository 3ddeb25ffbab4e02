//! Player identification and per-player data storage.
//!
//! ## PlayerSlot
//!
//! Every team has exactly two players. Turns alternate between them and
//! only the slot whose turn it is may answer.
//!
//! ## PlayerPair
//!
//! Fixed two-entry storage indexed by `PlayerSlot`, used for the players'
//! display names.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::error::SessionError;

/// One of the two seats in a team.
///
/// Numbered 1 and 2 on the wire, matching what players see in the browser.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayerSlot {
    #[default]
    One,
    Two,
}

impl PlayerSlot {
    /// Both slots in turn order.
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// The 1-based player number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// The other player of the team.
    ///
    /// ```
    /// use maze_quiz::core::PlayerSlot;
    ///
    /// assert_eq!(PlayerSlot::One.other(), PlayerSlot::Two);
    /// assert_eq!(PlayerSlot::Two.other(), PlayerSlot::One);
    /// ```
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl TryFrom<u8> for PlayerSlot {
    type Error = SessionError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(SessionError::InvalidInput(format!(
                "player must be 1 or 2, got {other}"
            ))),
        }
    }
}

impl From<PlayerSlot> for u8 {
    fn from(slot: PlayerSlot) -> Self {
        slot.number()
    }
}

impl std::fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Per-player data for the two members of a team.
///
/// ## Example
///
/// ```
/// use maze_quiz::core::{PlayerPair, PlayerSlot};
///
/// let names = PlayerPair::new("Ada".to_string(), "Brian".to_string());
/// assert_eq!(names[PlayerSlot::Two], "Brian");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; 2],
}

impl<T> PlayerPair<T> {
    /// Create a pair from the first and second player's values.
    pub fn new(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, slot: PlayerSlot) -> &T {
        &self.data[slot.index()]
    }

    /// Iterate over (PlayerSlot, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerSlot, &T)> {
        PlayerSlot::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<PlayerSlot> for PlayerPair<T> {
    type Output = T;

    fn index(&self, slot: PlayerSlot) -> &Self::Output {
        self.get(slot)
    }
}
