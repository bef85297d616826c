//! Player identification and per-player score data.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier for 1-4 players. Ids are 1-based because the
//! persisted layout keys round entries by `"1"`..`"4"`.
//!
//! ## Player
//!
//! A seated player with a display name and the derived `total`/`is_winner`
//! fields. Only the derivation engine writes the derived fields.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 4;

/// Player identifier, `1..=4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw 1-based id.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Iterate over the player IDs of a table with `player_count` seats.
    ///
    /// ```
    /// use allfours_score::core::PlayerId;
    ///
    /// let ids: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(ids, vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(3)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (1..=player_count as u8).map(PlayerId)
    }

    /// Name used when the setup form leaves this seat blank.
    #[must_use]
    pub fn default_name(self) -> String {
        format!("Player {}", self.0)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Check that a table size is one the game supports.
#[must_use]
pub fn is_valid_player_count(count: usize) -> bool {
    (MIN_PLAYERS..=MAX_PLAYERS).contains(&count)
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Stable seat id for the lifetime of the game.
    pub id: PlayerId,

    /// Display name, never empty.
    pub name: String,

    /// Sum of this player's entries across all rounds.
    pub total: u32,

    /// `total >= target score`.
    pub is_winner: bool,
}

impl Player {
    /// Create a player with zeroed derived fields.
    ///
    /// A blank (or whitespace-only) name falls back to `"Player {id}"`.
    pub fn new(id: PlayerId, name: impl AsRef<str>) -> Self {
        let trimmed = name.as_ref().trim();
        let name = if trimmed.is_empty() {
            id.default_name()
        } else {
            trimmed.to_string()
        };

        Self {
            id,
            name,
            total: 0,
            is_winner: false,
        }
    }

    /// Zero the derived fields.
    pub fn reset(&mut self) {
        self.total = 0;
        self.is_winner = false;
    }
}

/// The seated players, in seat order. At most four, so no heap allocation.
pub type Players = SmallVec<[Player; MAX_PLAYERS]>;

/// Build a fresh table of `count` players from setup-form names.
///
/// Missing names are treated as blank.
pub fn seat_players<S: AsRef<str>>(count: usize, names: &[S]) -> Players {
    PlayerId::all(count)
        .map(|id| {
            let name = names
                .get(usize::from(id.raw()) - 1)
                .map(AsRef::as_ref)
                .unwrap_or("");
            Player::new(id, name)
        })
        .collect()
}
