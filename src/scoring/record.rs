//! Completed-game records for the history log.
//!
//! A record always describes the first two seats. In three- and four-player
//! games the other seats' final scores are not logged, and `winner` is
//! chosen between seats one and two only.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::core::Player;

/// One finished game, as appended to the history log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedGameRecord {
    pub player1: String,
    pub player1_score: u32,
    pub player2: String,
    pub player2_score: u32,
    /// `player1` if it strictly outscored `player2`, else `player2`.
    pub winner: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl CompletedGameRecord {
    /// Build a record from two players' names and scores.
    #[must_use]
    pub fn new(
        player1: impl Into<String>,
        player1_score: u32,
        player2: impl Into<String>,
        player2_score: u32,
        timestamp: OffsetDateTime,
    ) -> Self {
        let player1 = player1.into();
        let player2 = player2.into();
        let winner = if player1_score > player2_score {
            player1.clone()
        } else {
            player2.clone()
        };

        Self {
            player1,
            player1_score,
            player2,
            player2_score,
            winner,
            timestamp,
        }
    }

    /// Record the first two seats of a table; `None` with fewer than two.
    #[must_use]
    pub fn from_players(players: &[Player], timestamp: OffsetDateTime) -> Option<Self> {
        match players {
            [p1, p2, ..] => Some(Self::new(
                p1.name.clone(),
                p1.total,
                p2.name.clone(),
                p2.total,
                timestamp,
            )),
            _ => None,
        }
    }
}
