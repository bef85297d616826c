//! Game state: the canonical record a session owns.
//!
//! ## GameState
//!
//! - Seated players with derived totals and winner flags
//! - Target score
//! - Rounds in play order
//! - Player count chosen on the setup form
//! - In-progress cell selection (never persisted)
//! - Raw setup-form name slots
//!
//! Rounds live in an `im::Vector`, so cloning a state for a snapshot or a
//! transition is O(1) regardless of how long the game has run.
//!
//! No business rules are enforced here; see `rules` for mutations.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::DEFAULT_TARGET;
use super::error::{Result, ScoreError};
use super::player::{Player, PlayerId, Players, MAX_PLAYERS};
use super::round::Round;

/// A single scoring cell: one player's entry in one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRef {
    /// Index into `GameState::rounds`.
    pub round_index: usize,

    /// The player whose entry this is.
    pub player_id: PlayerId,
}

impl CellRef {
    /// Create a new cell reference.
    #[must_use]
    pub const fn new(round_index: usize, player_id: PlayerId) -> Self {
        Self {
            round_index,
            player_id,
        }
    }
}

/// Setup-form slot key for a 1-based seat, e.g. `"player3"`.
#[must_use]
pub fn name_slot_key(slot: u8) -> String {
    format!("player{slot}")
}

/// The full game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Seated players, in seat order. Empty until a game starts.
    pub players: Players,

    /// Total that wins the game.
    pub target_score: u32,

    /// Rounds in play order.
    pub rounds: Vector<Round>,

    /// Table size picked on the setup form.
    pub current_player_count: usize,

    /// Cell being edited, if any.
    #[serde(skip)]
    pub selected_cell: Option<CellRef>,

    /// Raw setup-form text keyed by slot (`"player1"`..`"player4"`).
    pub player_names: BTreeMap<String, String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET)
    }
}

impl GameState {
    /// Create a state with no game in progress.
    ///
    /// ## Defaults
    ///
    /// - `players`: empty
    /// - `rounds`: empty
    /// - `current_player_count`: 4
    #[must_use]
    pub fn new(target_score: u32) -> Self {
        Self {
            players: Players::new(),
            target_score,
            rounds: Vector::new(),
            current_player_count: MAX_PLAYERS,
            selected_cell: None,
            player_names: BTreeMap::new(),
        }
    }

    /// Has a game been started?
    #[must_use]
    pub fn has_started(&self) -> bool {
        !self.players.is_empty()
    }

    /// Fail with `InvalidState` unless a game is in progress.
    pub fn require_started(&self) -> Result<()> {
        if self.has_started() {
            Ok(())
        } else {
            Err(ScoreError::invalid_state("no game in progress"))
        }
    }

    /// Iterate over the seated player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    /// Look up a seated player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a round by index.
    #[must_use]
    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    /// Index of the last round, if any.
    #[must_use]
    pub fn last_round_index(&self) -> Option<usize> {
        self.rounds.len().checked_sub(1)
    }

    /// A fresh round with a zero entry for every seated player.
    #[must_use]
    pub fn empty_round(&self) -> Round {
        Round::empty(self.player_ids())
    }

    /// Players currently flagged as winners, in seat order.
    pub fn winners(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_winner)
    }

    /// Does any player hold a winner flag?
    #[must_use]
    pub fn has_winner(&self) -> bool {
        self.players.iter().any(|p| p.is_winner)
    }

    /// Equal in every persisted field. The selection is ignored.
    #[must_use]
    pub fn same_persisted(&self, other: &Self) -> bool {
        self.players == other.players
            && self.target_score == other.target_score
            && self.rounds == other.rounds
            && self.current_player_count == other.current_player_count
            && self.player_names == other.player_names
    }

    /// Check that a cell names an existing round and a seated player.
    pub fn validate_cell(&self, cell: CellRef) -> Result<()> {
        if cell.round_index >= self.rounds.len() {
            return Err(ScoreError::invalid_input(format!(
                "round {} does not exist ({} rounds)",
                cell.round_index,
                self.rounds.len()
            )));
        }
        if self.player(cell.player_id).is_none() {
            return Err(ScoreError::invalid_input(format!(
                "{} is not seated",
                cell.player_id
            )));
        }
        Ok(())
    }

    /// Points in a cell; unknown cells read as 0.
    #[must_use]
    pub fn points(&self, cell: CellRef) -> u32 {
        self.round(cell.round_index)
            .map_or(0, |round| round.get(cell.player_id))
    }
}
