//! Commands: the mutations a caller can request.
//!
//! Each variant corresponds to one user intent from the scoring screen or
//! the setup form. Commands are plain data so they can be logged, replayed
//! in tests, or queued by a UI layer.

use serde::{Deserialize, Serialize};

use crate::core::{CellRef, PlayerId};

/// A requested mutation.
///
/// ## Example
///
/// ```
/// use allfours_score::core::{CellRef, PlayerId};
/// use allfours_score::rules::Command;
///
/// let start = Command::configure_players(2, ["Ria", "Dev"]);
/// let score = Command::set_score(0, PlayerId::new(1), 4);
/// let target = Command::ChangeTarget("11".into());
/// # let _ = (start, score, target);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Seat a new table and start a game with one empty round.
    ConfigurePlayers { count: usize, names: Vec<String> },

    /// Set the target from the target picker. Invalid input keeps the old
    /// target; winner flags follow the new target.
    SetTargetScore(String),

    /// Append an empty round.
    AddRound,

    /// Write a cell. Points are clamped into the configured range.
    SetScore { cell: CellRef, points: i64 },

    /// Zero the last round, or drop it if it is already empty.
    UndoLastEntry,

    /// Back to a single empty round with the same players.
    ResetScores,

    /// Mid-game target prompt. Same effect as `SetTargetScore`.
    ChangeTarget(String),

    /// Setup form: choose the table size for the next game.
    SetPlayerCount(usize),

    /// Setup form: remember the raw text of a name field (`slot` is 1-based).
    SetPlayerNameSlot { slot: u8, text: String },

    /// Start editing a cell.
    SelectCell(CellRef),

    /// Stop editing without writing.
    ClearSelection,

    /// Write the selected cell, then clear the selection.
    ApplyToSelected(i64),

    /// Add points to the first player's entry in the last round.
    QuickAdd(i64),
}

impl Command {
    /// Build a `ConfigurePlayers` command.
    pub fn configure_players<S: Into<String>>(count: usize, names: impl IntoIterator<Item = S>) -> Self {
        Command::ConfigurePlayers {
            count,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a `SetScore` command.
    #[must_use]
    pub fn set_score(round_index: usize, player_id: PlayerId, points: i64) -> Self {
        Command::SetScore {
            cell: CellRef::new(round_index, player_id),
            points,
        }
    }

    /// Does this command need a game in progress?
    ///
    /// Everything except seating a table and editing the setup form does.
    #[must_use]
    pub fn requires_game(&self) -> bool {
        !matches!(
            self,
            Command::ConfigurePlayers { .. }
                | Command::SetPlayerCount(_)
                | Command::SetPlayerNameSlot { .. }
        )
    }

    /// Short name, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::ConfigurePlayers { .. } => "configure_players",
            Command::SetTargetScore(_) => "set_target_score",
            Command::AddRound => "add_round",
            Command::SetScore { .. } => "set_score",
            Command::UndoLastEntry => "undo_last_entry",
            Command::ResetScores => "reset_scores",
            Command::ChangeTarget(_) => "change_target",
            Command::SetPlayerCount(_) => "set_player_count",
            Command::SetPlayerNameSlot { .. } => "set_player_name_slot",
            Command::SelectCell(_) => "select_cell",
            Command::ClearSelection => "clear_selection",
            Command::ApplyToSelected(_) => "apply_to_selected",
            Command::QuickAdd(_) => "quick_add",
        }
    }
}
