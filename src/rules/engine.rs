//! Rules engine: pure state transitions.
//!
//! `ScoreRules::apply` takes the current state and a command and returns the
//! next state plus the events the command produced. It never mutates its
//! input, so a rejected command leaves the caller's state untouched.
//!
//! ## Implementation Notes
//!
//! - Every accepted command re-derives totals and winner flags before
//!   returning, so `is_winner == total >= target` always holds
//! - A target change can announce a winner retroactively
//! - A winner announcement is only produced on the no-winner to
//!   winner edge

use crate::core::{
    clamp_points, is_valid_player_count, name_slot_key, parse_target, seat_players, CellRef, GameState,
    Result, ScoreConfig, ScoreError, MAX_PLAYERS,
};
use crate::events::{Events, ScoreEvent};
use crate::scoring::{clear_derived, recompute};

use super::command::Command;

/// Result of an accepted command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The state after the command.
    pub state: GameState,

    /// Events the command produced, in order.
    pub events: Events,
}

impl Transition {
    /// Did the command change anything?
    #[must_use]
    pub fn changed(&self) -> bool {
        self.events.contains(&ScoreEvent::StateChanged)
    }
}

/// The scorekeeping rules.
#[derive(Clone, Debug, Default)]
pub struct ScoreRules {
    config: ScoreConfig,
}

impl ScoreRules {
    /// Create rules for a configuration.
    #[must_use]
    pub fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Apply a command to a state.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the command needs a game and none is in progress,
    ///   or `ApplyToSelected` is requested with no selection
    /// - `InvalidInput` for a bad count, target, cell or name slot
    pub fn apply(&self, state: &GameState, command: &Command) -> Result<Transition> {
        if command.requires_game() {
            state.require_started()?;
        }

        let mut next = state.clone();
        let mut events = Events::new();

        match command {
            Command::ConfigurePlayers { count, names } => {
                if !is_valid_player_count(*count) {
                    return Err(ScoreError::invalid_input(format!(
                        "player count must be 2-4, got {count}"
                    )));
                }
                next.players = seat_players(*count, names.as_slice());
                next.current_player_count = *count;
                next.rounds.clear();
                let round = next.empty_round();
                next.rounds.push_back(round);
                next.selected_cell = None;
            }

            Command::SetTargetScore(raw) | Command::ChangeTarget(raw) => {
                next.target_score = parse_target(raw)?;
            }

            Command::AddRound => {
                let round = next.empty_round();
                next.rounds.push_back(round);
            }

            Command::SetScore { cell, points } => {
                self.write_cell(&mut next, *cell, *points)?;
            }

            Command::UndoLastEntry => undo_last_entry(&mut next),

            Command::ResetScores => {
                next.rounds.clear();
                let round = next.empty_round();
                next.rounds.push_back(round);
                next.selected_cell = None;
                clear_derived(&mut next);
            }

            Command::SetPlayerCount(count) => {
                if !is_valid_player_count(*count) {
                    return Err(ScoreError::invalid_input(format!(
                        "player count must be 2-4, got {count}"
                    )));
                }
                if next.has_started() && next.players.len() != *count {
                    return Err(ScoreError::invalid_state(
                        "a game is in progress; seat a new table to change the player count",
                    ));
                }
                next.current_player_count = *count;
            }

            Command::SetPlayerNameSlot { slot, text } => {
                if *slot == 0 || usize::from(*slot) > MAX_PLAYERS {
                    return Err(ScoreError::invalid_input(format!(
                        "name slot must be 1-4, got {slot}"
                    )));
                }
                next.player_names.insert(name_slot_key(*slot), text.clone());
            }

            Command::SelectCell(cell) => {
                next.validate_cell(*cell)?;
                next.selected_cell = Some(*cell);
            }

            Command::ClearSelection => {
                next.selected_cell = None;
            }

            Command::ApplyToSelected(points) => {
                let cell = next
                    .selected_cell
                    .ok_or_else(|| ScoreError::invalid_state("no cell selected"))?;
                self.write_cell(&mut next, cell, *points)?;
                next.selected_cell = None;
            }

            Command::QuickAdd(points) => {
                let Some(round_index) = next.last_round_index() else {
                    return Err(ScoreError::invalid_state("game has no rounds"));
                };
                let first = next.players[0].id;
                let cell = CellRef::new(round_index, first);
                let current = i64::from(next.points(cell));
                self.write_cell(&mut next, cell, current.saturating_add(*points))?;
            }
        }

        let winner = recompute(&mut next);

        if next != *state {
            events.push(ScoreEvent::StateChanged);
        }
        if let Some(announcement) = winner {
            events.push(ScoreEvent::WinnerDetected(announcement));
        }

        Ok(Transition { state: next, events })
    }

    fn write_cell(&self, state: &mut GameState, cell: CellRef, points: i64) -> Result<()> {
        state.validate_cell(cell)?;
        let clamped = clamp_points(points, self.config.max_points);
        if let Some(round) = state.rounds.get_mut(cell.round_index) {
            round.set(cell.player_id, clamped);
        }
        Ok(())
    }
}

/// Zero a scored last round; otherwise drop an empty trailing round, as
/// long as one round remains.
fn undo_last_entry(state: &mut GameState) {
    let Some(last) = state.rounds.back_mut() else {
        return;
    };
    if last.has_scores() {
        last.clear();
    } else if state.rounds.len() > 1 {
        state.rounds.pop_back();
        if let Some(cell) = state.selected_cell {
            if cell.round_index >= state.rounds.len() {
                state.selected_cell = None;
            }
        }
    }
}
