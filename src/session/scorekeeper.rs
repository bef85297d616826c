//! The scorekeeper session: state owner and event dispatcher.
//!
//! A `Scorekeeper` owns one `GameState` and one store. Each operation runs
//! the rules, then reacts to what they emitted:
//!
//! 1. Replace the held state with the transition's state
//! 2. On `WinnerDetected`, append a `CompletedGameRecord` to the history
//! 3. If a persisted field changed, save the snapshot
//!
//! Everything runs synchronously; when an operation returns, totals, flags,
//! history and snapshot all reflect it. A failed save never rolls back the
//! mutation: the session keeps working in memory and says so in the result.

use std::fmt::Display;

use tracing::{debug, info, warn};

use crate::core::{CellRef, GameState, PlayerId, Result, ScoreConfig};
use crate::events::{Events, ScoreEvent};
use crate::persistence::{ClearHistoryRequest, KeyValueStore, Persistence};
use crate::rules::{Command, ScoreRules};
use crate::scoring::{CompletedGameRecord, WinnerAnnouncement};

use super::clock::{Clock, SystemClock};

/// What an accepted operation produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    /// Events in the order they happened.
    pub events: Events,

    /// The snapshot was written; the UI may flash its save indicator.
    /// Selection-only changes never save.
    pub saved: bool,
}

impl Dispatch {
    fn new() -> Self {
        Self {
            events: Events::new(),
            saved: false,
        }
    }

    /// The winner announcement, if the operation produced one.
    #[must_use]
    pub fn winner(&self) -> Option<&WinnerAnnouncement> {
        self.events.iter().find_map(ScoreEvent::winner)
    }

    /// Did the operation change the state?
    #[must_use]
    pub fn changed(&self) -> bool {
        self.events.contains(&ScoreEvent::StateChanged)
    }

    /// The history record appended by the operation, if any.
    #[must_use]
    pub fn recorded(&self) -> Option<&CompletedGameRecord> {
        self.events.iter().find_map(|e| match e {
            ScoreEvent::GameRecorded(record) => Some(record),
            _ => None,
        })
    }
}

/// A scorekeeping session.
pub struct Scorekeeper<S, C = SystemClock> {
    rules: ScoreRules,
    state: GameState,
    persistence: Persistence<S>,
    clock: C,
}

impl<S: KeyValueStore> Scorekeeper<S> {
    /// Open a session on `store`, resuming its saved game if there is one.
    pub fn open(store: S, config: ScoreConfig) -> Self {
        Self::with_clock(store, config, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> Scorekeeper<S, C> {
    /// Open a session with an explicit clock.
    pub fn with_clock(store: S, config: ScoreConfig, clock: C) -> Self {
        let persistence = Persistence::new(store, &config);
        let state = match persistence.load_snapshot() {
            Some(state) => {
                info!(
                    players = state.players.len(),
                    rounds = state.rounds.len(),
                    target_score = state.target_score,
                    "resumed saved game"
                );
                state
            }
            None => GameState::new(config.default_target),
        };

        Self {
            rules: ScoreRules::new(config),
            state,
            persistence,
            clock,
        }
    }

    // === State Store ===

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// A detached copy of the current state. O(1) for the round list.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &ScoreConfig {
        self.rules.config()
    }

    /// The persistence adapter, for direct slot access.
    #[must_use]
    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    /// Close the session and hand back the store.
    pub fn into_store(self) -> S {
        self.persistence.into_store()
    }

    /// Replace the state wholesale and save it.
    ///
    /// No winner detection runs: the new state's flags are taken as they
    /// are.
    pub fn replace_state(&mut self, state: GameState) -> Dispatch {
        let mut dispatch = Dispatch::new();
        if state != self.state {
            let previous = std::mem::replace(&mut self.state, state);
            dispatch.events.push(ScoreEvent::StateChanged);
            if !previous.same_persisted(&self.state) {
                self.save(&mut dispatch);
            }
        }
        dispatch
    }

    // === Mutation API ===

    /// Apply a command and react to its events.
    ///
    /// # Errors
    ///
    /// `InvalidInput` or `InvalidState` from the rules; the state is left
    /// unchanged. Persistence failures are not errors here; they show up as
    /// `SaveFailed` and `saved == false`.
    pub fn dispatch(&mut self, command: Command) -> Result<Dispatch> {
        let transition = match self.rules.apply(&self.state, &command) {
            Ok(transition) => transition,
            Err(e) => {
                debug!(command = command.name(), error = %e, "command rejected");
                return Err(e);
            }
        };
        debug!(
            command = command.name(),
            events = transition.events.len(),
            "command applied"
        );

        if let Command::ConfigurePlayers { count, .. } = &command {
            info!(players = *count, target_score = transition.state.target_score, "game started");
        }

        let previous = std::mem::replace(&mut self.state, transition.state);
        let mut dispatch = Dispatch::new();

        for event in transition.events {
            let announcement = event.winner().cloned();
            dispatch.events.push(event);
            if let Some(announcement) = announcement {
                info!(winners = ?announcement.names, total = announcement.total, "winner detected");
                self.record_game(&mut dispatch);
            }
        }

        if dispatch.changed() && !previous.same_persisted(&self.state) {
            self.save(&mut dispatch);
        }
        Ok(dispatch)
    }

    /// Seat a new table and start a game.
    pub fn configure_players<N: Into<String>>(
        &mut self,
        count: usize,
        names: impl IntoIterator<Item = N>,
    ) -> Result<Dispatch> {
        self.dispatch(Command::configure_players(count, names))
    }

    /// Set the target score and re-run winner detection. Invalid input keeps
    /// the previous target.
    pub fn set_target_score(&mut self, target: impl Display) -> Result<Dispatch> {
        self.dispatch(Command::SetTargetScore(target.to_string()))
    }

    /// Append an empty round.
    pub fn add_round(&mut self) -> Result<Dispatch> {
        self.dispatch(Command::AddRound)
    }

    /// Write a cell, clamping points into range.
    pub fn set_score(&mut self, round_index: usize, player_id: PlayerId, points: i64) -> Result<Dispatch> {
        self.dispatch(Command::set_score(round_index, player_id, points))
    }

    /// Zero the last round, or drop it if already empty.
    pub fn undo_last_entry(&mut self) -> Result<Dispatch> {
        self.dispatch(Command::UndoLastEntry)
    }

    /// Clear all scores, keeping the players.
    pub fn reset_scores(&mut self) -> Result<Dispatch> {
        self.dispatch(Command::ResetScores)
    }

    /// Change the target and re-run winner detection.
    pub fn change_target(&mut self, target: impl Display) -> Result<Dispatch> {
        self.dispatch(Command::ChangeTarget(target.to_string()))
    }

    /// Setup form: pick the table size for the next game.
    pub fn set_player_count(&mut self, count: usize) -> Result<Dispatch> {
        self.dispatch(Command::SetPlayerCount(count))
    }

    /// Setup form: remember a name field's raw text.
    pub fn set_player_name_slot(&mut self, slot: u8, text: impl Into<String>) -> Result<Dispatch> {
        self.dispatch(Command::SetPlayerNameSlot {
            slot,
            text: text.into(),
        })
    }

    /// Start editing a cell.
    pub fn select_cell(&mut self, round_index: usize, player_id: PlayerId) -> Result<Dispatch> {
        self.dispatch(Command::SelectCell(CellRef::new(round_index, player_id)))
    }

    /// Stop editing.
    pub fn clear_selection(&mut self) -> Result<Dispatch> {
        self.dispatch(Command::ClearSelection)
    }

    /// Write the selected cell and stop editing.
    pub fn apply_to_selected(&mut self, points: i64) -> Result<Dispatch> {
        self.dispatch(Command::ApplyToSelected(points))
    }

    /// Add points to the first player in the last round.
    pub fn quick_add(&mut self, points: i64) -> Result<Dispatch> {
        self.dispatch(Command::QuickAdd(points))
    }

    // === History ===

    /// Completed games, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<CompletedGameRecord> {
        self.persistence.load_history()
    }

    /// Ask to clear the history. Nothing is deleted yet.
    pub fn request_clear_history(&self) -> ClearHistoryRequest {
        self.persistence.request_clear_history()
    }

    /// Clear the history after the user confirmed.
    ///
    /// # Errors
    ///
    /// See `Persistence::commit_clear_history`.
    pub fn commit_clear_history(&mut self, request: ClearHistoryRequest) -> Result<()> {
        self.persistence.commit_clear_history(request)
    }

    // === Reactions ===

    fn record_game(&mut self, dispatch: &mut Dispatch) {
        let Some(record) = CompletedGameRecord::from_players(&self.state.players, self.clock.now()) else {
            return;
        };
        match self.persistence.append_history(record.clone()) {
            Ok(()) => dispatch.events.push(ScoreEvent::GameRecorded(record)),
            Err(e) => warn!(error = %e, "could not append game to history"),
        }
    }

    fn save(&mut self, dispatch: &mut Dispatch) {
        match self.persistence.save_snapshot(&self.state) {
            Ok(()) => {
                dispatch.events.push(ScoreEvent::Saved);
                dispatch.saved = true;
            }
            Err(e) => {
                warn!(error = %e, "snapshot not saved; continuing in memory");
                dispatch.events.push(ScoreEvent::SaveFailed(e.to_string()));
            }
        }
    }
}
