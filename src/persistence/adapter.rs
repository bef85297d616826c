//! Persistence adapter: snapshot slot and history log over a store.
//!
//! The adapter never holds a live reference to session state. It reads a
//! borrowed snapshot when saving and hands back a freshly decoded state on
//! load.

use tracing::{debug, info, warn};

use crate::core::{GameState, Result, ScoreConfig, ScoreError};
use crate::scoring::CompletedGameRecord;

use super::history::{self, ClearHistoryRequest};
use super::snapshot;
use super::store::KeyValueStore;

/// Snapshot and history access for one key pair.
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
    game_key: String,
    history_key: String,
    default_target: u32,
    max_points: u32,
}

impl<S: KeyValueStore> Persistence<S> {
    /// Wrap a store, using the keys and default target from `config`.
    pub fn new(store: S, config: &ScoreConfig) -> Self {
        Self {
            store,
            game_key: config.game_key.clone(),
            history_key: config.history_key.clone(),
            default_target: config.default_target,
            max_points: config.max_points,
        }
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the underlying store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Unwrap the store.
    pub fn into_store(self) -> S {
        self.store
    }

    // === Snapshot ===

    /// Overwrite the snapshot slot with `state`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceUnavailable` if the store rejects the write.
    pub fn save_snapshot(&mut self, state: &GameState) -> Result<()> {
        let encoded = snapshot::encode(state)?;
        self.store.set(&self.game_key, &encoded)?;
        debug!(key = %self.game_key, bytes = encoded.len(), "snapshot saved");
        Ok(())
    }

    /// Load the snapshot, if there is a readable one.
    ///
    /// Never fails: an unreadable store or an unparsable payload is logged
    /// and reported as `None`. Missing or malformed fields fall back to the
    /// defaults one by one, and round cells are clamped to the points cap.
    pub fn load_snapshot(&self) -> Option<GameState> {
        let raw = match self.store.get(&self.game_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %self.game_key, error = %e, "snapshot slot unreadable");
                return None;
            }
        };

        match snapshot::decode(&raw, GameState::new(self.default_target), self.max_points) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(key = %self.game_key, error = %e, "discarding corrupt snapshot");
                None
            }
        }
    }

    /// Delete the snapshot slot.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceUnavailable` if the store rejects the delete.
    pub fn clear_snapshot(&mut self) -> Result<()> {
        self.store.remove(&self.game_key)
    }

    // === History ===

    /// All readable history records, oldest first.
    ///
    /// Missing, unreadable or corrupt history reads as empty.
    pub fn load_history(&self) -> Vec<CompletedGameRecord> {
        match self.store.get(&self.history_key) {
            Ok(Some(raw)) => history::decode(&raw).unwrap_or_else(|e| {
                warn!(key = %self.history_key, error = %e, "discarding corrupt history");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %self.history_key, error = %e, "history slot unreadable");
                Vec::new()
            }
        }
    }

    /// Append one record to the history log.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceUnavailable` if the store rejects the write.
    pub fn append_history(&mut self, record: CompletedGameRecord) -> Result<()> {
        let mut records = self.load_history();
        info!(
            winner = %record.winner,
            player1_score = record.player1_score,
            player2_score = record.player2_score,
            "recording completed game"
        );
        records.push(record);
        let encoded = history::encode(&records)?;
        self.store.set(&self.history_key, &encoded)
    }

    /// First step of clearing the history: ask for confirmation.
    ///
    /// Nothing is deleted until the returned request is passed to
    /// `commit_clear_history`. Dropping it cancels.
    pub fn request_clear_history(&self) -> ClearHistoryRequest {
        ClearHistoryRequest {
            key: self.history_key.clone(),
            entries: self.load_history().len(),
        }
    }

    /// Second step of clearing the history: delete the slot.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the request was issued for another history key
    /// - `PersistenceUnavailable` if the store rejects the delete
    pub fn commit_clear_history(&mut self, request: ClearHistoryRequest) -> Result<()> {
        if request.key != self.history_key {
            return Err(ScoreError::invalid_state(format!(
                "clear request was issued for {}, not {}",
                request.key, self.history_key
            )));
        }
        self.store.remove(&self.history_key)?;
        info!(key = %self.history_key, entries = request.entries, "history cleared");
        Ok(())
    }
}
