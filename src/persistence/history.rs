//! History log encoding and the clear-history confirmation.
//!
//! The log is a JSON array of `CompletedGameRecord`s. Decoding skips
//! entries that no longer parse, so one bad record does not cost the rest of
//! the history on the next append.

use serde_json::Value;
use tracing::warn;

use crate::core::Result;
use crate::scoring::CompletedGameRecord;

/// Decode a stored history list.
///
/// # Errors
///
/// Returns `PersistenceCorrupt` if `raw` is not a JSON array.
pub fn decode(raw: &str) -> Result<Vec<CompletedGameRecord>> {
    let entries: Vec<Value> = serde_json::from_str(raw)?;
    let records = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed history entry");
                None
            }
        })
        .collect();
    Ok(records)
}

/// Serialize a history list.
///
/// # Errors
///
/// Returns `PersistenceCorrupt` if serialization fails.
pub fn encode(records: &[CompletedGameRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Proof that the user was asked before wiping the history log.
///
/// Only `Persistence::request_clear_history` creates one, and
/// `Persistence::commit_clear_history` consumes it, so the history cannot be
/// deleted without going through both steps.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "the history is only cleared when the request is committed"]
pub struct ClearHistoryRequest {
    pub(crate) key: String,
    pub(crate) entries: usize,
}

impl ClearHistoryRequest {
    /// How many records the commit would delete.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Text for the confirmation dialog.
    #[must_use]
    pub fn prompt(&self) -> &'static str {
        "Are you sure you want to clear all game history? This cannot be undone."
    }
}
