//! Events emitted by mutations and by the session dispatcher.
//!
//! Mutations never render, play sounds, or touch storage. They return the
//! next state plus a list of events; the session reacts to the events it
//! owns (history, snapshot) and hands the whole list to the caller for
//! presentation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::scoring::{CompletedGameRecord, WinnerAnnouncement};

/// Something that happened while handling a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ScoreEvent {
    /// The state differs from before the command. Re-render.
    StateChanged,

    /// The game went from no winner to at least one winner.
    WinnerDetected(WinnerAnnouncement),

    /// A completed game was appended to the history log.
    GameRecorded(CompletedGameRecord),

    /// The snapshot was written. Flash the save indicator.
    Saved,

    /// Writing the snapshot failed. The in-memory state is still current.
    SaveFailed(String),
}

impl ScoreEvent {
    /// The winner announcement, if this is a winner event.
    #[must_use]
    pub fn winner(&self) -> Option<&WinnerAnnouncement> {
        match self {
            ScoreEvent::WinnerDetected(ann) => Some(ann),
            _ => None,
        }
    }

    /// Short name, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ScoreEvent::StateChanged => "state_changed",
            ScoreEvent::WinnerDetected(_) => "winner_detected",
            ScoreEvent::GameRecorded(_) => "game_recorded",
            ScoreEvent::Saved => "saved",
            ScoreEvent::SaveFailed(_) => "save_failed",
        }
    }
}

/// Events from one command. Rarely more than four.
pub type Events = SmallVec<[ScoreEvent; 4]>;

/// Count winner events in a list.
#[must_use]
pub fn winner_events(events: &[ScoreEvent]) -> usize {
    events.iter().filter(|e| e.winner().is_some()).count()
}
