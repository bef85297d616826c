//! # allfours-score
//!
//! Score-state engine for an All Fours (Trinidad) scorekeeper.
//!
//! ## Design Principles
//!
//! 1. **No Globals**: A `Scorekeeper` session owns its state and its store.
//!    Construct as many as you like; they never share anything.
//!
//! 2. **Pure Mutations**: `ScoreRules::apply` maps a state and a `Command`
//!    to the next state plus events. Rendering, sound and storage react to
//!    those events outside the rules.
//!
//! 3. **Edge-Triggered Wins**: A winner is announced, and the game logged,
//!    only when the table goes from no winner to at least one.
//!
//! ## Modules
//!
//! - `core`: Players, rounds, game state, configuration, errors
//! - `scoring`: Totals, winner flags, announcements, history records
//! - `rules`: Commands and the rules engine (mutation API)
//! - `events`: Events handed to the presentation layer
//! - `persistence`: Key-value stores, snapshot slot, history log
//! - `session`: The `Scorekeeper` dispatcher
//!
//! ## Example
//!
//! ```
//! use allfours_score::{MemoryStore, PlayerId, ScoreConfig, Scorekeeper};
//!
//! let mut keeper = Scorekeeper::open(MemoryStore::new(), ScoreConfig::default());
//! keeper.configure_players(2, ["Ria", "Dev"])?;
//! keeper.set_score(0, PlayerId::new(1), 4)?;
//! keeper.add_round()?;
//! let dispatch = keeper.set_score(1, PlayerId::new(1), 3)?;
//!
//! assert_eq!(keeper.state().players[0].total, 7);
//! assert_eq!(dispatch.winner().map(|w| w.message()), Some("Ria wins with 7 points!".to_string()));
//! # Ok::<(), allfours_score::ScoreError>(())
//! ```

pub mod core;
pub mod scoring;
pub mod rules;
pub mod events;
pub mod persistence;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CellRef, GameState, Player, PlayerId, Players, Round,
    ScoreConfig, ScoreError, Result,
};

pub use crate::scoring::{CompletedGameRecord, Derivation, WinnerAnnouncement};

pub use crate::rules::{Command, ScoreRules, Transition};

pub use crate::events::{Events, ScoreEvent};

pub use crate::persistence::{
    ClearHistoryRequest, FileStore, KeyValueStore, MemoryStore, Persistence,
};

pub use crate::session::{Clock, Dispatch, FixedClock, Scorekeeper, SystemClock};
