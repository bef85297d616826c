//! Core engine types: players, rounds, state, configuration, errors.
//!
//! This module holds the data model. It knows nothing about how state
//! changes; see `rules` for that.

pub mod player;
pub mod round;
pub mod config;
pub mod error;
pub mod state;

pub use player::{is_valid_player_count, seat_players, Player, PlayerId, Players, MAX_PLAYERS, MIN_PLAYERS};
pub use round::{clamp_points, parse_points, Round, MAX_POINTS};
pub use config::{parse_target, ScoreConfig, DEFAULT_TARGET, GAME_KEY, HISTORY_KEY};
pub use error::{Result, ScoreError};
pub use state::{name_slot_key, CellRef, GameState};
