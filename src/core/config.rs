//! Scorekeeper configuration.
//!
//! `ScoreConfig` carries the constants a session needs: the starting target,
//! the per-cell points cap, and the storage keys for the snapshot and the
//! history log.

use serde::{Deserialize, Serialize};

use super::error::{Result, ScoreError};
use super::round::MAX_POINTS;

/// Target score of a fresh game.
pub const DEFAULT_TARGET: u32 = 7;

/// Storage key of the game snapshot.
pub const GAME_KEY: &str = "allFoursGame";

/// Storage key of the completed-game history.
pub const HISTORY_KEY: &str = "allFoursHistory";

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Target score used until the player picks another one.
    pub default_target: u32,

    /// Largest points value a single round entry accepts.
    pub max_points: u32,

    /// Key of the game snapshot slot.
    pub game_key: String,

    /// Key of the history log slot.
    pub history_key: String,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            default_target: DEFAULT_TARGET,
            max_points: MAX_POINTS,
            game_key: GAME_KEY.to_string(),
            history_key: HISTORY_KEY.to_string(),
        }
    }
}

impl ScoreConfig {
    /// Use a different starting target.
    ///
    /// Zero is ignored; a target must be positive.
    #[must_use]
    pub fn with_default_target(mut self, target: u32) -> Self {
        if target > 0 {
            self.default_target = target;
        }
        self
    }

    /// Use a different points cap.
    #[must_use]
    pub fn with_max_points(mut self, max: u32) -> Self {
        self.max_points = max;
        self
    }

    /// Store snapshot and history under a key prefix, so several sessions
    /// can share one backend.
    #[must_use]
    pub fn with_key_prefix(mut self, prefix: &str) -> Self {
        self.game_key = format!("{prefix}{GAME_KEY}");
        self.history_key = format!("{prefix}{HISTORY_KEY}");
        self
    }
}

/// A target score request, as typed by the user.
///
/// Accepted: anything that parses as a positive integer after trimming.
/// Everything else is `InvalidInput`, and the caller keeps its old target.
///
/// ```
/// use allfours_score::core::parse_target;
///
/// assert_eq!(parse_target(" 11 ").unwrap(), 11);
/// assert!(parse_target("0").is_err());
/// assert!(parse_target("seven").is_err());
/// ```
pub fn parse_target(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if n > 0 => u32::try_from(n)
            .map_err(|_| ScoreError::invalid_input(format!("target score {n} is too large"))),
        Ok(n) => Err(ScoreError::invalid_input(format!(
            "target score must be positive, got {n}"
        ))),
        Err(_) => Err(ScoreError::invalid_input(format!(
            "target score {trimmed:?} is not a number"
        ))),
    }
}
