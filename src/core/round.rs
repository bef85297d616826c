//! One played hand: a score entry per player.
//!
//! Rounds are stored as maps keyed by `PlayerId` so the persisted layout is
//! `{"1": 5, "2": 3}`. A missing entry reads as 0.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Largest score a single cell accepts.
pub const MAX_POINTS: u32 = 100;

/// Clamp raw points into `[0, max]`.
#[must_use]
pub fn clamp_points(points: i64, max: u32) -> u32 {
    points.clamp(0, i64::from(max)) as u32
}

/// Lenient parse of a points field: the leading integer, or 0.
///
/// Mirrors how a numeric text box behaves: `"12abc"` is 12, `"abc"` is 0,
/// `"-4"` clamps to 0.
///
/// ```
/// use allfours_score::core::parse_points;
///
/// assert_eq!(parse_points(" 12abc", 100), 12);
/// assert_eq!(parse_points("abc", 100), 0);
/// assert_eq!(parse_points("250", 100), 100);
/// ```
#[must_use]
pub fn parse_points(raw: &str, max: u32) -> u32 {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    // Anything past i64 range is far above the cap anyway.
    let value = digits[..end].parse::<i64>().unwrap_or(if end > 0 { i64::MAX } else { 0 });
    clamp_points(sign * value, max)
}

/// A single round's entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Round(FxHashMap<PlayerId, u32>);

impl Round {
    /// Create a round with a zero entry for every listed player.
    pub fn empty(players: impl IntoIterator<Item = PlayerId>) -> Self {
        Self(players.into_iter().map(|id| (id, 0)).collect())
    }

    /// Build a round from explicit entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (PlayerId, u32)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Points for a player; absent entries count as 0.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> u32 {
        self.0.get(&player).copied().unwrap_or(0)
    }

    /// Write a player's entry.
    pub fn set(&mut self, player: PlayerId, points: u32) {
        self.0.insert(player, points);
    }

    /// Does any entry hold a non-zero score?
    #[must_use]
    pub fn has_scores(&self) -> bool {
        self.0.values().any(|&p| p > 0)
    }

    /// Zero every entry, keeping the keys.
    pub fn clear(&mut self) {
        for points in self.0.values_mut() {
            *points = 0;
        }
    }

    /// Add a zero entry for each listed player that has none.
    pub fn fill_missing(&mut self, players: impl IntoIterator<Item = PlayerId>) {
        for id in players {
            self.0.entry(id).or_insert(0);
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the round has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
