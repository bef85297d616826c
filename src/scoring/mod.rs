//! Derivation engine: totals, winner flags, and what a win produces.
//!
//! - `totals`: pure derivation plus edge-triggered recompute
//! - `winner`: the announcement shown when a game is won
//! - `record`: the history entry written when a game is won

pub mod totals;
pub mod winner;
pub mod record;

pub use totals::{clear_derived, derive, recompute, refresh_totals, Derivation};
pub use winner::WinnerAnnouncement;
pub use record::CompletedGameRecord;
