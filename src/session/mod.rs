//! Sessions: the dispatcher between callers, rules and storage.

pub mod clock;
mod scorekeeper;

pub use clock::{Clock, FixedClock, SystemClock};
pub use scorekeeper::{Dispatch, Scorekeeper};
