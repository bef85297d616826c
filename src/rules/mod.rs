//! Mutation API.
//!
//! Games change only through `ScoreRules::apply`, which maps a state and a
//! `Command` to a `Transition`.

mod engine;
pub mod command;

pub use command::Command;
pub use engine::{ScoreRules, Transition};
