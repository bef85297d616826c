//! Event types produced for the presentation layer.

pub mod event;

pub use event::{winner_events, Events, ScoreEvent};
