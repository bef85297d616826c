//! Persistence adapter.
//!
//! - `store`: key-value backends (`MemoryStore`, `FileStore`)
//! - `snapshot`: game state to and from the snapshot slot
//! - `history`: completed-game log and clear confirmation
//! - `adapter`: `Persistence`, tying the above to a pair of keys

pub mod store;
pub mod snapshot;
pub mod history;
mod adapter;

pub use adapter::Persistence;
pub use history::ClearHistoryRequest;
pub use store::{FileStore, KeyValueStore, MemoryStore};
