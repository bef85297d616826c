//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::cell::Cell;

use allfours_score::{
    FixedClock, KeyValueStore, MemoryStore, PlayerId, Result, ScoreConfig, ScoreError, Scorekeeper,
};
use time::macros::datetime;
use time::OffsetDateTime;

/// Install a test-writer subscriber once per binary. Set `RUST_LOG` to see
/// engine logs.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Instant every test session's clock is pinned to.
pub const NOW: OffsetDateTime = datetime!(2024-08-31 20:15 UTC);

/// A session on a fresh in-memory store with a pinned clock.
pub fn session() -> Scorekeeper<MemoryStore, FixedClock> {
    session_on(MemoryStore::new())
}

/// A session on the given store with a pinned clock.
pub fn session_on<S: KeyValueStore>(store: S) -> Scorekeeper<S, FixedClock> {
    init_logging();
    Scorekeeper::with_clock(store, ScoreConfig::default(), FixedClock(NOW))
}

/// A started session with the given players.
pub fn started(names: &[&str]) -> Scorekeeper<MemoryStore, FixedClock> {
    let mut keeper = session();
    keeper
        .configure_players(names.len(), names.iter().copied())
        .unwrap();
    keeper
}

pub fn p(id: u8) -> PlayerId {
    PlayerId::new(id)
}

/// Totals in seat order.
pub fn totals<S: KeyValueStore>(keeper: &Scorekeeper<S, FixedClock>) -> Vec<u32> {
    keeper.state().players.iter().map(|p| p.total).collect()
}

/// A store whose reads succeed (empty) and whose writes can be switched off,
/// e.g. to simulate a full quota.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    pub fail_writes: Cell<bool>,
}

impl FlakyStore {
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail_writes.set(true);
        store
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.get() {
            return Err(ScoreError::unavailable("quota exceeded"));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.fail_writes.get() {
            return Err(ScoreError::unavailable("quota exceeded"));
        }
        self.inner.remove(key)
    }
}
