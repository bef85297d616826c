//! Persistence integration tests.
//!
//! These tests verify that sessions survive a reload through both store
//! backends, that damaged slots fall back to defaults, and that storage
//! failures never block play.

mod common;

use allfours_score::{
    FileStore, GameState, KeyValueStore, MemoryStore, ScoreConfig, ScoreEvent, Scorekeeper,
};
use common::{p, session_on, FlakyStore, NOW};

// =============================================================================
// Reload
// =============================================================================

/// Test that a reopened session sees exactly the saved state.
#[test]
fn test_session_roundtrip() {
    let mut keeper = session_on(MemoryStore::new());
    keeper.set_player_count(3).unwrap();
    keeper.set_player_name_slot(1, "Ria").unwrap();
    keeper.set_player_name_slot(2, "").unwrap();
    keeper.configure_players(3, ["Ria", "", "Sam"]).unwrap();
    keeper.set_target_score(11).unwrap();
    keeper.set_score(0, p(1), 4).unwrap();
    keeper.add_round().unwrap();
    keeper.set_score(1, p(3), 6).unwrap();
    keeper.add_round().unwrap();
    let before = keeper.snapshot();

    let reopened = session_on(keeper.into_store());
    assert_eq!(reopened.state(), &before);
    assert_eq!(reopened.state().rounds.len(), 3);
    assert_eq!(reopened.state().players[1].name, "Player 2");
    assert_eq!(reopened.state().player_names.get("player2").map(String::as_str), Some(""));
}

/// Test that the in-progress selection is not persisted.
#[test]
fn test_selection_not_persisted() {
    let mut keeper = common::started(&["A", "B"]);
    keeper.select_cell(0, p(2)).unwrap();

    let reopened = session_on(keeper.into_store());
    assert_eq!(reopened.state().selected_cell, None);
}

/// Test that a game won before a reload is not announced again after it.
#[test]
fn test_won_game_stays_announced_across_reload() {
    let mut keeper = common::started(&["A", "B"]);
    assert!(keeper.set_score(0, p(1), 7).unwrap().winner().is_some());

    let mut reopened = session_on(keeper.into_store());
    assert!(reopened.state().players[0].is_winner);

    let dispatch = reopened.set_score(0, p(2), 3).unwrap();
    assert!(dispatch.winner().is_none());
    assert_eq!(reopened.history().len(), 1);
}

/// Test that the file backend resumes a session from disk.
#[test]
fn test_file_store_resume() {
    let dir = tempfile::tempdir().unwrap();

    let mut keeper = session_on(FileStore::open(dir.path()).unwrap());
    keeper.configure_players(2, ["Ria", "Dev"]).unwrap();
    keeper.set_score(0, p(2), 7).unwrap();
    let before = keeper.snapshot();
    drop(keeper);

    let reopened = session_on(FileStore::open(dir.path()).unwrap());
    assert_eq!(reopened.state(), &before);
    assert_eq!(reopened.history().len(), 1);
    assert_eq!(reopened.history()[0].winner, "Dev");
    assert_eq!(reopened.history()[0].timestamp, NOW);
}

/// Test that two sessions with different key prefixes do not collide.
#[test]
fn test_key_prefixes_isolate_sessions() {
    let mut store = MemoryStore::new();

    let mut first = Scorekeeper::open(&mut store, ScoreConfig::default());
    first.configure_players(2, ["A", "B"]).unwrap();
    drop(first);

    let second = Scorekeeper::open(&mut store, ScoreConfig::default().with_key_prefix("table2:"));
    assert!(!second.state().has_started());
    drop(second);

    let first_again = Scorekeeper::open(&mut store, ScoreConfig::default());
    assert!(first_again.state().has_started());
}

// =============================================================================
// Damaged Slots
// =============================================================================

/// Test that an unparsable snapshot yields a fresh default state.
#[test]
fn test_corrupt_snapshot_gives_defaults() {
    let mut store = MemoryStore::new();
    store.set("allFoursGame", "{\"players\": [").unwrap();

    let keeper = Scorekeeper::open(store, ScoreConfig::default());
    assert_eq!(keeper.state(), &GameState::default());
}

/// Test that bad fields fall back one by one.
#[test]
fn test_partial_snapshot_keeps_good_fields() {
    let mut store = MemoryStore::new();
    store
        .set(
            "allFoursGame",
            r#"{"targetScore": 11, "rounds": "nope", "currentPlayerCount": 9}"#,
        )
        .unwrap();

    let keeper = session_on(store);
    let state = keeper.state();
    assert_eq!(state.target_score, 11);
    assert_eq!(state.current_player_count, 4);
    assert!(state.rounds.is_empty());
    assert!(!state.has_started());
}

/// Test that a loaded game is repaired: blank names, missing cells and
/// stale totals.
#[test]
fn test_loaded_game_is_normalized() {
    let mut store = MemoryStore::new();
    store
        .set(
            "allFoursGame",
            r#"{
                "players": [
                    {"id": 1, "name": "A", "total": 99, "isWinner": false},
                    {"id": 2, "name": "  ", "total": 0, "isWinner": false}
                ],
                "targetScore": 7,
                "rounds": [{"1": 4}],
                "currentPlayerCount": 4
            }"#,
        )
        .unwrap();

    let keeper = session_on(store);
    let state = keeper.state();
    assert_eq!(state.players[0].total, 4);
    assert_eq!(state.players[1].name, "Player 2");
    assert_eq!(state.current_player_count, 2);
    assert_eq!(state.rounds[0].len(), 2);
    assert_eq!(state.rounds[0].get(p(2)), 0);
}

/// Test that a negative cell written by older versions costs only that
/// cell, not the rest of the game.
#[test]
fn test_negative_legacy_cell_is_clamped() {
    let mut store = MemoryStore::new();
    store
        .set(
            "allFoursGame",
            r#"{
                "players": [
                    {"id": 1, "name": "A", "total": 3, "isWinner": false},
                    {"id": 2, "name": "B", "total": 6, "isWinner": false}
                ],
                "targetScore": 7,
                "rounds": [{"1": 5, "2": 3}, {"1": -2, "2": 3}],
                "currentPlayerCount": 2
            }"#,
        )
        .unwrap();

    let keeper = session_on(store);
    let state = keeper.state();
    assert_eq!(state.rounds.len(), 2);
    assert_eq!(state.rounds[0].get(p(1)), 5);
    assert_eq!(state.rounds[1].get(p(1)), 0);
    assert_eq!(common::totals(&keeper), vec![5, 6]);
}

/// Test that loaded cells respect a configured points cap.
#[test]
fn test_loaded_cells_use_configured_cap() {
    let mut store = MemoryStore::new();
    store
        .set(
            "allFoursGame",
            r#"{
                "players": [
                    {"id": 1, "name": "A", "total": 0, "isWinner": false},
                    {"id": 2, "name": "B", "total": 0, "isWinner": false}
                ],
                "targetScore": 200,
                "rounds": [{"1": 80, "2": 20}]
            }"#,
        )
        .unwrap();

    let keeper = Scorekeeper::open(store, ScoreConfig::default().with_max_points(50));
    assert_eq!(keeper.state().rounds[0].get(p(1)), 50);
    assert_eq!(keeper.state().rounds[0].get(p(2)), 20);
}

/// Test that a corrupt history reads as empty and can be appended to.
#[test]
fn test_corrupt_history_is_replaced() {
    let mut store = MemoryStore::new();
    store.set("allFoursHistory", "[[[").unwrap();

    let mut keeper = session_on(store);
    assert!(keeper.history().is_empty());

    keeper.configure_players(2, ["A", "B"]).unwrap();
    keeper.set_score(0, p(1), 7).unwrap();
    assert_eq!(keeper.history().len(), 1);
}

// =============================================================================
// Storage Failures
// =============================================================================

/// Test that a failing store keeps the mutation in memory.
#[test]
fn test_failed_save_keeps_mutation() {
    let mut keeper = session_on(FlakyStore::failing());

    let dispatch = keeper.configure_players(2, ["A", "B"]).unwrap();
    assert!(!dispatch.saved);
    assert!(dispatch.changed());
    assert!(dispatch
        .events
        .iter()
        .any(|e| matches!(e, ScoreEvent::SaveFailed(_))));
    assert!(keeper.state().has_started());

    // Winner detection still runs, only the history append is lost.
    let won = keeper.set_score(0, p(1), 7).unwrap();
    assert!(won.winner().is_some());
    assert!(won.recorded().is_none());
    assert!(keeper.history().is_empty());

    // Once storage recovers, the next save carries everything.
    keeper.persistence().store().fail_writes.set(false);
    let dispatch = keeper.set_score(0, p(2), 2).unwrap();
    assert!(dispatch.saved);
    assert!(keeper.persistence().store().inner().contains("allFoursGame"));
}

// =============================================================================
// History Clearing
// =============================================================================

/// Test the two-step history clear through a session.
#[test]
fn test_clear_history_two_steps() {
    let mut keeper = common::started(&["A", "B"]);
    keeper.set_score(0, p(1), 7).unwrap();
    keeper.reset_scores().unwrap();
    keeper.set_score(0, p(2), 8).unwrap();
    assert_eq!(keeper.history().len(), 2);

    let request = keeper.request_clear_history();
    assert_eq!(request.entries(), 2);
    assert!(request.prompt().contains("cannot be undone"));
    assert_eq!(keeper.history().len(), 2);

    keeper.commit_clear_history(request).unwrap();
    assert!(keeper.history().is_empty());
    // The game itself is untouched.
    assert_eq!(keeper.state().round(0).unwrap().get(p(2)), 8);
}

/// Test that history written in the legacy layout is readable.
#[test]
fn test_legacy_history_entries() {
    let mut store = MemoryStore::new();
    store
        .set(
            "allFoursHistory",
            r#"[{
                "player1": "Ria", "player1_score": 7,
                "player2": "Dev", "player2_score": 5,
                "winner": "Ria",
                "timestamp": "2024-03-01T18:30:00.000Z",
                "date": "3/1/2024", "time": "6:30:00 PM"
            }]"#,
        )
        .unwrap();

    let keeper = session_on(store);
    let history = keeper.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].player1, "Ria");
    assert_eq!(history[0].player2_score, 5);
}
