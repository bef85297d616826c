//! Snapshot encoding.
//!
//! The snapshot is the `GameState` serialized as a camelCase JSON object:
//! `players`, `targetScore`, `rounds`, `currentPlayerCount`, `playerNames`.
//! The in-progress selection is not part of it.
//!
//! Decoding is tolerant per field: a field that is missing, `null`, or of
//! the wrong shape keeps its default and is logged; only a payload that is
//! not a JSON object at all is rejected as corrupt. Rounds are read cell by
//! cell, so one bad entry never costs the rest of the game.

use std::collections::BTreeMap;

use im::Vector;
use rustc_hash::FxHashSet;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::core::{
    clamp_points, is_valid_player_count, GameState, PlayerId, Players, Result, Round, ScoreError,
    MAX_PLAYERS,
};
use crate::scoring::refresh_totals;

/// Serialize a state for the snapshot slot.
///
/// # Errors
///
/// Returns `PersistenceCorrupt` if serialization fails, which only happens
/// for states no engine operation can produce.
pub fn encode(state: &GameState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Decode a snapshot on top of `defaults`, clamping cells to `max_points`.
///
/// # Errors
///
/// Returns `PersistenceCorrupt` if `raw` is not a JSON object.
pub fn decode(raw: &str, defaults: GameState, max_points: u32) -> Result<GameState> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(mut fields) = value else {
        return Err(ScoreError::corrupt("snapshot is not a JSON object"));
    };

    let mut state = defaults;

    if let Some(players) = take::<Players>(&mut fields, "players") {
        match check_players(&players) {
            Ok(()) => state.players = players,
            Err(reason) => warn!(field = "players", %reason, "ignoring snapshot field"),
        }
    }
    if let Some(target) = take::<u32>(&mut fields, "targetScore") {
        if target > 0 {
            state.target_score = target;
        } else {
            warn!(field = "targetScore", target_score = target, "ignoring non-positive target");
        }
    }
    match fields.remove("rounds") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => state.rounds = decode_rounds(items, max_points),
        Some(other) => warn!(field = "rounds", value = %other, "ignoring malformed snapshot field"),
    }
    if let Some(count) = take::<usize>(&mut fields, "currentPlayerCount") {
        if is_valid_player_count(count) {
            state.current_player_count = count;
        } else {
            warn!(field = "currentPlayerCount", count, "ignoring out-of-range player count");
        }
    }
    if let Some(names) = take::<BTreeMap<String, String>>(&mut fields, "playerNames") {
        state.player_names = names;
    }

    normalize(&mut state);
    Ok(state)
}

/// Pull one field out of the object, logging and dropping it if it does not
/// have the expected shape.
fn take<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    match fields.remove(key)? {
        Value::Null => None,
        value => match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(field = key, error = %e, "ignoring malformed snapshot field");
                None
            }
        },
    }
}

/// Read rounds cell by cell. Out-of-range points are clamped; entries
/// that are not numbers or not keyed by a seat id are dropped.
fn decode_rounds(items: Vec<Value>, max_points: u32) -> Vector<Round> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(cells) => Some(decode_round(index, cells, max_points)),
            other => {
                warn!(round = index, value = %other, "dropping malformed round");
                None
            }
        })
        .collect()
}

fn decode_round(index: usize, cells: Map<String, Value>, max_points: u32) -> Round {
    let mut round = Round::default();
    for (key, value) in cells {
        let id = match key.parse::<u8>() {
            Ok(id) if (1..=MAX_PLAYERS as u8).contains(&id) => PlayerId::new(id),
            _ => {
                warn!(round = index, key = %key, "dropping cell with unknown player id");
                continue;
            }
        };
        match cell_points(&value) {
            Some(points) => round.set(id, clamp_points(points, max_points)),
            None => warn!(round = index, player = id.raw(), value = %value, "dropping unreadable cell"),
        }
    }
    round
}

fn cell_points(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    number
        .as_i64()
        .or_else(|| number.as_f64().map(|f| f as i64))
}

fn check_players(players: &Players) -> std::result::Result<(), String> {
    if players.len() > MAX_PLAYERS {
        return Err(format!("{} players, at most {MAX_PLAYERS} supported", players.len()));
    }
    if players.len() == 1 {
        return Err("a game needs at least two players".to_string());
    }
    let mut seen = FxHashSet::default();
    for player in players {
        if !(1..=MAX_PLAYERS as u8).contains(&player.id.raw()) {
            return Err(format!("player id {} out of range", player.id.raw()));
        }
        if !seen.insert(player.id) {
            return Err(format!("duplicate player id {}", player.id.raw()));
        }
    }
    Ok(())
}

/// Restore the started-game invariants on a decoded state.
///
/// Winner flags are kept as stored: they remember whether this game has
/// already been announced.
fn normalize(state: &mut GameState) {
    if !state.has_started() {
        return;
    }
    state.current_player_count = state.players.len();
    if state.rounds.is_empty() {
        let round = state.empty_round();
        state.rounds.push_back(round);
    }
    let ids: Vec<_> = state.player_ids().collect();
    for round in state.rounds.iter_mut() {
        round.fill_missing(ids.iter().copied());
    }
    for player in state.players.iter_mut() {
        if player.name.trim().is_empty() {
            player.name = player.id.default_name();
        }
    }
    refresh_totals(state);
}
