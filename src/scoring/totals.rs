//! Totals and winner flags derived from round data.
//!
//! `derive` is a pure function of `(players, rounds, target)`. `recompute`
//! writes its result into a state and reports whether the write crossed
//! from "no winner" to "at least one winner". That crossing is the only
//! thing that produces a winner announcement, so recomputing an unchanged
//! state, or a state that was already won, announces nothing.

use im::Vector;
use smallvec::SmallVec;

use super::winner::WinnerAnnouncement;
use crate::core::{GameState, Player, Round, MAX_PLAYERS};

/// Derived per-player values, in seat order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Derivation {
    /// Sum of each player's entries.
    pub totals: SmallVec<[u32; MAX_PLAYERS]>,

    /// `total >= target` for each player.
    pub winners: SmallVec<[bool; MAX_PLAYERS]>,
}

impl Derivation {
    /// Does any player reach the target?
    #[must_use]
    pub fn any_winner(&self) -> bool {
        self.winners.iter().any(|&w| w)
    }
}

/// Compute totals and winner flags.
///
/// Absent round entries count as 0. Every player at or above the target is
/// a winner; ties are not broken.
#[must_use]
pub fn derive(players: &[Player], rounds: &Vector<Round>, target: u32) -> Derivation {
    let totals: SmallVec<[u32; MAX_PLAYERS]> = players
        .iter()
        .map(|player| {
            rounds
                .iter()
                .fold(0u32, |acc, round| acc.saturating_add(round.get(player.id)))
        })
        .collect();
    let winners = totals.iter().map(|&total| total >= target).collect();

    Derivation { totals, winners }
}

/// Recompute a state's derived fields in place.
///
/// Returns the announcement when this call moved the game from no winner
/// to at least one winner.
pub fn recompute(state: &mut GameState) -> Option<WinnerAnnouncement> {
    let had_winner = state.has_winner();
    let derived = derive(&state.players, &state.rounds, state.target_score);

    for ((player, &total), &is_winner) in state
        .players
        .iter_mut()
        .zip(&derived.totals)
        .zip(&derived.winners)
    {
        player.total = total;
        player.is_winner = is_winner;
    }

    if had_winner || !derived.any_winner() {
        return None;
    }
    WinnerAnnouncement::from_players(&state.players)
}

/// Update totals from the rounds, leaving winner flags as they are.
///
/// Used where the flags must keep their meaning as edge-trigger memory,
/// e.g. after a target change that should not announce anything.
pub fn refresh_totals(state: &mut GameState) {
    let derived = derive(&state.players, &state.rounds, state.target_score);
    for (player, &total) in state.players.iter_mut().zip(&derived.totals) {
        player.total = total;
    }
}

/// Zero every player's derived fields.
pub fn clear_derived(state: &mut GameState) {
    for player in state.players.iter_mut() {
        player.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{seat_players, PlayerId};

    fn game(count: usize, target: u32, rounds: &[&[(u8, u32)]]) -> GameState {
        let mut state = GameState::new(target);
        state.players = seat_players(count, &["A", "B", "C", "D"]);
        state.current_player_count = count;
        for entries in rounds {
            let mut round = state.empty_round();
            for &(id, points) in *entries {
                round.set(PlayerId::new(id), points);
            }
            state.rounds.push_back(round);
        }
        state
    }

    #[test]
    fn test_derive_sums_rounds() {
        let state = game(3, 20, &[&[(1, 5), (2, 3)], &[(1, 2), (3, 9)]]);
        let derived = derive(&state.players, &state.rounds, state.target_score);

        assert_eq!(derived.totals.as_slice(), &[7, 3, 9]);
        assert!(!derived.any_winner());
    }

    #[test]
    fn test_derive_absent_entries_count_zero() {
        let mut state = game(2, 7, &[]);
        state.rounds.push_back(Round::from_entries([(PlayerId::new(1), 4)]));

        let derived = derive(&state.players, &state.rounds, state.target_score);
        assert_eq!(derived.totals.as_slice(), &[4, 0]);
    }

    #[test]
    fn test_derive_at_target_is_winner() {
        let state = game(2, 7, &[&[(1, 7), (2, 6)]]);
        let derived = derive(&state.players, &state.rounds, state.target_score);
        assert_eq!(derived.winners.as_slice(), &[true, false]);
    }

    #[test]
    fn test_recompute_announces_once() {
        let mut state = game(2, 7, &[&[(1, 7), (2, 3)]]);

        let first = recompute(&mut state);
        assert_eq!(
            first,
            Some(WinnerAnnouncement::new(vec!["A".to_string()], 7))
        );
        assert!(state.players[0].is_winner);

        // Level stays high: no second announcement.
        assert_eq!(recompute(&mut state), None);
    }

    #[test]
    fn test_recompute_without_winner() {
        let mut state = game(2, 7, &[&[(1, 5), (2, 3)]]);
        assert_eq!(recompute(&mut state), None);
        assert_eq!(state.players[0].total, 5);
        assert_eq!(state.players[1].total, 3);
    }

    #[test]
    fn test_recompute_clears_stale_flags() {
        let mut state = game(2, 7, &[&[(1, 2)]]);
        state.players[0].total = 99;
        state.players[0].is_winner = true;

        assert_eq!(recompute(&mut state), None);
        assert_eq!(state.players[0].total, 2);
        assert!(!state.players[0].is_winner);
    }

    #[test]
    fn test_refresh_totals_keeps_flags() {
        let mut state = game(2, 7, &[&[(1, 9)]]);
        refresh_totals(&mut state);
        assert_eq!(state.players[0].total, 9);
        assert!(!state.players[0].is_winner);
    }

    #[test]
    fn test_clear_derived() {
        let mut state = game(2, 7, &[&[(1, 9)]]);
        recompute(&mut state);
        clear_derived(&mut state);
        assert!(state.players.iter().all(|p| p.total == 0 && !p.is_winner));
    }
}
