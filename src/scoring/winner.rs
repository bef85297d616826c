//! Winner announcements.

use serde::{Deserialize, Serialize};

use crate::core::Player;

/// Who won, and with how many points.
///
/// For a tie, `names` holds every tied player in seat order and `total` is
/// the first of them's total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerAnnouncement {
    pub names: Vec<String>,
    pub total: u32,
}

impl WinnerAnnouncement {
    #[must_use]
    pub fn new(names: Vec<String>, total: u32) -> Self {
        Self { names, total }
    }

    /// Build from the players' winner flags; `None` if nobody is flagged.
    #[must_use]
    pub fn from_players(players: &[Player]) -> Option<Self> {
        let mut winners = players.iter().filter(|p| p.is_winner).peekable();
        let total = winners.peek()?.total;
        let names = winners.map(|p| p.name.clone()).collect();
        Some(Self { names, total })
    }

    /// More than one player reached the target in the same mutation.
    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.names.len() > 1
    }

    /// Text for the victory dialog.
    ///
    /// ```
    /// use allfours_score::scoring::WinnerAnnouncement;
    ///
    /// let solo = WinnerAnnouncement::new(vec!["Ria".into()], 7);
    /// assert_eq!(solo.message(), "Ria wins with 7 points!");
    ///
    /// let tie = WinnerAnnouncement::new(vec!["Ria".into(), "Dev".into()], 10);
    /// assert_eq!(tie.message(), "Ria and Dev tie with 10 points!");
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        if self.is_tie() {
            format!("{} tie with {} points!", self.names.join(" and "), self.total)
        } else {
            format!("{} wins with {} points!", self.names.join(" and "), self.total)
        }
    }
}

impl std::fmt::Display for WinnerAnnouncement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn player(id: u8, name: &str, total: u32, is_winner: bool) -> Player {
        Player {
            id: PlayerId::new(id),
            name: name.to_string(),
            total,
            is_winner,
        }
    }

    #[test]
    fn test_no_winner() {
        let players = [player(1, "A", 3, false), player(2, "B", 4, false)];
        assert!(WinnerAnnouncement::from_players(&players).is_none());
    }

    #[test]
    fn test_sole_winner() {
        let players = [player(1, "A", 8, true), player(2, "B", 4, false)];
        let ann = WinnerAnnouncement::from_players(&players).unwrap();
        assert_eq!(ann.names, vec!["A"]);
        assert_eq!(ann.total, 8);
        assert!(!ann.is_tie());
    }

    #[test]
    fn test_tie_uses_first_winner_total() {
        let players = [
            player(1, "A", 3, false),
            player(2, "B", 10, true),
            player(3, "C", 10, true),
        ];
        let ann = WinnerAnnouncement::from_players(&players).unwrap();
        assert!(ann.is_tie());
        assert_eq!(ann.names, vec!["B", "C"]);
        assert_eq!(ann.total, 10);
        assert_eq!(ann.to_string(), "B and C tie with 10 points!");
    }
}
