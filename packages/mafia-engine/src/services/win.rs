use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::roster::Roster;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    InProgress,
    TownWin,
    MafiaWin,
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::InProgress => write!(f, "The game continues"),
            GameResult::TownWin => write!(f, "Town wins! Every mafia has been eliminated"),
            GameResult::MafiaWin => write!(f, "Mafia wins! They equal or outnumber the town"),
        }
    }
}

/// Pure read of the roster counts: no mafia left means the town has won,
/// otherwise the mafia wins once the remaining town players no longer
/// outnumber them.
pub fn evaluate(roster: &Roster) -> GameResult {
    evaluate_counts(roster.players_left(), roster.mafias_left())
}

pub fn evaluate_counts(players_left: usize, mafias_left: usize) -> GameResult {
    if mafias_left == 0 {
        GameResult::TownWin
    } else if players_left <= mafias_left {
        GameResult::MafiaWin
    } else {
        GameResult::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn town_wins_without_mafia() {
        assert_eq!(evaluate_counts(5, 0), GameResult::TownWin);
    }

    #[test]
    fn mafia_wins_at_parity() {
        assert_eq!(evaluate_counts(2, 2), GameResult::MafiaWin);
        assert_eq!(evaluate_counts(1, 2), GameResult::MafiaWin);
    }

    #[test]
    fn game_continues_while_town_outnumbers() {
        assert_eq!(evaluate_counts(2, 1), GameResult::InProgress);
        assert!(!GameResult::InProgress.is_over());
    }
}
