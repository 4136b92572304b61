use log::{info, warn};
use serde::Serialize;

use crate::models::{
    ledger::{DeliberationLedger, VoteOutcome},
    player::Player,
    roster::Roster,
};
use crate::services::win::{self, GameResult};

#[derive(Debug, Clone, Serialize)]
pub struct NightResolution {
    pub night: u32,
    pub message: String,
    pub eliminated: Option<Player>,
    pub day_message: String,
    pub result: GameResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayResolution {
    pub day: u32,
    pub message: String,
    pub eliminated: Option<Player>,
    pub result: GameResult,
}

/// Turns the night's tally and the doctor's save into at most one
/// elimination, applies it to the roster and writes the day message.
///
/// A night that already produced its victim is left as it is.
pub fn resolve_night(
    ledger: &mut DeliberationLedger,
    roster: &mut Roster,
    night: u32,
) -> NightResolution {
    let already_resolved = ledger.eliminated_this_night().is_some();
    let VoteOutcome {
        eliminated: chosen,
        message,
    } = ledger.most_voted();

    if already_resolved {
        return NightResolution {
            night,
            message,
            eliminated: None,
            day_message: ledger.day_message().to_string(),
            result: win::evaluate(roster),
        };
    }

    // most_voted already steers around the saved player, the check below
    // only fires if that ever stops being true.
    let eliminated = match chosen.as_deref() {
        Some(name) if ledger.check_died(name) => roster.eliminate(name),
        Some(name) => {
            warn!("{name} was chosen but protected; no elimination applied");
            None
        }
        None => None,
    };

    ledger.record_night_report(night, eliminated.as_ref().map(|p| p.name.as_str()));
    let result = win::evaluate(roster);
    info!("Night {night} resolved: {message} ({result:?})");

    NightResolution {
        night,
        message,
        eliminated,
        day_message: ledger.day_message().to_string(),
        result,
    }
}

/// Day votes eliminate the active player with the most votes outright; ties
/// go to the alphabetically first name and the doctor plays no part.
pub fn resolve_day(ledger: &mut DeliberationLedger, roster: &mut Roster, day: u32) -> DayResolution {
    if let Some(name) = ledger.eliminated_this_day() {
        return DayResolution {
            day,
            message: format!("{name} already eliminated this day"),
            eliminated: None,
            result: win::evaluate(roster),
        };
    }

    let ranked: Vec<(String, u32)> = ledger
        .ranked_votes()
        .into_iter()
        .filter(|(name, _)| roster.is_active(name))
        .collect();
    let total: u32 = ranked.iter().map(|(_, count)| count).sum();

    let (message, eliminated) = match ranked.first() {
        None => ("No votes recorded".to_string(), None),
        Some((name, count)) => {
            let removed = roster.eliminate(name);
            if removed.is_some() {
                ledger.mark_eliminated_this_day(name);
            }
            (format!("{name} eliminated with {count} of {total} votes"), removed)
        }
    };

    let result = win::evaluate(roster);
    info!("Day {day} resolved: {message} ({result:?})");
    DayResolution {
        day,
        message,
        eliminated,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::RoleKind;

    fn five_player_roster() -> Roster {
        let mut roster = Roster::new();
        roster.set_player_count(5).unwrap();
        roster.assign(1, "alice", RoleKind::Villager).unwrap();
        roster.assign(2, "bob", RoleKind::Villager).unwrap();
        roster.assign(3, "carol", RoleKind::Sheriff).unwrap();
        roster.assign(4, "dave", RoleKind::Mafia).unwrap();
        roster.assign(5, "erin", RoleKind::Doctor).unwrap();
        roster.lock().unwrap();
        roster
    }

    #[test]
    fn night_without_votes_eliminates_no_one() {
        let mut roster = five_player_roster();
        let mut ledger = DeliberationLedger::new();
        let resolution = resolve_night(&mut ledger, &mut roster, 1);

        assert!(resolution.eliminated.is_none());
        assert_eq!(resolution.message, "No votes recorded");
        assert_eq!(resolution.day_message, "Night 1 results:\nNo one was eliminated.");
        assert_eq!(roster.players().len(), 5);
    }

    #[test]
    fn doctor_save_with_single_target_spares_everyone() {
        let mut roster = five_player_roster();
        let mut ledger = DeliberationLedger::new();
        ledger.add_vote("alice");
        ledger.set_doctor_save("alice");

        let resolution = resolve_night(&mut ledger, &mut roster, 1);
        assert!(resolution.eliminated.is_none());
        assert_eq!(resolution.message, "No elimination (doctor saved Alice)");
        assert_eq!(resolution.result, GameResult::InProgress);
    }

    #[test]
    fn second_resolution_keeps_first_outcome() {
        let mut roster = five_player_roster();
        let mut ledger = DeliberationLedger::new();
        ledger.add_vote("bob");

        let first = resolve_night(&mut ledger, &mut roster, 1);
        assert_eq!(first.eliminated.map(|p| p.name), Some("bob".to_string()));

        let second = resolve_night(&mut ledger, &mut roster, 1);
        assert!(second.eliminated.is_none());
        assert_eq!(second.message, "bob already eliminated this night");
        assert_eq!(second.day_message, "Night 1 results:\nBob was eliminated.");
        assert_eq!(roster.players().len(), 4);
    }

    #[test]
    fn day_vote_ignores_inactive_targets_and_the_doctor() {
        let mut roster = five_player_roster();
        roster.eliminate("bob");
        let mut ledger = DeliberationLedger::new();
        ledger.add_vote("bob");
        ledger.add_vote("bob");
        ledger.add_vote("dave");
        ledger.set_doctor_save("dave");

        let resolution = resolve_day(&mut ledger, &mut roster, 1);
        assert_eq!(resolution.message, "dave eliminated with 1 of 1 votes");
        assert_eq!(resolution.result, GameResult::TownWin);

        let again = resolve_day(&mut ledger, &mut roster, 1);
        assert!(again.eliminated.is_none());
    }
}
