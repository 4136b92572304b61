//! Ready-made sessions for tests: every seat named and roled, roster locked.

use crate::collaborators::Confirm;
use crate::error::Result;
use crate::models::role::RoleKind;
use crate::session::GameSession;

/// Approves every confirmation.
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _title: &str, _message: &str) -> bool {
        true
    }
}

/// Builds a locked session from `(name, role)` seats in speaking order.
pub fn locked_session(mafias: usize, seats: &[(&str, RoleKind)]) -> Result<GameSession> {
    let mut session = GameSession::new();
    session.set_player_count(seats.len())?;
    session.set_mafia_count(mafias)?;
    // special roles first so the slot check never sees a full table of villagers
    let mut order: Vec<usize> = (0..seats.len()).collect();
    order.sort_by_key(|&i| seats[i].1 == RoleKind::Villager);
    for i in order {
        let (name, role) = seats[i];
        session.assign(i + 1, name, role)?;
    }
    session.lock_roster(&mut AutoConfirm)?;
    Ok(session)
}

/// alice (villager), bob (doctor), carol (sheriff), dave (mafia).
pub fn four_player_session() -> Result<GameSession> {
    locked_session(
        1,
        &[
            ("alice", RoleKind::Villager),
            ("bob", RoleKind::Doctor),
            ("carol", RoleKind::Sheriff),
            ("dave", RoleKind::Mafia),
        ],
    )
}

/// alice, bob (villagers), carol (sheriff), dave (mafia), erin (doctor).
pub fn five_player_session() -> Result<GameSession> {
    locked_session(
        1,
        &[
            ("alice", RoleKind::Villager),
            ("bob", RoleKind::Villager),
            ("carol", RoleKind::Sheriff),
            ("dave", RoleKind::Mafia),
            ("erin", RoleKind::Doctor),
        ],
    )
}
