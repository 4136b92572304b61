use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{player::Player, role::RoleKind};
use crate::error::{GameError, QuotaViolation, Result};
use crate::utils::text::fold_name;

pub const MIN_PLAYERS: usize = 4;
pub const MAX_PLAYERS: usize = 11;
pub const DEFAULT_PLAYERS: usize = 4;
pub const DEFAULT_MAFIAS: usize = 1;

/// Seats, role quotas and the views derived from them.
///
/// `players` is the active speaking order. Positions handed to the mutators are
/// 1-indexed seats into that order. The derived fields (`mafias`, `sheriff`,
/// `doctor`, `players_left`, `mafias_left`) are rebuilt from the whole roster
/// after every successful mutation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
    total_players: usize,
    total_mafias: usize,
    players_left: usize,
    mafias_left: usize,
    mafias: Vec<String>,
    sheriff: Option<String>,
    doctor: Option<String>,
    eliminated: Vec<String>,
    locked: bool,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    pub fn new() -> Self {
        let mut roster = Roster {
            players: vec![Player::default(); DEFAULT_PLAYERS],
            total_players: DEFAULT_PLAYERS,
            total_mafias: DEFAULT_MAFIAS,
            players_left: 0,
            mafias_left: 0,
            mafias: Vec::new(),
            sheriff: None,
            doctor: None,
            eliminated: Vec::new(),
            locked: false,
        };
        roster.refresh();
        roster
    }

    /// Largest mafia quota allowed for `players` seats: `ceil(players / 2) - 1`.
    pub fn max_mafias(players: usize) -> usize {
        players.div_ceil(2).saturating_sub(1)
    }

    pub fn set_player_count(&mut self, count: usize) -> Result<()> {
        self.ensure_unlocked()?;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(GameError::InvalidPlayerCount(count));
        }

        self.total_players = count;
        self.players = vec![Player::default(); count];
        self.eliminated.clear();

        let max = Self::max_mafias(count);
        if self.total_mafias > max {
            debug!("Mafia quota {} clamped to {}", self.total_mafias, max);
            self.total_mafias = max;
        }
        self.refresh();
        info!("Player count set to {count} ({} mafia)", self.total_mafias);
        Ok(())
    }

    /// Sets the mafia quota. Seats already holding roles are not re-checked
    /// here; the next `assign` validates against the new quota.
    pub fn set_mafia_count(&mut self, count: usize) -> Result<()> {
        self.ensure_unlocked()?;
        let max = Self::max_mafias(self.total_players);
        if count == 0 || count > max {
            return Err(GameError::InvalidMafiaCount {
                requested: count,
                max,
            });
        }
        self.total_mafias = count;
        info!("Mafia count set to {count}");
        Ok(())
    }

    /// Puts `name` with `role` into seat `position` (1-indexed).
    ///
    /// The change is checked against a copy of the roster first, so a rejected
    /// assignment leaves every seat and derived view untouched.
    pub fn assign(&mut self, position: usize, name: &str, role: RoleKind) -> Result<()> {
        self.ensure_unlocked()?;
        let index = self.seat_index(position)?;
        check_name(name)?;

        let mut proposed = self.players.clone();
        proposed[index] = Player::new(name.trim(), role);

        let violations = self.check_role_counts(&proposed);
        if !violations.is_empty() {
            let err = GameError::RoleAssignment { violations };
            warn!("Rejected {role} for seat {position}: {err}");
            return Err(err);
        }

        self.players = proposed;
        self.refresh();
        debug!("Seat {position} -> {} ({role})", name.trim());
        Ok(())
    }

    pub fn rename(&mut self, position: usize, name: &str) -> Result<()> {
        self.ensure_unlocked()?;
        let index = self.seat_index(position)?;
        check_name(name)?;
        self.players[index].name = name.trim().to_string();
        self.refresh();
        Ok(())
    }

    /// Role-count checker: every returned violation is a condition that fails
    /// for `seats`.
    pub fn check_role_counts(&self, seats: &[Player]) -> Vec<QuotaViolation> {
        let count = |role: RoleKind| seats.iter().filter(|p| p.role == role).count() as i64;

        let mafia_left = self.total_mafias as i64 - count(RoleKind::Mafia);
        let sheriff_left = 1 - count(RoleKind::Sheriff);
        let doctor_left = 1 - count(RoleKind::Doctor);
        let open = count(RoleKind::Unassigned);

        let mut violations = Vec::new();
        if mafia_left < 0 {
            violations.push(QuotaViolation::TooManyMafias {
                max: self.total_mafias,
            });
        }
        if sheriff_left < 0 {
            violations.push(QuotaViolation::SheriffTaken);
        }
        if doctor_left < 0 {
            violations.push(QuotaViolation::DoctorTaken);
        }
        if mafia_left + sheriff_left + doctor_left > open {
            violations.push(QuotaViolation::InsufficientSlots);
        }
        violations
    }

    /// Roles a seat may still be given without breaking a quota.
    pub fn available_roles(&self) -> Vec<RoleKind> {
        let count = |role: RoleKind| self.players.iter().filter(|p| p.role == role).count();
        let villager_quota = self.villager_quota();

        let mut available = vec![RoleKind::Unassigned];
        if count(RoleKind::Villager) < villager_quota {
            available.push(RoleKind::Villager);
        }
        if count(RoleKind::Mafia) < self.total_mafias {
            available.push(RoleKind::Mafia);
        }
        if count(RoleKind::Sheriff) == 0 {
            available.push(RoleKind::Sheriff);
        }
        if count(RoleKind::Doctor) == 0 {
            available.push(RoleKind::Doctor);
        }
        available
    }

    /// Seats still missing a name or a role, 1-indexed.
    pub fn missing_seats(&self) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_seated())
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Gives every unassigned seat a role drawn from what the quotas still
    /// allow. Unnamed seats become `Player N`.
    pub fn fill_random_roles<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.ensure_unlocked()?;

        let count = |role: RoleKind| self.players.iter().filter(|p| p.role == role).count();
        let open = count(RoleKind::Unassigned);
        let mafias = self.total_mafias.saturating_sub(count(RoleKind::Mafia));
        let sheriffs = 1usize.saturating_sub(count(RoleKind::Sheriff));
        let doctors = 1usize.saturating_sub(count(RoleKind::Doctor));

        let mut pool = Vec::with_capacity(open);
        pool.extend(std::iter::repeat(RoleKind::Mafia).take(mafias));
        pool.extend(std::iter::repeat(RoleKind::Sheriff).take(sheriffs));
        pool.extend(std::iter::repeat(RoleKind::Doctor).take(doctors));
        let villagers = open.saturating_sub(pool.len());
        pool.extend(std::iter::repeat(RoleKind::Villager).take(villagers));
        pool.truncate(open);
        pool.shuffle(rng);

        let mut proposed = self.players.clone();
        let mut draws = pool.into_iter();
        for (i, seat) in proposed.iter_mut().enumerate() {
            if seat.name.trim().is_empty() {
                seat.name = format!("Player {}", i + 1);
            }
            if seat.role == RoleKind::Unassigned {
                if let Some(role) = draws.next() {
                    seat.role = role;
                }
            }
        }

        let violations = self.check_role_counts(&proposed);
        if !violations.is_empty() {
            return Err(GameError::RoleAssignment { violations });
        }
        self.players = proposed;
        self.refresh();
        info!("Filled {open} open seats with random roles");
        Ok(())
    }

    /// One-way: after this no seat, name, role or count can change until
    /// `reset`.
    pub fn lock(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        self.locked = true;
        self.refresh();
        info!(
            "Roster locked: {} players, {} mafia",
            self.players.len(),
            self.mafias.len()
        );
        Ok(())
    }

    /// Removes the first active player matching `name` (case-insensitive).
    /// Unknown names are ignored; callers pass names they have already looked
    /// up.
    pub fn eliminate(&mut self, name: &str) -> Option<Player> {
        let index = self.players.iter().position(|p| p.is_named(name))?;
        let removed = self.players.remove(index);
        self.eliminated.push(removed.name.clone());
        self.refresh();
        info!(
            "{} eliminated ({} town / {} mafia left)",
            removed.name, self.players_left, self.mafias_left
        );
        Some(removed)
    }

    pub fn reset(&mut self) {
        *self = Roster::new();
        info!("Roster reset to defaults");
    }

    fn refresh(&mut self) {
        self.mafias.clear();
        self.sheriff = None;
        self.doctor = None;
        for player in &self.players {
            match player.role {
                RoleKind::Mafia => self.mafias.push(player.name.clone()),
                RoleKind::Sheriff => self.sheriff = Some(player.name.clone()),
                RoleKind::Doctor => self.doctor = Some(player.name.clone()),
                RoleKind::Villager | RoleKind::Unassigned => {}
            }
        }
        self.mafias_left = self.mafias.len();
        self.players_left = self.players.len() - self.mafias_left;
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.locked {
            return Err(GameError::Locked);
        }
        Ok(())
    }

    fn seat_index(&self, position: usize) -> Result<usize> {
        if position == 0 || position > self.players.len() {
            return Err(GameError::InvalidPosition {
                position,
                total: self.players.len(),
            });
        }
        Ok(position - 1)
    }

    fn villager_quota(&self) -> usize {
        self.total_players.saturating_sub(self.total_mafias + 2)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn names(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn find(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.is_named(name))
    }

    /// 1-indexed speaking position of an active player.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.is_named(name)).map(|i| i + 1)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn role_of(&self, name: &str) -> Option<RoleKind> {
        self.find(name).map(|p| p.role)
    }

    pub fn was_eliminated(&self, name: &str) -> bool {
        let key = fold_name(name);
        self.eliminated.iter().any(|n| fold_name(n) == key)
    }

    pub fn total_players(&self) -> usize {
        self.total_players
    }

    pub fn total_mafias(&self) -> usize {
        self.total_mafias
    }

    /// Active players that are not mafia.
    pub fn players_left(&self) -> usize {
        self.players_left
    }

    pub fn mafias_left(&self) -> usize {
        self.mafias_left
    }

    pub fn mafias(&self) -> &[String] {
        &self.mafias
    }

    pub fn sheriff(&self) -> Option<&str> {
        self.sheriff.as_deref()
    }

    pub fn doctor(&self) -> Option<&str> {
        self.doctor.as_deref()
    }

    pub fn eliminated(&self) -> &[String] {
        &self.eliminated
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Prompt tokens are bracketed, so a bracket in a name could be rendered as one.
fn check_name(name: &str) -> Result<()> {
    if name.contains(&['[', ']'][..]) {
        return Err(GameError::InvalidName(name.trim().to_string()));
    }
    Ok(())
}
