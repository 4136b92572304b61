use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum RoleKind {
    #[default]
    Unassigned,
    Villager,
    Mafia,
    Sheriff,
    Doctor,
}

/// What a role does during the decision part of a night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NightAction {
    Eliminate,
    Investigate,
    Protect,
}

impl RoleKind {
    pub const ASSIGNABLE: [RoleKind; 4] = [
        RoleKind::Villager,
        RoleKind::Mafia,
        RoleKind::Sheriff,
        RoleKind::Doctor,
    ];

    pub fn is_mafia(self) -> bool {
        self == RoleKind::Mafia
    }

    /// Villager, Sheriff and Doctor.
    pub fn is_town(self) -> bool {
        matches!(
            self,
            RoleKind::Villager | RoleKind::Sheriff | RoleKind::Doctor
        )
    }

    pub fn night_action(self) -> Option<NightAction> {
        match self {
            RoleKind::Mafia => Some(NightAction::Eliminate),
            RoleKind::Sheriff => Some(NightAction::Investigate),
            RoleKind::Doctor => Some(NightAction::Protect),
            RoleKind::Villager | RoleKind::Unassigned => None,
        }
    }

    /// Only the mafia casts ballots at night; the other night roles act alone.
    pub fn votes_at_night(self) -> bool {
        self.night_action() == Some(NightAction::Eliminate)
    }

    /// Whether a player holding this role may be chosen by `actor` at night.
    pub fn is_night_target_for(self, actor: RoleKind) -> bool {
        match actor.night_action() {
            Some(NightAction::Eliminate) => !self.is_mafia(),
            Some(NightAction::Investigate) | Some(NightAction::Protect) => true,
            None => false,
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleKind::Unassigned => write!(f, "Unassigned"),
            RoleKind::Villager => write!(f, "Villager"),
            RoleKind::Mafia => write!(f, "Mafia"),
            RoleKind::Sheriff => write!(f, "Sheriff"),
            RoleKind::Doctor => write!(f, "Doctor"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for RoleKind {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "unassigned" | "none" => Ok(RoleKind::Unassigned),
            "villager" | "civilian" => Ok(RoleKind::Villager),
            "mafia" => Ok(RoleKind::Mafia),
            "sheriff" => Ok(RoleKind::Sheriff),
            "doctor" => Ok(RoleKind::Doctor),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("MAFIA".parse::<RoleKind>(), Ok(RoleKind::Mafia));
        assert_eq!(" Doctor ".parse::<RoleKind>(), Ok(RoleKind::Doctor));
        assert_eq!("".parse::<RoleKind>(), Ok(RoleKind::Unassigned));
        assert!("werewolf".parse::<RoleKind>().is_err());
    }

    #[test]
    fn mafia_cannot_target_mafia() {
        assert!(!RoleKind::Mafia.is_night_target_for(RoleKind::Mafia));
        assert!(RoleKind::Sheriff.is_night_target_for(RoleKind::Mafia));
        assert!(RoleKind::Doctor.is_night_target_for(RoleKind::Doctor));
        assert!(!RoleKind::Villager.is_night_target_for(RoleKind::Villager));
    }

    #[test]
    fn only_mafia_votes_at_night() {
        let voters: Vec<_> = RoleKind::ASSIGNABLE
            .into_iter()
            .filter(|r| r.votes_at_night())
            .collect();
        assert_eq!(voters, vec![RoleKind::Mafia]);
    }
}
