use std::fmt;

use serde::Serialize;

use crate::models::role::RoleKind;

/// One failed condition of the role-count check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum QuotaViolation {
    TooManyMafias { max: usize },
    SheriffTaken,
    DoctorTaken,
    InsufficientSlots,
}

impl fmt::Display for QuotaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotaViolation::TooManyMafias { max } => write!(f, "Too many mafias (max: {max})"),
            QuotaViolation::SheriffTaken => write!(f, "Sheriff already assigned"),
            QuotaViolation::DoctorTaken => write!(f, "Doctor already assigned"),
            QuotaViolation::InsufficientSlots => {
                write!(f, "Not enough remaining slots for required roles")
            }
        }
    }
}

fn join_violations(violations: &[QuotaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_seats(seats: &[usize]) -> String {
    seats
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every way a game-session mutation can be rejected.
///
/// All of them are raised before any state is touched, so the caller can
/// surface the message and carry on with the session unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Invalid Position! Seat {position} is outside 1..={total}")]
    InvalidPosition { position: usize, total: usize },

    #[error("{}", join_violations(.violations))]
    RoleAssignment { violations: Vec<QuotaViolation> },

    #[error("The roster is locked; reset the game to change players, names or roles")]
    Locked,

    #[error("Player count {0} is outside {min}..={max}", min = crate::models::roster::MIN_PLAYERS, max = crate::models::roster::MAX_PLAYERS)]
    InvalidPlayerCount(usize),

    #[error("Mafia count {requested} is outside 1..={max}")]
    InvalidMafiaCount { requested: usize, max: usize },

    #[error("Some 'Names' and/or 'Roles' are missing (seats {})", join_seats(.missing))]
    IncompleteRoster { missing: Vec<usize> },

    #[error("{0}")]
    PhaseOrder(String),

    #[error("{0}")]
    SubPhase(String),

    #[error("Player not found: {0}")]
    UnknownPlayer(String),

    #[error("Invalid name '{0}': names cannot contain '[' or ']'")]
    InvalidName(String),

    #[error("{role} cannot {action}")]
    IneligibleRole { role: RoleKind, action: String },

    #[error("The game is over: {0}")]
    GameOver(String),

    #[error("No prompt template for {phase} / {role}")]
    MissingTemplate { phase: String, role: RoleKind },
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_assignment_joins_every_failed_condition() {
        let err = GameError::RoleAssignment {
            violations: vec![
                QuotaViolation::TooManyMafias { max: 1 },
                QuotaViolation::InsufficientSlots,
            ],
        };
        assert_eq!(
            err.to_string(),
            "Too many mafias (max: 1), Not enough remaining slots for required roles"
        );
    }

    #[test]
    fn incomplete_roster_lists_seats() {
        let err = GameError::IncompleteRoster {
            missing: vec![2, 4],
        };
        assert!(err.to_string().ends_with("(seats 2, 4)"));
    }
}
