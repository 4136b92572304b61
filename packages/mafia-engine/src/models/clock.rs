use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Night,
    Day,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Night => write!(f, "Night"),
            Phase::Day => write!(f, "Day"),
        }
    }
}

/// Part 1 is free discussion, part 2 is the vote or night action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubPhase {
    #[default]
    Discussion,
    Decision,
}

impl SubPhase {
    pub fn number(self) -> u8 {
        match self {
            SubPhase::Discussion => 1,
            SubPhase::Decision => 2,
        }
    }
}

/// Night and day counters plus the sub-phase of each.
///
/// Counters name the night or day that is next to be played; night `k` comes
/// before day `k`. The clock does not gate its own transitions, callers check
/// `can_start_night` / `can_start_day` first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseClock {
    night_number: u32,
    day_number: u32,
    night_sub_phase: SubPhase,
    day_sub_phase: SubPhase,
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseClock {
    pub fn new() -> Self {
        PhaseClock {
            night_number: 1,
            day_number: 1,
            night_sub_phase: SubPhase::Discussion,
            day_sub_phase: SubPhase::Discussion,
        }
    }

    /// Returns false when the night is already in its decision part.
    pub fn advance_night_subphase(&mut self) -> bool {
        advance(&mut self.night_sub_phase)
    }

    pub fn advance_day_subphase(&mut self) -> bool {
        advance(&mut self.day_sub_phase)
    }

    /// A night may follow only once the day with the same number is done.
    pub fn can_start_night(&self) -> bool {
        self.night_number == self.day_number
    }

    pub fn can_start_day(&self) -> bool {
        self.day_number < self.night_number
    }

    pub fn start_new_night(&mut self) {
        self.night_number += 1;
        self.reset_sub_phases();
    }

    pub fn start_new_day(&mut self) {
        self.day_number += 1;
        self.reset_sub_phases();
    }

    pub fn reset(&mut self) {
        *self = PhaseClock::new();
    }

    fn reset_sub_phases(&mut self) {
        self.night_sub_phase = SubPhase::Discussion;
        self.day_sub_phase = SubPhase::Discussion;
    }

    pub fn night_number(&self) -> u32 {
        self.night_number
    }

    pub fn day_number(&self) -> u32 {
        self.day_number
    }

    pub fn night_sub_phase(&self) -> SubPhase {
        self.night_sub_phase
    }

    pub fn day_sub_phase(&self) -> SubPhase {
        self.day_sub_phase
    }

    pub fn sub_phase(&self, phase: Phase) -> SubPhase {
        match phase {
            Phase::Night => self.night_sub_phase,
            Phase::Day => self.day_sub_phase,
        }
    }

    pub fn number(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Night => self.night_number,
            Phase::Day => self.day_number,
        }
    }
}

fn advance(sub_phase: &mut SubPhase) -> bool {
    match sub_phase {
        SubPhase::Discussion => {
            *sub_phase = SubPhase::Decision;
            true
        }
        SubPhase::Decision => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn night_then_day_alternate() {
        let mut clock = PhaseClock::new();
        assert!(clock.can_start_night());
        assert!(!clock.can_start_day());

        clock.start_new_night();
        assert_eq!(clock.night_number(), 2);
        assert!(!clock.can_start_night());
        assert!(clock.can_start_day());

        clock.start_new_day();
        assert_eq!(clock.day_number(), 2);
        assert!(clock.can_start_night());
    }

    #[test]
    fn sub_phase_only_moves_forward_once() {
        let mut clock = PhaseClock::new();
        assert!(clock.advance_night_subphase());
        assert!(!clock.advance_night_subphase());
        assert_eq!(clock.night_sub_phase().number(), 2);
        assert_eq!(clock.day_sub_phase(), SubPhase::Discussion);

        clock.start_new_night();
        assert_eq!(clock.night_sub_phase(), SubPhase::Discussion);
    }
}
