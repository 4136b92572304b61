use log::{info, warn};
use rand::Rng;
use serde::Serialize;

use crate::collaborators::{Clipboard, Confirm, Notify};
use crate::error::{GameError, Result};
use crate::models::{
    clock::{Phase, PhaseClock, SubPhase},
    journal::{GameJournal, JournalKind},
    ledger::{DeliberationLedger, Voter},
    role::RoleKind,
    roster::Roster,
};
use crate::services::{
    elimination::{self, DayResolution, NightResolution},
    prompt::{PromptCatalog, PromptContext, PromptPhase},
    win::{self, GameResult},
};

pub const LOCK_TITLE: &str = "Proceed";
pub const LOCK_MESSAGE: &str =
    "Action cannot be undone! If proceeded, you cannot change names, roles and numbers of players!";
pub const RESET_TITLE: &str = "Reset";
pub const RESET_MESSAGE: &str = "Are you sure you want to reset all values?";
pub const RESET_DONE: &str = "All values have been reset successfully!";

/// The one game being moderated.
///
/// Every operation validates first and only then mutates, so an `Err` always
/// leaves the session exactly as it was.
#[derive(Debug, Default)]
pub struct GameSession {
    roster: Roster,
    clock: PhaseClock,
    ledger: DeliberationLedger,
    journal: GameJournal,
    active: Option<Phase>,
}

/// Read-only view handed to serializers.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'a> {
    pub roster: &'a Roster,
    pub clock: &'a PhaseClock,
    pub ledger: &'a DeliberationLedger,
    pub active_phase: Option<Phase>,
    pub result: GameResult,
}

impl SessionSnapshot<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn clock(&self) -> &PhaseClock {
        &self.clock
    }

    pub fn ledger(&self) -> &DeliberationLedger {
        &self.ledger
    }

    pub fn journal(&self) -> &GameJournal {
        &self.journal
    }

    pub fn active_phase(&self) -> Option<Phase> {
        self.active
    }

    pub fn set_player_count(&mut self, count: usize) -> Result<()> {
        self.roster.set_player_count(count)
    }

    pub fn set_mafia_count(&mut self, count: usize) -> Result<()> {
        self.roster.set_mafia_count(count)
    }

    pub fn assign(&mut self, position: usize, name: &str, role: RoleKind) -> Result<()> {
        self.roster.assign(position, name, role)
    }

    pub fn rename(&mut self, position: usize, name: &str) -> Result<()> {
        self.roster.rename(position, name)
    }

    pub fn fill_random_roles<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.roster.fill_random_roles(rng)
    }

    pub fn available_roles(&self) -> Vec<RoleKind> {
        self.roster.available_roles()
    }

    /// Locks the roster after the operator confirms. `Ok(false)` means the
    /// operator declined and nothing changed.
    pub fn lock_roster<H: Confirm + ?Sized>(&mut self, host: &mut H) -> Result<bool> {
        if self.roster.is_locked() {
            return Err(GameError::Locked);
        }
        let missing = self.roster.missing_seats();
        if !missing.is_empty() {
            return Err(GameError::IncompleteRoster { missing });
        }
        // the mafia quota can move after seats are filled
        let violations = self.roster.check_role_counts(self.roster.players());
        if !violations.is_empty() {
            return Err(GameError::RoleAssignment { violations });
        }
        if !host.confirm(LOCK_TITLE, LOCK_MESSAGE) {
            info!("Roster lock cancelled");
            return Ok(false);
        }

        self.roster.lock()?;
        self.journal.add_system_message(format!(
            "Roster locked: {}",
            self.roster.names().join(" → ")
        ));
        Ok(true)
    }

    /// Restores every component to its defaults after the operator confirms.
    pub fn reset<H: Confirm + Notify + ?Sized>(&mut self, host: &mut H) -> bool {
        if !host.confirm(RESET_TITLE, RESET_MESSAGE) {
            return false;
        }
        self.roster.reset();
        self.clock.reset();
        self.ledger.reset();
        self.journal.clear();
        self.active = None;
        info!("Session reset");
        host.notify(RESET_TITLE, RESET_DONE);
        true
    }

    fn ensure_can_open(&self) -> Result<()> {
        if !self.roster.is_locked() {
            return Err(GameError::PhaseOrder(
                "Lock the roster before starting the game".to_string(),
            ));
        }
        let result = self.result();
        if result.is_over() {
            return Err(GameError::GameOver(result.to_string()));
        }
        if let Some(phase) = self.active {
            return Err(GameError::PhaseOrder(format!(
                "{phase} {} is still in progress",
                self.clock.number(phase)
            )));
        }
        Ok(())
    }

    pub fn begin_night(&mut self) -> Result<u32> {
        self.ensure_can_open()?;
        if !self.clock.can_start_night() {
            return Err(GameError::PhaseOrder(format!(
                "Day {} must be completed before night {} can start",
                self.clock.day_number(),
                self.clock.night_number()
            )));
        }

        let night = self.clock.night_number();
        self.ledger.reset_night_state();
        self.active = Some(Phase::Night);
        self.journal.add_system_message(format!("Night {night} begins"));
        info!("Night {night} started");
        Ok(night)
    }

    pub fn begin_day(&mut self) -> Result<u32> {
        self.ensure_can_open()?;
        if !self.clock.can_start_day() {
            return Err(GameError::PhaseOrder(format!(
                "Night {} must be completed before day {} can start",
                self.clock.night_number(),
                self.clock.day_number()
            )));
        }

        let day = self.clock.day_number();
        self.ledger.clear_dialogues();
        self.ledger.clear_votes();
        self.ledger.clear_day_lock();
        self.active = Some(Phase::Day);
        self.journal.add_system_message(format!("Day {day} begins"));
        info!("Day {day} started");
        Ok(day)
    }

    fn ensure_open(&self, phase: Phase) -> Result<()> {
        if self.active != Some(phase) {
            return Err(GameError::PhaseOrder(format!(
                "No {} is in progress",
                phase.to_string().to_lowercase()
            )));
        }
        Ok(())
    }

    fn ensure_sub_phase(&self, phase: Phase, expected: SubPhase) -> Result<()> {
        let current = self.clock.sub_phase(phase);
        if current != expected {
            return Err(GameError::SubPhase(format!(
                "{phase} {} is in part {}, this needs part {}",
                self.clock.number(phase),
                current.number(),
                expected.number()
            )));
        }
        Ok(())
    }

    /// Moves the open phase from discussion to decision. The vote tally is
    /// emptied. Dialogues are kept on purpose: the decision prompts quote the
    /// discussion, and the next phase start clears them instead.
    pub fn advance_subphase(&mut self) -> Result<SubPhase> {
        match self.active {
            Some(Phase::Night) => self.advance_night_subphase(),
            Some(Phase::Day) => self.advance_day_subphase(),
            None => Err(GameError::PhaseOrder("No phase is in progress".to_string())),
        }
    }

    pub fn advance_night_subphase(&mut self) -> Result<SubPhase> {
        self.ensure_open(Phase::Night)?;
        self.ensure_sub_phase(Phase::Night, SubPhase::Discussion)?;
        self.clock.advance_night_subphase();
        self.ledger.clear_votes();
        info!("Night {} moved to part 2", self.clock.night_number());
        Ok(self.clock.night_sub_phase())
    }

    pub fn advance_day_subphase(&mut self) -> Result<SubPhase> {
        self.ensure_open(Phase::Day)?;
        self.ensure_sub_phase(Phase::Day, SubPhase::Discussion)?;
        self.clock.advance_day_subphase();
        self.ledger.clear_votes();
        info!("Day {} moved to part 2", self.clock.day_number());
        Ok(self.clock.day_sub_phase())
    }

    fn active_player(&self, name: &str) -> Result<RoleKind> {
        self.roster
            .role_of(name)
            .ok_or_else(|| GameError::UnknownPlayer(name.trim().to_string()))
    }

    pub fn record_dialogue(&mut self, speaker: &str, message: &str) -> Result<()> {
        let phase = self
            .active
            .ok_or_else(|| GameError::PhaseOrder("No phase is in progress".to_string()))?;
        self.ensure_sub_phase(phase, SubPhase::Discussion)?;
        let role = self.active_player(speaker)?;
        // the night meeting is the mafia's alone
        if phase == Phase::Night && !role.votes_at_night() {
            return Err(GameError::IneligibleRole {
                role,
                action: "speak at night".to_string(),
            });
        }
        self.ledger.add_dialogue(speaker, message);
        Ok(())
    }

    /// One ballot per night-voting role; a second ballot moves the first.
    pub fn cast_night_vote(&mut self, role: RoleKind, target: &str) -> Result<()> {
        self.ensure_open(Phase::Night)?;
        if !role.votes_at_night() {
            return Err(GameError::IneligibleRole {
                role,
                action: "vote at night".to_string(),
            });
        }
        self.ensure_sub_phase(Phase::Night, SubPhase::Decision)?;
        let target_role = self.active_player(target)?;
        if !target_role.is_night_target_for(role) {
            warn!("{role} tried to target {} ({target_role})", target.trim());
            return Err(GameError::IneligibleRole {
                role,
                action: format!("target {}", target.trim()),
            });
        }
        self.ledger.replace_vote(Voter::Role(role), target);
        Ok(())
    }

    pub fn cast_day_vote(&mut self, voter: &str, target: &str) -> Result<()> {
        self.ensure_open(Phase::Day)?;
        self.ensure_sub_phase(Phase::Day, SubPhase::Decision)?;
        self.active_player(voter)?;
        self.active_player(target)?;
        self.ledger.replace_vote(Voter::player(voter), target);
        Ok(())
    }

    pub fn protect(&mut self, target: &str) -> Result<()> {
        self.ensure_open(Phase::Night)?;
        if self.roster.doctor().is_none() {
            return Err(GameError::IneligibleRole {
                role: RoleKind::Doctor,
                action: "protect once eliminated".to_string(),
            });
        }
        self.active_player(target)?;
        self.ledger.set_doctor_save(target);
        info!("Doctor protects {}", target.trim());
        Ok(())
    }

    /// Returns the sheriff's finding as text. An unknown target yields
    /// `Player not found` rather than an error and does not use up the
    /// night's one investigation.
    pub fn investigate(&mut self, target: &str) -> Result<String> {
        self.ensure_open(Phase::Night)?;
        if self.roster.sheriff().is_none() {
            return Err(GameError::IneligibleRole {
                role: RoleKind::Sheriff,
                action: "investigate once eliminated".to_string(),
            });
        }
        if let Some(done) = self.ledger.investigation() {
            return Err(GameError::IneligibleRole {
                role: RoleKind::Sheriff,
                action: format!("investigate again tonight (already checked {})", done.target),
            });
        }
        let finding = self.ledger.investigate(target, &self.roster);
        if self.roster.is_active(target) {
            self.journal.add(JournalKind::Investigation, finding.clone());
        }
        Ok(finding)
    }

    pub fn resolve_night<H: Notify + ?Sized>(&mut self, host: &mut H) -> Result<NightResolution> {
        self.ensure_open(Phase::Night)?;
        let night = self.clock.night_number();
        let resolution = elimination::resolve_night(&mut self.ledger, &mut self.roster, night);

        if let Some(player) = &resolution.eliminated {
            self.journal.add(
                JournalKind::Night,
                format!("Night {night}: {} ({}) eliminated", player.name, player.role),
            );
        }
        host.notify(&format!("Night {night}"), &resolution.day_message);
        self.announce(resolution.result, host);

        self.clock.start_new_night();
        self.ledger.clear_night_lock();
        self.active = None;
        Ok(resolution)
    }

    pub fn resolve_day<H: Notify + ?Sized>(&mut self, host: &mut H) -> Result<DayResolution> {
        self.ensure_open(Phase::Day)?;
        let day = self.clock.day_number();
        let resolution = elimination::resolve_day(&mut self.ledger, &mut self.roster, day);

        if let Some(player) = &resolution.eliminated {
            self.journal.add(
                JournalKind::Day,
                format!("Day {day}: {} ({}) eliminated", player.name, player.role),
            );
        }
        host.notify(&format!("Day {day}"), &resolution.message);
        self.announce(resolution.result, host);

        self.clock.start_new_day();
        self.active = None;
        Ok(resolution)
    }

    fn announce<H: Notify + ?Sized>(&mut self, result: GameResult, host: &mut H) {
        if result.is_over() {
            info!("Game over: {result}");
            self.journal.add_system_message(result.to_string());
            host.notify("Game Over", &result.to_string());
        }
    }

    /// Winner check. A roster that is still being set up is always in
    /// progress.
    pub fn result(&self) -> GameResult {
        if !self.roster.is_locked() {
            return GameResult::InProgress;
        }
        win::evaluate(&self.roster)
    }

    /// Player after `current` in speaking order, `None` after the last seat.
    pub fn next_speaker(&self, current: &str) -> Option<&str> {
        let position = self.roster.position_of(current)?;
        self.roster.players().get(position).map(|p| p.name.as_str())
    }

    pub fn render_prompt(&self, phase: PromptPhase, player: &str) -> Result<String> {
        let role = self.active_player(player)?;
        let ctx = PromptContext {
            player,
            roster: &self.roster,
            clock: &self.clock,
            ledger: &self.ledger,
        };
        PromptCatalog::global().render(phase, role, &ctx)
    }

    /// Renders and hands the full text to the clipboard. The text is also
    /// returned for previews.
    pub fn copy_prompt<H: Clipboard + ?Sized>(
        &self,
        phase: PromptPhase,
        player: &str,
        host: &mut H,
    ) -> Result<String> {
        let text = self.render_prompt(phase, player)?;
        host.copy(&text);
        Ok(text)
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            roster: &self.roster,
            clock: &self.clock,
            ledger: &self.ledger,
            active_phase: self.active,
            result: self.result(),
        }
    }
}
