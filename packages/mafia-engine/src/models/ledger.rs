use std::collections::{BTreeMap, HashMap};
use std::fmt;

use log::debug;
use serde::Serialize;

use super::{role::RoleKind, roster::Roster};
use crate::utils::text::{fold_name, title_case};

/// Who a ballot belongs to. Night ballots are cast per role, day ballots per
/// player; a new ballot from the same voter replaces the old one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Voter {
    Role(RoleKind),
    Player(String),
}

impl Voter {
    pub fn player(name: &str) -> Self {
        Voter::Player(fold_name(name))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dialogue {
    pub speaker: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteOutcome {
    pub eliminated: Option<String>,
    pub message: String,
}

impl VoteOutcome {
    fn none(message: impl Into<String>) -> Self {
        VoteOutcome {
            eliminated: None,
            message: message.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Mafia,
    NotMafia,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Mafia => write!(f, "Mafia"),
            Verdict::NotMafia => write!(f, "Not Mafia"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Investigation {
    pub target: String,
    pub verdict: Verdict,
}

/// What the last resolved night produced, kept for the following day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NightReport {
    pub night: u32,
    pub victim: Option<String>,
}

/// Transient state of the phase being played: what was said, who was voted,
/// who the doctor protects and what the sheriff learned.
///
/// Nothing here is cleared implicitly; the session calls the `clear_*` and
/// `reset_night_state` methods at phase boundaries.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DeliberationLedger {
    dialogues: Vec<Dialogue>,
    votes: BTreeMap<String, u32>,
    #[serde(skip)]
    ballots: HashMap<Voter, String>,
    doctor_save: Option<String>,
    eliminated_this_night: Option<String>,
    eliminated_this_day: Option<String>,
    investigation: Option<Investigation>,
    night_report: Option<NightReport>,
    day_message: String,
}

impl DeliberationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins per speaker; the speaker keeps the slot of their first
    /// message.
    pub fn add_dialogue(&mut self, speaker: &str, message: &str) {
        let key = fold_name(speaker);
        let message = message.trim().to_string();
        match self
            .dialogues
            .iter_mut()
            .find(|d| fold_name(&d.speaker) == key)
        {
            Some(existing) => existing.message = message,
            None => self.dialogues.push(Dialogue {
                speaker: speaker.trim().to_string(),
                message,
            }),
        }
    }

    pub fn dialogues(&self) -> &[Dialogue] {
        &self.dialogues
    }

    /// Numbered lines `"{i}. {Speaker}: {message}"` in insertion order. Every
    /// call starts a fresh pass.
    pub fn dialogue_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.dialogues
            .iter()
            .enumerate()
            .map(|(i, d)| format!("{}. {}: {}", i + 1, title_case(&d.speaker), d.message))
    }

    pub fn dialogues_text(&self) -> String {
        if self.dialogues.is_empty() {
            return "None".to_string();
        }
        self.dialogue_lines().collect::<Vec<_>>().join("\n")
    }

    pub fn add_vote(&mut self, target: &str) {
        *self.votes.entry(fold_name(target)).or_insert(0) += 1;
    }

    /// Moves `voter`'s ballot to `target`, withdrawing the ballot it cast
    /// before (if any).
    pub fn replace_vote(&mut self, voter: Voter, target: &str) {
        let key = fold_name(target);
        if let Some(previous) = self.ballots.insert(voter, key.clone()) {
            self.retract_vote(&previous);
        }
        self.add_vote(&key);
        debug!("Tally now {:?}", self.votes);
    }

    fn retract_vote(&mut self, target: &str) {
        if let Some(count) = self.votes.get_mut(target) {
            *count -= 1;
            if *count == 0 {
                self.votes.remove(target);
            }
        }
    }

    pub fn votes(&self) -> &BTreeMap<String, u32> {
        &self.votes
    }

    pub fn total_votes(&self) -> u32 {
        self.votes.values().sum()
    }

    /// Candidates ordered by descending votes, ties alphabetical.
    pub fn ranked_votes(&self) -> Vec<(String, u32)> {
        let mut ranked: Vec<(String, u32)> =
            self.votes.iter().map(|(k, v)| (k.clone(), *v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }

    pub fn set_doctor_save(&mut self, name: &str) {
        self.doctor_save = Some(fold_name(name));
    }

    pub fn doctor_save(&self) -> Option<&str> {
        self.doctor_save.as_deref()
    }

    /// Picks the night's victim from the tally, honouring the doctor's save.
    ///
    /// Once a victim is recorded the night is closed: later calls report the
    /// earlier elimination and change nothing.
    pub fn most_voted(&mut self) -> VoteOutcome {
        if self.votes.is_empty() {
            return VoteOutcome::none("No votes recorded");
        }
        if let Some(name) = &self.eliminated_this_night {
            return VoteOutcome::none(format!("{name} already eliminated this night"));
        }

        let total = self.total_votes();
        let ranked = self.ranked_votes();
        let (top, top_count) = &ranked[0];

        if self.doctor_save.as_deref() == Some(top.as_str()) {
            return match ranked.get(1) {
                Some((second, count)) => {
                    self.eliminated_this_night = Some(second.clone());
                    VoteOutcome {
                        eliminated: Some(second.clone()),
                        message: format!(
                            "{second} eliminated with {count} votes (doctor saved {})",
                            title_case(top)
                        ),
                    }
                }
                None => VoteOutcome::none(format!(
                    "No elimination (doctor saved {})",
                    title_case(top)
                )),
            };
        }

        self.eliminated_this_night = Some(top.clone());
        VoteOutcome {
            eliminated: Some(top.clone()),
            message: format!("{top} eliminated with {top_count} of {total} votes"),
        }
    }

    /// False only when the doctor protected `target`.
    pub fn check_died(&self, target: &str) -> bool {
        self.doctor_save.as_deref() != Some(fold_name(target).as_str())
    }

    /// Looks up `target`'s true alignment and remembers the verdict.
    pub fn investigate(&mut self, target: &str, roster: &Roster) -> String {
        let verdict = match roster.role_of(target) {
            Some(RoleKind::Mafia) => Verdict::Mafia,
            Some(_) => Verdict::NotMafia,
            None => return "Player not found".to_string(),
        };
        self.investigation = Some(Investigation {
            target: fold_name(target),
            verdict,
        });
        match verdict {
            Verdict::Mafia => format!("{} is a Mafia", title_case(target.trim())),
            Verdict::NotMafia => format!("{} is not a Mafia", title_case(target.trim())),
        }
    }

    pub fn investigation(&self) -> Option<&Investigation> {
        self.investigation.as_ref()
    }

    pub fn eliminated_this_night(&self) -> Option<&str> {
        self.eliminated_this_night.as_deref()
    }

    pub fn eliminated_this_day(&self) -> Option<&str> {
        self.eliminated_this_day.as_deref()
    }

    pub fn mark_eliminated_this_day(&mut self, name: &str) {
        self.eliminated_this_day = Some(fold_name(name));
    }

    /// Stores the night's result and the two-line message carried into the
    /// day.
    pub fn record_night_report(&mut self, night: u32, victim: Option<&str>) {
        let body = match victim {
            Some(name) => format!("{} was eliminated.", title_case(name)),
            None => "No one was eliminated.".to_string(),
        };
        self.day_message = format!("Night {night} results:\n{body}");
        self.night_report = Some(NightReport {
            night,
            victim: victim.map(fold_name),
        });
    }

    pub fn night_report(&self) -> Option<&NightReport> {
        self.night_report.as_ref()
    }

    pub fn day_message(&self) -> &str {
        &self.day_message
    }

    pub fn clear_dialogues(&mut self) {
        self.dialogues.clear();
    }

    pub fn clear_votes(&mut self) {
        self.votes.clear();
        self.ballots.clear();
    }

    pub fn clear_night_lock(&mut self) {
        self.eliminated_this_night = None;
    }

    pub fn clear_day_lock(&mut self) {
        self.eliminated_this_day = None;
    }

    /// Everything a new night starts without. The previous night's report and
    /// the day message survive.
    pub fn reset_night_state(&mut self) {
        self.clear_dialogues();
        self.clear_votes();
        self.doctor_save = None;
        self.investigation = None;
        self.clear_night_lock();
    }

    pub fn reset(&mut self) {
        *self = DeliberationLedger::default();
    }
}
