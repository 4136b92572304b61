//! Role prompts for the agents sitting at the table.
//!
//! A template is a fixed body plus the placeholders it carries. Rendering is a
//! plain string replace of each placeholder's token with a value computed from
//! the roster, clock and ledger. A placeholder with no value in the current
//! state keeps its token.

pub mod templates;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::models::{
    clock::{Phase, PhaseClock, SubPhase},
    ledger::DeliberationLedger,
    role::RoleKind,
    roster::Roster,
};
use crate::utils::text::{sequence_literal, title_case};

static CATALOG: Lazy<PromptCatalog> = Lazy::new(PromptCatalog::build);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PromptPhase {
    Initial,
    Night,
    Day,
    InvestigationResult,
    NightResult,
}

impl fmt::Display for PromptPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptPhase::Initial => write!(f, "initial"),
            PromptPhase::Night => write!(f, "night"),
            PromptPhase::Day => write!(f, "day"),
            PromptPhase::InvestigationResult => write!(f, "investigation"),
            PromptPhase::NightResult => write!(f, "results"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown prompt phase: {0}")]
pub struct UnknownPromptPhase(pub String);

impl FromStr for PromptPhase {
    type Err = UnknownPromptPhase;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "initial" | "intro" => Ok(PromptPhase::Initial),
            "night" => Ok(PromptPhase::Night),
            "day" => Ok(PromptPhase::Day),
            "investigation" | "sheriff" => Ok(PromptPhase::InvestigationResult),
            "results" | "result" => Ok(PromptPhase::NightResult),
            other => Err(UnknownPromptPhase(other.to_string())),
        }
    }
}

/// Logical names of the values a template can ask for. `Dialogues` sorts last
/// so free text typed by players is inserted after every other token is gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    Name,
    TotalPlayers,
    TotalCivilians,
    TotalMafias,
    Position,
    PlayersBefore,
    PlayersAfter,
    PlayerOrder,
    MafiaPartners,
    NightNumber,
    DayNumber,
    PhaseNumber,
    CurrentAction,
    TargetName,
    MafiaCheck,
    PlayerDied,
    Dialogues,
}

impl Placeholder {
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Name => "[PLAYER_NAME]",
            Placeholder::TotalPlayers => "[TOTAL_PLAYERS]",
            Placeholder::TotalCivilians => "[NUM_CIVILIANS]",
            Placeholder::TotalMafias => "[NUM_MAFIA]",
            Placeholder::Position => "[SPEAKING_POSITION]",
            Placeholder::PlayersBefore => "[PLAYERS_BEFORE_YOU]",
            Placeholder::PlayersAfter => "[PLAYERS_AFTER_YOU]",
            Placeholder::PlayerOrder => "[PLAYER_ORDER]",
            Placeholder::MafiaPartners => "[MAFIA_PARTNERS]",
            Placeholder::NightNumber => "[NIGHT_NUMBER]",
            Placeholder::DayNumber => "[DAY_NUMBER]",
            Placeholder::PhaseNumber => "[PHASE_NUMBER]",
            Placeholder::CurrentAction => "[CURRENT_ACTION]",
            Placeholder::TargetName => "[TARGET_NAME]",
            Placeholder::MafiaCheck => "[MAFIA_CHECK]",
            Placeholder::PlayerDied => "[PLAYER_DIED]",
            Placeholder::Dialogues => "[DIALOGUES]",
        }
    }
}

const BRIEFING: &[Placeholder] = &[
    Placeholder::Name,
    Placeholder::TotalPlayers,
    Placeholder::TotalCivilians,
    Placeholder::TotalMafias,
    Placeholder::Position,
    Placeholder::PlayersBefore,
    Placeholder::PlayersAfter,
    Placeholder::PlayerOrder,
];

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub body: &'static str,
    pub placeholders: BTreeMap<Placeholder, &'static str>,
}

impl PromptTemplate {
    fn new(body: &'static str, placeholders: &[Placeholder]) -> Self {
        PromptTemplate {
            body,
            placeholders: placeholders.iter().map(|p| (*p, p.token())).collect(),
        }
    }
}

/// Everything a render reads. Nothing is mutated.
pub struct PromptContext<'a> {
    pub player: &'a str,
    pub roster: &'a Roster,
    pub clock: &'a PhaseClock,
    pub ledger: &'a DeliberationLedger,
}

pub struct PromptCatalog {
    templates: HashMap<(PromptPhase, RoleKind), PromptTemplate>,
}

impl PromptCatalog {
    pub fn global() -> &'static PromptCatalog {
        &CATALOG
    }

    fn build() -> Self {
        use self::templates::*;
        use Placeholder::*;

        let mut templates = HashMap::new();
        let mut add = |phase, role, body, placeholders: &[Placeholder]| {
            templates.insert((phase, role), PromptTemplate::new(body, placeholders));
        };

        add(PromptPhase::Initial, RoleKind::Villager, INITIAL_VILLAGER, BRIEFING);
        add(PromptPhase::Initial, RoleKind::Sheriff, INITIAL_SHERIFF, BRIEFING);
        add(PromptPhase::Initial, RoleKind::Doctor, INITIAL_DOCTOR, BRIEFING);
        let mafia_briefing: Vec<Placeholder> =
            BRIEFING.iter().copied().chain([MafiaPartners]).collect();
        add(PromptPhase::Initial, RoleKind::Mafia, INITIAL_MAFIA, &mafia_briefing);

        add(PromptPhase::Night, RoleKind::Villager, NIGHT_VILLAGER, &[NightNumber]);
        add(
            PromptPhase::Night,
            RoleKind::Sheriff,
            NIGHT_SHERIFF,
            &[NightNumber, PhaseNumber, CurrentAction],
        );
        add(
            PromptPhase::Night,
            RoleKind::Doctor,
            NIGHT_DOCTOR,
            &[NightNumber, PhaseNumber, CurrentAction],
        );
        add(
            PromptPhase::Night,
            RoleKind::Mafia,
            NIGHT_MAFIA,
            &[NightNumber, PhaseNumber, CurrentAction, Dialogues],
        );

        for role in RoleKind::ASSIGNABLE {
            add(
                PromptPhase::Day,
                role,
                DAY,
                &[DayNumber, PhaseNumber, CurrentAction, Dialogues],
            );
            add(PromptPhase::NightResult, role, NIGHT_RESULT, &[PlayerDied]);
        }

        add(
            PromptPhase::InvestigationResult,
            RoleKind::Sheriff,
            INVESTIGATION_RESULT,
            &[TargetName, MafiaCheck],
        );

        PromptCatalog { templates }
    }

    pub fn template(&self, phase: PromptPhase, role: RoleKind) -> Option<&PromptTemplate> {
        self.templates.get(&(phase, role))
    }

    /// Phases with a template for `role`, in catalog order.
    pub fn phases_for(&self, role: RoleKind) -> Vec<PromptPhase> {
        let mut phases: Vec<PromptPhase> = self
            .templates
            .keys()
            .filter(|(_, r)| *r == role)
            .map(|(p, _)| *p)
            .collect();
        phases.sort();
        phases
    }

    pub fn render(&self, phase: PromptPhase, role: RoleKind, ctx: &PromptContext<'_>) -> Result<String> {
        let template = self
            .template(phase, role)
            .ok_or_else(|| GameError::MissingTemplate {
                phase: phase.to_string(),
                role,
            })?;

        let mut text = template.body.to_string();
        for (placeholder, token) in &template.placeholders {
            if let Some(value) = resolve(*placeholder, phase, role, ctx) {
                text = text.replace(token, &value);
            }
        }
        debug!("Rendered {phase} prompt for {} ({role})", ctx.player);
        Ok(text)
    }
}

fn resolve(placeholder: Placeholder, phase: PromptPhase, role: RoleKind, ctx: &PromptContext<'_>) -> Option<String> {
    let roster = ctx.roster;
    let names = roster.names();
    let position = roster.position_of(ctx.player);

    match placeholder {
        Placeholder::Name => Some(
            roster
                .find(ctx.player)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| ctx.player.trim().to_string()),
        ),
        Placeholder::TotalPlayers => Some(roster.total_players().to_string()),
        Placeholder::TotalCivilians => Some(
            roster
                .total_players()
                .saturating_sub(roster.total_mafias() + 2)
                .to_string(),
        ),
        Placeholder::TotalMafias => Some(roster.total_mafias().to_string()),
        Placeholder::Position => position.map(|p| p.to_string()),
        Placeholder::PlayersBefore => position.map(|p| sequence_literal(&names[..p - 1])),
        Placeholder::PlayersAfter => position.map(|p| sequence_literal(&names[p..])),
        Placeholder::PlayerOrder => Some(names.join(" → ")),
        Placeholder::MafiaPartners => {
            if role != RoleKind::Mafia {
                return None;
            }
            let partners: Vec<&str> = roster
                .mafias()
                .iter()
                .filter(|m| roster.find(m).map_or(true, |p| !p.is_named(ctx.player)))
                .map(String::as_str)
                .collect();
            Some(if partners.is_empty() {
                "None".to_string()
            } else {
                partners.join(", ")
            })
        }
        Placeholder::NightNumber => Some(ctx.clock.night_number().to_string()),
        Placeholder::DayNumber => Some(ctx.clock.day_number().to_string()),
        Placeholder::PhaseNumber => clock_phase(phase).map(|p| ctx.clock.sub_phase(p).number().to_string()),
        Placeholder::CurrentAction => {
            clock_phase(phase).map(|p| current_action(p, role, ctx.clock.sub_phase(p)).to_string())
        }
        Placeholder::Dialogues => Some(ctx.ledger.dialogues_text()),
        Placeholder::TargetName => ctx.ledger.investigation().map(|i| title_case(&i.target)),
        Placeholder::MafiaCheck => ctx.ledger.investigation().map(|i| i.verdict.to_string()),
        Placeholder::PlayerDied => ctx.ledger.night_report().map(|r| {
            r.victim
                .as_deref()
                .map(title_case)
                .unwrap_or_else(|| "No one".to_string())
        }),
    }
}

fn clock_phase(phase: PromptPhase) -> Option<Phase> {
    match phase {
        PromptPhase::Night => Some(Phase::Night),
        PromptPhase::Day => Some(Phase::Day),
        _ => None,
    }
}

/// What a player is being asked to do right now.
pub fn current_action(phase: Phase, role: RoleKind, sub_phase: SubPhase) -> &'static str {
    match (phase, sub_phase, role) {
        (Phase::Day, SubPhase::Discussion, _) => "Share your suspicions with the town",
        (Phase::Day, SubPhase::Decision, _) => "Vote for the player to eliminate",
        (Phase::Night, SubPhase::Discussion, RoleKind::Mafia) => {
            "Discuss tonight's target with your partners"
        }
        (Phase::Night, SubPhase::Decision, RoleKind::Mafia) => "Vote for the player to eliminate",
        (Phase::Night, SubPhase::Discussion, RoleKind::Sheriff) => "Consider who to investigate",
        (Phase::Night, SubPhase::Decision, RoleKind::Sheriff) => "Name the player to investigate",
        (Phase::Night, SubPhase::Discussion, RoleKind::Doctor) => "Consider who to protect",
        (Phase::Night, SubPhase::Decision, RoleKind::Doctor) => "Name the player to protect",
        (Phase::Night, _, RoleKind::Villager | RoleKind::Unassigned) => "Sleep",
    }
}
