pub mod collaborators;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;

pub use collaborators::{Clipboard, Confirm, Host, Notify};
pub use error::{GameError, QuotaViolation, Result};
pub use models::{
    clock::{Phase, PhaseClock, SubPhase},
    journal::{GameJournal, JournalEntry, JournalKind},
    ledger::{DeliberationLedger, Verdict, VoteOutcome, Voter},
    player::Player,
    role::RoleKind,
    roster::Roster,
};
pub use services::{
    prompt::{PromptCatalog, PromptContext, PromptPhase},
    win::GameResult,
};
pub use session::{GameSession, SessionSnapshot};
