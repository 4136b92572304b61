use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameJournal {
    pub entries: Vec<JournalEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub entry_id: String,
    pub kind: JournalKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JournalKind {
    System,        // setup, lock, phase changes, results
    Night,         // night eliminations
    Day,           // day eliminations
    Investigation, // sheriff findings, moderator eyes only
}

impl GameJournal {
    pub fn new() -> Self {
        GameJournal {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, kind: JournalKind, content: impl Into<String>) {
        self.entries.push(JournalEntry::new(kind, content.into()));
    }

    pub fn add_system_message(&mut self, content: impl Into<String>) {
        self.add(JournalKind::System, content);
    }

    pub fn entries_by_kind(&self, kind: JournalKind) -> Vec<&JournalEntry> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl JournalEntry {
    pub fn new(kind: JournalKind, content: String) -> Self {
        JournalEntry {
            entry_id: Uuid::new_v4().to_string(),
            kind,
            content,
            timestamp: Utc::now(),
        }
    }
}
