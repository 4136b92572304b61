use log::{debug, info};
use mafia_engine::{GameError, GameSession, Host, Phase, RoleKind};
use rand::Rng;

use crate::commands::{Command, CommandError, HELP};
use crate::config::ModeratorConfig;

pub const EXIT_TITLE: &str = "Exit";
pub const EXIT_MESSAGE: &str = "Are you sure you want to exit? The game will be lost.";

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Silent,
    Quit,
}

/// Owns the game session and turns parsed commands into session calls.
pub struct Moderator<R> {
    session: GameSession,
    config: ModeratorConfig,
    rng: R,
}

impl<R: Rng> Moderator<R> {
    pub fn new(config: ModeratorConfig, rng: R) -> Self {
        Moderator {
            session: GameSession::new(),
            config,
            rng,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn handle_line<H: Host + ?Sized>(&mut self, line: &str, host: &mut H) -> Result<Reply, CommandError> {
        let command = Command::parse(line)?;
        debug!("Command: {command:?}");
        self.execute(command, host)
    }

    pub fn execute<H: Host + ?Sized>(&mut self, command: Command, host: &mut H) -> Result<Reply, CommandError> {
        let session = &mut self.session;
        let reply = match command {
            Command::Players(count) => {
                session.set_player_count(count)?;
                if self.config.random_roles {
                    session.fill_random_roles(&mut self.rng)?;
                }
                Reply::Text(format!(
                    "{count} players, up to {} mafias",
                    mafia_engine::Roster::max_mafias(count)
                ))
            }
            Command::Mafias(count) => {
                session.set_mafia_count(count)?;
                Reply::Text(format!("{count} mafias"))
            }
            Command::Assign {
                position,
                name,
                role,
            } => {
                session.assign(position, &name, role)?;
                Reply::Text(format!("Seat {position}: {name} ({role})"))
            }
            Command::Rename { position, name } => {
                session.rename(position, &name)?;
                Reply::Text(format!("Seat {position}: {name}"))
            }
            Command::Roles => {
                let roles: Vec<String> = session
                    .available_roles()
                    .iter()
                    .map(RoleKind::to_string)
                    .collect();
                Reply::Text(format!("Available: {}", roles.join(", ")))
            }
            Command::Random => {
                session.fill_random_roles(&mut self.rng)?;
                Reply::Text(self.status())
            }
            Command::Lock => {
                if session.lock_roster(host)? {
                    Reply::Text("Roster locked. Type 'night' to begin.".to_string())
                } else {
                    Reply::Text("Lock cancelled".to_string())
                }
            }
            Command::Reset => {
                session.reset(host);
                Reply::Silent
            }
            Command::Night => {
                let night = session.begin_night()?;
                Reply::Text(format!("Night {night}, part 1"))
            }
            Command::Day => {
                let day = session.begin_day()?;
                let message = session.ledger().day_message();
                Reply::Text(if message.is_empty() {
                    format!("Day {day}, part 1")
                } else {
                    format!("Day {day}, part 1\n{message}")
                })
            }
            Command::Next => {
                let sub_phase = session.advance_subphase()?;
                Reply::Text(format!("Part {}", sub_phase.number()))
            }
            Command::Say { speaker, message } => {
                session.record_dialogue(&speaker, &message)?;
                Reply::Text(session.ledger().dialogues_text())
            }
            Command::Vote { voter, target } => {
                if session.active_phase() == Some(Phase::Night) {
                    let role: RoleKind = voter.parse()?;
                    session.cast_night_vote(role, &target)?;
                } else {
                    session.cast_day_vote(&voter, &target)?;
                }
                Reply::Text(format_votes(session))
            }
            Command::Protect(target) => {
                session.protect(&target)?;
                Reply::Text(format!("Doctor protects {target}"))
            }
            Command::Investigate(target) => Reply::Text(session.investigate(&target)?),
            Command::Resolve => {
                // the session notifies the outcome itself
                match session.active_phase() {
                    Some(Phase::Night) => {
                        session.resolve_night(host)?;
                    }
                    Some(Phase::Day) => {
                        session.resolve_day(host)?;
                    }
                    None => {
                        return Err(GameError::PhaseOrder("No phase is in progress".to_string()).into())
                    }
                }
                Reply::Silent
            }
            Command::Prompt { phase, player } => {
                let text = session.render_prompt(phase, &player)?;
                Reply::Text(preview(&text, self.config.preview_chars))
            }
            Command::Copy { phase, player } => {
                let text = session.copy_prompt(phase, &player, host)?;
                Reply::Text(format!(
                    "Copied {phase} prompt for {player} ({} characters)",
                    text.chars().count()
                ))
            }
            Command::Status => Reply::Text(self.status()),
            Command::State => Reply::Text(session.snapshot().to_json()?),
            Command::History => Reply::Text(self.history()),
            Command::Help => Reply::Text(HELP.to_string()),
            Command::Quit => {
                if host.confirm(EXIT_TITLE, EXIT_MESSAGE) {
                    info!("Moderator exiting");
                    Reply::Quit
                } else {
                    Reply::Silent
                }
            }
        };
        Ok(reply)
    }

    /// Seat table sized by the configured width and column ratios.
    pub fn status(&self) -> String {
        let [seat_w, name_w, role_w] = self.config.column_widths();
        let roster = self.session.roster();
        let clock = self.session.clock();

        let mut lines = vec![
            format!("{:<seat_w$}{:<name_w$}{:<role_w$}", "Seat", "Name", "Role"),
            "-".repeat(seat_w + name_w + role_w),
        ];
        for (i, player) in roster.players().iter().enumerate() {
            let role = if self.config.show_roles {
                player.role.to_string()
            } else {
                "?".to_string()
            };
            lines.push(format!(
                "{:<seat_w$}{:<name_w$}{:<role_w$}",
                i + 1,
                truncate(&player.name, name_w.saturating_sub(1)),
                role
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "Players: {}  Mafias: {}  Locked: {}",
            roster.total_players(),
            roster.total_mafias(),
            if roster.is_locked() { "yes" } else { "no" }
        ));
        if roster.is_locked() {
            let phase = match self.session.active_phase() {
                Some(phase) => format!(
                    "{phase} {} part {}",
                    clock.number(phase),
                    clock.sub_phase(phase).number()
                ),
                None => "between phases".to_string(),
            };
            lines.push(format!(
                "Now: {phase}  Town left: {}  Mafia left: {}",
                roster.players_left(),
                roster.mafias_left()
            ));
            if !roster.eliminated().is_empty() {
                lines.push(format!("Eliminated: {}", roster.eliminated().join(", ")));
            }
            lines.push(self.session.result().to_string());
        }
        lines.join("\n")
    }

    fn history(&self) -> String {
        let entries = &self.session.journal().entries;
        if entries.is_empty() {
            return "Nothing has happened yet".to_string();
        }
        entries
            .iter()
            .map(|e| {
                format!(
                    "{} [{:?}] {}",
                    e.timestamp.format("%H:%M:%S"),
                    e.kind,
                    e.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn format_votes(session: &GameSession) -> String {
    let ranked = session.ledger().ranked_votes();
    if ranked.is_empty() {
        return "No votes".to_string();
    }
    ranked
        .iter()
        .map(|(name, count)| format!("{name}: {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// First `limit` characters followed by `...` when the text is longer.
pub fn preview(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{cut}...")
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_cuts_long_text() {
        assert_eq!(preview("short", 250), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
    }
}
