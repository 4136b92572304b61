use mafia_engine::{
    error::GameError,
    models::role::UnknownRole,
    services::prompt::{PromptPhase, UnknownPromptPhase},
    RoleKind,
};

pub const HELP: &str = "\
setup:
  players N                 set the number of players (4-11)
  mafias M                  set the number of mafias
  assign POS NAME ROLE      seat NAME with ROLE (villager, mafia, sheriff, doctor)
  rename POS NAME           change a seat's name, keep its role
  roles                     roles still available
  random                    fill open seats with random roles
  lock                      lock the roster and start the game
  reset                     start over
game:
  night | day               open the next night or day
  next                      move from discussion to decision
  say NAME MESSAGE...       record what a player said (mafia only at night)
  vote VOTER TARGET         night: VOTER is a role, day: a player
  protect NAME              doctor's save for tonight
  investigate NAME          sheriff's check for tonight
  resolve                   close the open phase
prompts:
  prompt PHASE NAME         preview a prompt (initial, night, day, investigation, results)
  copy PHASE NAME           copy the full prompt
info:
  status | state | history | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Players(usize),
    Mafias(usize),
    Assign {
        position: usize,
        name: String,
        role: RoleKind,
    },
    Rename {
        position: usize,
        name: String,
    },
    Roles,
    Random,
    Lock,
    Reset,
    Night,
    Day,
    Next,
    Say {
        speaker: String,
        message: String,
    },
    Vote {
        voter: String,
        target: String,
    },
    Protect(String),
    Investigate(String),
    Resolve,
    Prompt {
        phase: PromptPhase,
        player: String,
    },
    Copy {
        phase: PromptPhase,
        player: String,
    },
    Status,
    State,
    History,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Type a command, or 'help'")]
    Empty,

    #[error("Unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error(transparent)]
    Role(#[from] UnknownRole),

    #[error(transparent)]
    PromptPhase(#[from] UnknownPromptPhase),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Could not serialize the game state: {0}")]
    Snapshot(#[from] serde_json::Error),
}

fn number(raw: &str) -> Result<usize, CommandError> {
    raw.parse::<usize>()
        .map_err(|_| CommandError::NotANumber(raw.to_string()))
}

fn rest(words: &[&str], usage: &'static str) -> Result<String, CommandError> {
    if words.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    Ok(words.join(" "))
}

impl Command {
    /// Parses one input line. Names may contain spaces wherever they are the
    /// last argument; `assign` takes the role from the last word.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let (keyword, args) = match words.split_first() {
            Some((keyword, args)) => (keyword.to_lowercase(), args),
            None => return Err(CommandError::Empty),
        };

        let command = match (keyword.as_str(), args) {
            ("players", [n]) => Command::Players(number(n)?),
            ("players", _) => return Err(CommandError::Usage("players N")),
            ("mafias", [m]) => Command::Mafias(number(m)?),
            ("mafias", _) => return Err(CommandError::Usage("mafias M")),
            ("assign", [position, name @ .., role]) if !name.is_empty() => Command::Assign {
                position: number(position)?,
                name: name.join(" "),
                role: role.parse()?,
            },
            ("assign", _) => return Err(CommandError::Usage("assign POS NAME ROLE")),
            ("rename", [position, name @ ..]) => Command::Rename {
                position: number(position)?,
                name: rest(name, "rename POS NAME")?,
            },
            ("rename", _) => return Err(CommandError::Usage("rename POS NAME")),
            ("roles", []) => Command::Roles,
            ("random", []) => Command::Random,
            ("lock", []) => Command::Lock,
            ("reset", []) => Command::Reset,
            ("night", []) => Command::Night,
            ("day", []) => Command::Day,
            ("next", []) => Command::Next,
            ("say", [speaker, message @ ..]) => Command::Say {
                speaker: speaker.to_string(),
                message: rest(message, "say NAME MESSAGE")?,
            },
            ("say", _) => return Err(CommandError::Usage("say NAME MESSAGE")),
            ("vote", [voter, target @ ..]) => Command::Vote {
                voter: voter.to_string(),
                target: rest(target, "vote VOTER TARGET")?,
            },
            ("vote", _) => return Err(CommandError::Usage("vote VOTER TARGET")),
            ("protect", name) => Command::Protect(rest(name, "protect NAME")?),
            ("investigate", name) => Command::Investigate(rest(name, "investigate NAME")?),
            ("resolve", []) => Command::Resolve,
            ("prompt", [phase, player @ ..]) => Command::Prompt {
                phase: phase.parse()?,
                player: rest(player, "prompt PHASE NAME")?,
            },
            ("copy", [phase, player @ ..]) => Command::Copy {
                phase: phase.parse()?,
                player: rest(player, "copy PHASE NAME")?,
            },
            ("prompt", _) | ("copy", _) => return Err(CommandError::Usage("prompt|copy PHASE NAME")),
            ("status", []) => Command::Status,
            ("state", []) => Command::State,
            ("history", []) => Command::History,
            ("help", _) => Command::Help,
            ("quit", []) | ("exit", []) => Command::Quit,
            (other, _) => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_takes_role_from_last_word() {
        assert_eq!(
            Command::parse("assign 2 Mary Ann doctor").unwrap(),
            Command::Assign {
                position: 2,
                name: "Mary Ann".to_string(),
                role: RoleKind::Doctor,
            }
        );
        assert!(matches!(
            Command::parse("assign 2 doctor"),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(
            Command::parse("assign 2 bob wizard"),
            Err(CommandError::Role(_))
        ));
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(Command::parse("NIGHT").unwrap(), Command::Night);
        assert_eq!(
            Command::parse("Prompt results alice").unwrap(),
            Command::Prompt {
                phase: PromptPhase::NightResult,
                player: "alice".to_string(),
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(Command::parse("   "), Err(CommandError::Empty)));
        assert!(matches!(
            Command::parse("players four"),
            Err(CommandError::NotANumber(_))
        ));
        assert!(matches!(
            Command::parse("dance"),
            Err(CommandError::Unknown(_))
        ));
        assert!(matches!(
            Command::parse("say alice"),
            Err(CommandError::Usage(_))
        ));
    }
}
