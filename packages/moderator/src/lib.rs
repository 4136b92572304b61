pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod host;

pub use app::{Moderator, Reply};
pub use cli::Opt;
pub use config::{ConfigError, ModeratorConfig};
pub use host::TerminalHost;
