use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "moderator", about = "terminal moderator for a game of Mafia.")]
pub struct Opt {
    /// dotenv file to load instead of ./.env
    #[structopt(long, parse(from_os_str))]
    pub env_file: Option<PathBuf>,
    /// log at debug level
    #[structopt(long)]
    pub verbose: bool,
}
