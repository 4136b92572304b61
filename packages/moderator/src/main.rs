use std::io;

use dotenvy::dotenv;
use env_logger::Builder;
use log::{info, LevelFilter};
use mafia_engine::Notify;
use moderator::{Moderator, ModeratorConfig, Opt, Reply, TerminalHost};
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    Builder::new()
        .filter_level(level)
        .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
        .format_target(true)
        .init();
}

fn load_env(opt: &Opt) {
    let loaded = match &opt.env_file {
        Some(path) => dotenvy::from_path(path),
        None => dotenv().map(|_| ()),
    };
    if let Err(e) = loaded {
        eprintln!("Warning: could not load environment file: {}", e);
    }
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    load_env(&opt);
    init_logger(opt.verbose || ModeratorConfig::verbose_from_env());

    let config = ModeratorConfig::from_env();
    info!("Starting moderator with {config:?}");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut host = TerminalHost::new(stdin.lock(), stdout.lock());
    let mut moderator = Moderator::new(config, StdRng::from_entropy());

    host.write_line("Mafia moderator. Type 'help' for commands.")?;
    loop {
        host.prompt("> ")?;
        let Some(line) = host.read_line()? else {
            break;
        };
        match moderator.handle_line(&line, &mut host) {
            Ok(Reply::Text(text)) => host.write_line(&text)?,
            Ok(Reply::Silent) => {}
            Ok(Reply::Quit) => break,
            Err(e) => host.notify("Error", &e.to_string()),
        }
    }
    Ok(())
}
