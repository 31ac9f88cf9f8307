mod cli;
mod commands;
mod logging;

use std::{env, process};

use anyhow::{Context, Result};
use clap::Parser;
use kalendar_config::KalendarConfig;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = env::current_dir().context("failed to read working directory")?;
    let config = KalendarConfig::resolve(cli.config.as_deref(), &cwd)
        .context("failed to load configuration")?;

    match cli.command {
        Command::Parse(args) => commands::parse(&config, args),
        Command::Fasts(args) => commands::fasts(&config, args),
        Command::Moon(args) => commands::moon(&config, args),
        Command::Convert(args) => commands::convert(&config, args),
        Command::Month(args) => commands::month(args),
        Command::Phase(args) => commands::phase(&config, args),
    }
}
