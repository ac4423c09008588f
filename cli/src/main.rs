use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sapper_core::{CellCount, Coord, UserIdentity};

mod command;
mod host;
mod render;
mod settings;

use command::{Command, HELP};
use host::Host;
use settings::{Overrides, Settings};

#[derive(Parser, Debug)]
#[command(version, about = "Seeded minefield wager game for the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with default settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Side length of the square board
    #[arg(long)]
    grid_size: Option<Coord>,

    /// Mines per round
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Stake per round
    #[arg(short, long)]
    stake: Option<f64>,

    /// Starting balance
    #[arg(short, long)]
    balance: Option<f64>,

    /// User id to put in round seeds, random if not given
    #[arg(short, long)]
    user: Option<String>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            grid_size: self.grid_size,
            mines: self.mines,
            stake: self.stake,
            balance: self.balance,
            user: self.user.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let settings = Settings::resolve(args.config.as_deref(), args.overrides())?;
    log::debug!("settings: {:?}", settings);

    let identity = UserIdentity::resolve(settings.user.as_deref(), &mut rand::rng());
    let mut host = Host::new(settings, identity);

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    writeln!(out, "{HELP}")?;

    for line in stdin.lock().lines() {
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => host.execute(command, &mut out)?,
            Err(err) => writeln!(out, "{err:#}")?,
        }
        out.flush()?;
    }

    log::debug!("exiting with balance {}", host.session().balance());
    Ok(())
}
