use std::{path::PathBuf, process};

use anyhow::Context as _;
use clap::Parser;
use rand::Rng as _;
use scratch_engine::{GameConfig, RoundSeed};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::util;

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Path to the game configuration file (JSON format)
    #[arg(short, long)]
    config: PathBuf,
    /// Amount bet on each round
    #[arg(short, long, value_parser = parse_betting_amount)]
    betting_amount: f64,
    /// Seed for grid generation, as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<RoundSeed>,
    /// Number of rounds to play; more than one prints a payout summary
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    rounds: u64,
    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run() -> anyhow::Result<()> {
    let args = parse_args();
    init_logging();

    let config: GameConfig = util::read_json_file("configuration", &args.config)?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration file: {}", args.config.display()))?;

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!(%seed, rounds = args.rounds, "starting game");

    if args.rounds == 1 {
        play::run(&config, seed, args.betting_amount, args.output)
    } else {
        simulate::run(&config, seed, args.betting_amount, args.rounds, args.output)
    }
}

/// Parses the command line, exiting with status 1 on invalid arguments.
fn parse_args() -> CommandArgs {
    CommandArgs::try_parse().unwrap_or_else(|err| {
        if !err.use_stderr() {
            // --help and --version
            err.exit();
        }
        err.print().ok();
        process::exit(1)
    })
}

/// Logs to stderr so stdout only carries the JSON report.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_betting_amount(s: &str) -> Result<f64, String> {
    let amount: f64 = s
        .parse()
        .map_err(|e| format!("'{s}' is not a number: {e}"))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(format!("betting amount must be positive, got {s}"));
    }
    Ok(amount)
}
