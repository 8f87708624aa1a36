//! Command-line argument types for the `holecard` binary.
//!
//! Every subcommand shares [`TableArgs`]; game, seed, trials and threads left
//! off the command line fall back to the resolved configuration.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use holecard_engine::game::Variant;
use holecard_engine::hole::Granularity;
use holecard_strategy::{RangePolicy, StrategyKind};

#[derive(Parser, Debug)]
#[command(
    name = "holecard",
    version,
    about = "Hole-carding EV simulator for three card poker and ultimate texas hold'em"
)]
pub struct HolecardCli {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG wins when set
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

/// Table setup shared by every game-playing command.
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Game variant: ocp or uth
    #[arg(long)]
    pub game: Option<Variant>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Hole information revealed: none, card, rank, bands[:2-J/Q-A] or full
    #[arg(long)]
    pub info: Option<Granularity>,
    /// Partner seats whose cards the main seat sees (hold'em only)
    #[arg(long, default_value_t = 0)]
    pub partners: usize,
    /// JSON payout table replacing the standard one
    #[arg(long, value_name = "FILE")]
    pub payouts: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate the EV of one strategy
    Ev {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long, default_value = "basic")]
        strategy: StrategyKind,
        #[arg(long)]
        trials: Option<u64>,
        /// How ranges that disagree are resolved: expectation or minimax
        #[arg(long, default_value = "expectation")]
        range_policy: RangePolicy,
        #[arg(long)]
        threads: Option<usize>,
        #[arg(long)]
        batch_size: Option<u64>,
        /// Warn when the standard error ends above this
        #[arg(long = "max-stderr")]
        max_stderr: Option<f64>,
        #[arg(long)]
        timeout_secs: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// Basic strategy against hole-carding on the same hands
    Compare {
        #[command(flatten)]
        table: TableArgs,
        /// Defaults to holecard for ocp and ono for uth
        #[arg(long)]
        challenger: Option<StrategyKind>,
        #[arg(long)]
        trials: Option<u64>,
        #[arg(long, default_value = "expectation")]
        range_policy: RangePolicy,
        #[arg(long)]
        threads: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Practice hands over stdin with a strategy as coach
    Play {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long)]
        hands: Option<u32>,
        /// Strategy the decisions are graded against
        #[arg(long)]
        coach: Option<StrategyKind>,
    },
    /// Deal one hand and show what the strategy does on every street
    Deal {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long)]
        strategy: Option<StrategyKind>,
        #[arg(long)]
        json: bool,
    },
    /// Risk of ruin for a bankroll measured in antes
    Ror {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long, default_value = "basic")]
        strategy: StrategyKind,
        #[arg(long, default_value_t = 100.0)]
        bankroll: f64,
        #[arg(long, default_value_t = 1_000)]
        runs: u64,
        #[arg(long)]
        max_hands: Option<u64>,
        /// Bankroll follows every seat's result
        #[arg(long)]
        team: bool,
        #[arg(long)]
        threads: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Print a sample of the seeded random stream
    Rng {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Ev { .. } => "ev",
            Commands::Compare { .. } => "compare",
            Commands::Play { .. } => "play",
            Commands::Deal { .. } => "deal",
            Commands::Ror { .. } => "ror",
            Commands::Rng { .. } => "rng",
            Commands::Cfg => "cfg",
        }
    }
}
