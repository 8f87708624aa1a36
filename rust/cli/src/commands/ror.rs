//! Risk of ruin for a bankroll measured in antes.

use std::io::Write;

use holecard_sim::ruin::{risk_of_ruin, RuinPlan};
use holecard_strategy::{create_strategy, RangePolicy, StrategyKind};

use crate::cli::TableArgs;
use crate::commands::{load_config, table_spec};
use crate::error::CliError;
use crate::formatters::format_ruin;
use crate::io_utils::write_json;

#[derive(Debug, Clone)]
pub struct RorArgs {
    pub table: TableArgs,
    pub strategy: StrategyKind,
    pub bankroll: f64,
    pub runs: u64,
    pub max_hands: Option<u64>,
    pub team: bool,
    pub threads: Option<usize>,
    pub json: bool,
}

/// Handle the ror command.
pub fn handle_ror_command(
    args: RorArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = load_config(err)?;
    let game = args.table.game.unwrap_or(cfg.game);
    let spec = table_spec(&args.table, game, args.strategy, err)?;
    let strategy = create_strategy(spec.rules(), args.strategy, RangePolicy::default())?;

    let mut plan = RuinPlan::new(args.bankroll, args.runs);
    plan.seed = args.table.seed.or(cfg.seed);
    plan.threads = args.threads.or(cfg.threads);
    plan.team = args.team;
    if let Some(limit) = args.max_hands {
        plan.max_hands = limit;
    }

    let report = risk_of_ruin(&plan, &spec, strategy.as_ref())?;
    if args.json {
        write_json(out, &report)?;
    } else {
        writeln!(out, "{}", format_ruin(&report))?;
    }
    Ok(())
}
