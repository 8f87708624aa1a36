//! Basic strategy against hole-carding, paired on the same hands.

use std::io::Write;

use holecard_sim::runner::{compare, RunPlan};
use holecard_strategy::{create_strategy, RangePolicy, StrategyKind};

use crate::cli::TableArgs;
use crate::commands::{default_challenger, load_config, table_spec};
use crate::error::CliError;
use crate::formatters::format_comparison;
use crate::io_utils::write_json;

/// Handle the compare command.
///
/// The baseline always plays basic strategy without hole information; the
/// challenger sees what `--info` reveals (the exact first card by default).
#[allow(clippy::too_many_arguments)]
pub fn handle_compare_command(
    table: TableArgs,
    challenger: Option<StrategyKind>,
    trials: Option<u64>,
    range_policy: RangePolicy,
    threads: Option<usize>,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = load_config(err)?;
    let game = table.game.unwrap_or(cfg.game);
    let kind = challenger.unwrap_or_else(|| default_challenger(game));
    if kind == StrategyKind::Basic {
        return Err(CliError::InvalidInput(
            "challenger must be a hole-carding strategy".to_string(),
        ));
    }

    let base_table = TableArgs {
        info: None,
        ..table.clone()
    };
    let base_spec = table_spec(&base_table, game, StrategyKind::Basic, err)?;
    let chal_spec = table_spec(&table, game, kind, err)?;
    let base = create_strategy(base_spec.rules(), StrategyKind::Basic, range_policy)?;
    let chal = create_strategy(chal_spec.rules(), kind, range_policy)?;

    let plan = RunPlan::new(trials.unwrap_or(cfg.trials))
        .with_seed(table.seed.or(cfg.seed))
        .with_threads(threads.or(cfg.threads));
    let cmp = compare(
        &plan,
        (&base_spec, base.as_ref()),
        (&chal_spec, chal.as_ref()),
    )?;

    if json {
        write_json(out, &cmp)?;
    } else {
        writeln!(out, "{}", format_comparison(&cmp))?;
    }
    Ok(())
}
