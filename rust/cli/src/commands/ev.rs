//! EV estimate for one strategy.
//!
//! Runs the strategy over `--trials` seeded hands and prints the mean net
//! result per ante with its standard error and 95% interval, either as text
//! or (`--json`) as the serialized report.

use std::io::Write;
use std::time::Duration;

use holecard_engine::game::Variant;
use holecard_sim::runner::{run, EvReport, RunPlan};
use holecard_strategy::{create_strategy, RangePolicy, StrategyKind};

use crate::cli::TableArgs;
use crate::commands::{load_config, table_spec};
use crate::error::CliError;
use crate::formatters::format_report;
use crate::io_utils::write_json;
use crate::ui;

#[derive(Debug, Clone)]
pub struct EvArgs {
    pub table: TableArgs,
    pub strategy: StrategyKind,
    pub trials: Option<u64>,
    pub range_policy: RangePolicy,
    pub threads: Option<usize>,
    pub batch_size: Option<u64>,
    pub max_stderr: Option<f64>,
    pub timeout_secs: Option<u64>,
    pub json: bool,
}

/// Handle the ev command.
///
/// # Errors
///
/// `CliError::Config` for settings the simulator rejects,
/// `CliError::Engine` when a trial fails and `CliError::Interrupted` after
/// printing a partial report when `--timeout-secs` expires first.
pub fn handle_ev_command(
    args: EvArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = load_config(err)?;
    let game: Variant = args.table.game.unwrap_or(cfg.game);
    let spec = table_spec(&args.table, game, args.strategy, err)?;
    let strategy = create_strategy(spec.rules(), args.strategy, args.range_policy)?;

    let mut plan = RunPlan::new(args.trials.unwrap_or(cfg.trials))
        .with_seed(args.table.seed.or(cfg.seed))
        .with_threads(args.threads.or(cfg.threads))
        .with_max_std_err(args.max_stderr)
        .with_timeout(args.timeout_secs.map(Duration::from_secs));
    if let Some(size) = args.batch_size {
        plan = plan.with_batch_size(size);
    }

    let report = run(&plan, &spec, strategy.as_ref())?;
    write_report(&report, args.json, out, err)?;
    if report.cut_short {
        return Err(CliError::Interrupted(format!(
            "stopped after {}/{} trials",
            report.completed, report.requested
        )));
    }
    Ok(())
}

pub(crate) fn write_report(
    report: &EvReport,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if json {
        write_json(out, report)?;
    } else {
        writeln!(out, "{}", format_report(report))?;
    }
    if let Some(w) = &report.warning {
        ui::display_warning(err, &w.to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use holecard_engine::hole::Granularity;
    use serial_test::serial;

    fn args(game: Variant, strategy: StrategyKind) -> EvArgs {
        EvArgs {
            table: TableArgs {
                game: Some(game),
                seed: Some(42),
                info: None,
                partners: 0,
                payouts: None,
            },
            strategy,
            trials: Some(400),
            range_policy: RangePolicy::default(),
            threads: Some(2),
            batch_size: Some(100),
            max_stderr: None,
            timeout_secs: None,
            json: true,
        }
    }

    #[test]
    #[serial]
    fn json_report_is_reproducible() {
        let run_once = || {
            let mut out = Vec::new();
            let mut err = Vec::new();
            handle_ev_command(
                args(Variant::ThreeCardPoker, StrategyKind::Holecard),
                &mut out,
                &mut err,
            )
            .unwrap();
            serde_json::from_slice::<EvReport>(&out).unwrap()
        };
        let a = run_once();
        let b = run_once();
        assert_eq!(a.completed, 400);
        assert_eq!(a.hole_info, "card");
        assert_eq!(a.mean, b.mean);
        assert_eq!(a.std_err, b.std_err);
    }

    #[test]
    #[serial]
    fn info_is_ignored_for_basic_strategy() {
        let mut a = args(Variant::ThreeCardPoker, StrategyKind::Basic);
        a.table.info = Some(Granularity::Full);
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_ev_command(a, &mut out, &mut err).unwrap();
        let report: EvReport = serde_json::from_slice(&out).unwrap();
        assert_eq!(report.hole_info, "none");
        assert!(String::from_utf8(err).unwrap().contains("--info is ignored"));
    }

    #[test]
    #[serial]
    fn tight_threshold_warns_on_stderr() {
        let mut a = args(Variant::ThreeCardPoker, StrategyKind::Basic);
        a.max_stderr = Some(1e-6);
        a.json = false;
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_ev_command(a, &mut out, &mut err).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("EV per ante"));
        assert!(String::from_utf8(err).unwrap().starts_with("WARNING: standard error"));
    }

    #[test]
    #[serial]
    fn peeking_is_rejected_for_three_card() {
        let a = args(Variant::ThreeCardPoker, StrategyKind::OneNOne);
        let result = handle_ev_command(a, &mut Vec::new(), &mut Vec::new());
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
