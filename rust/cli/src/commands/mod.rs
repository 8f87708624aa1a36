//! Command handler modules for the holecard CLI.
//!
//! Each handler takes its parsed arguments plus `out`/`err` streams and
//! returns `Result<(), CliError>`; [`run`](crate::run) maps the result to an
//! exit code.

mod cfg;
mod compare;
mod deal;
mod ev;
mod play;
mod ror;
mod rng;

pub use cfg::handle_cfg_command;
pub use compare::handle_compare_command;
pub use deal::handle_deal_command;
pub use ev::{handle_ev_command, EvArgs};
pub use play::handle_play_command;
pub use ror::{handle_ror_command, RorArgs};
pub use rng::handle_rng_command;

use std::fs;
use std::io::Write;
use std::path::Path;

use holecard_engine::game::{GameRules, Variant};
use holecard_engine::payout::PayoutTable;
use holecard_engine::hole::Granularity;
use holecard_sim::trial::TrialSpec;
use holecard_strategy::StrategyKind;

use crate::cli::TableArgs;
use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;

/// Resolved configuration, reported on `err` when it cannot be loaded.
pub(crate) fn load_config(err: &mut dyn Write) -> Result<Config, CliError> {
    match config::load_with_sources() {
        Ok(resolved) => Ok(resolved.config),
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            Err(e.into())
        }
    }
}

/// Hole information when `--info` is absent: the exact first card for
/// hole-carding strategies, nothing for basic strategy.
pub(crate) fn default_info(kind: StrategyKind) -> Granularity {
    if kind.uses_hole_info() {
        Granularity::ExactCard
    } else {
        Granularity::None
    }
}

/// The hole-carding strategy each game is usually played with.
pub(crate) fn default_challenger(game: Variant) -> StrategyKind {
    match game {
        Variant::ThreeCardPoker => StrategyKind::Holecard,
        Variant::UltimateHoldem => StrategyKind::OneNOne,
    }
}

/// Trial setup for `kind` at the table described by `table`.
pub(crate) fn table_spec(
    table: &TableArgs,
    game: Variant,
    kind: StrategyKind,
    err: &mut dyn Write,
) -> Result<TrialSpec, CliError> {
    let info = match (&table.info, kind.uses_hole_info()) {
        (Some(info), false) if *info != Granularity::None => {
            ui::warn_parameter_unused(err, "info", "basic strategy ignores hole cards")?;
            Granularity::None
        }
        (Some(info), _) => info.clone(),
        (None, _) => default_info(kind),
    };
    let rules = match &table.payouts {
        Some(path) => load_payouts(path, game)?,
        None => GameRules::standard(game),
    };
    let spec = TrialSpec::new(rules, info)?
        .with_peek(kind.uses_peek())?
        .with_partners(table.partners)?;
    Ok(spec)
}

/// Rules for `game` priced by the JSON payout table at `path`.
fn load_payouts(path: &Path, game: Variant) -> Result<GameRules, CliError> {
    let text = fs::read_to_string(path).map_err(|e| {
        CliError::Config(format!("cannot read payout table {}: {}", path.display(), e))
    })?;
    let table = PayoutTable::from_json(&text)?;
    if table.variant != game {
        return Err(CliError::Config(format!(
            "payout table {} is for {}, not {}",
            path.display(),
            table.variant,
            game
        )));
    }
    tracing::debug!(path = %path.display(), "loaded payout table");
    Ok(GameRules::with_payouts(table)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use holecard_engine::hand::Category;
    use holecard_engine::payout::BetType;
    use std::io::Write as _;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn table_with(payouts: Option<PathBuf>) -> TableArgs {
        TableArgs {
            game: Some(Variant::ThreeCardPoker),
            seed: Some(1),
            info: None,
            partners: 0,
            payouts,
        }
    }

    fn payout_file(table: &PayoutTable) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(table).unwrap().as_bytes())
            .unwrap();
        file
    }

    #[test]
    fn custom_payout_table_reaches_the_rules() {
        let mut custom = PayoutTable::standard(Variant::ThreeCardPoker);
        custom.set(Category::Straight, BetType::AnteBonus, 2.0);
        let file = payout_file(&custom);
        let spec = table_spec(
            &table_with(Some(file.path().to_path_buf())),
            Variant::ThreeCardPoker,
            StrategyKind::Holecard,
            &mut Vec::new(),
        )
        .unwrap();
        assert_eq!(
            spec.rules().payouts().payout(Category::Straight, BetType::AnteBonus).unwrap(),
            2.0
        );
    }

    #[test]
    fn payout_table_for_the_other_game_is_rejected() {
        let file = payout_file(&PayoutTable::standard(Variant::UltimateHoldem));
        let result = table_spec(
            &table_with(Some(file.path().to_path_buf())),
            Variant::ThreeCardPoker,
            StrategyKind::Basic,
            &mut Vec::new(),
        );
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("is for uth")));
    }

    #[test]
    fn missing_payout_file_is_a_config_error() {
        let result = table_spec(
            &table_with(Some(PathBuf::from("/nonexistent/payouts.json"))),
            Variant::ThreeCardPoker,
            StrategyKind::Basic,
            &mut Vec::new(),
        );
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("cannot read payout table")));
    }
}
