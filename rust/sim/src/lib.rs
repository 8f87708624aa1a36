//! # holecard-sim: Monte-Carlo Evaluation
//!
//! Plays strategies over large numbers of independently seeded hands and
//! reports expected value with its uncertainty.
//!
//! ## Core Modules
//!
//! - [`trial`] - One hand: deal, reveal hole information, decide, settle
//! - [`stats`] - Welford accumulators and outcome tallies that merge across workers
//! - [`runner`] - Batched parallel runs with cancellation, deadlines and paired comparisons
//! - [`practice`] - Step-by-step hands for interactive practice
//! - [`ruin`] - Bankroll risk of ruin
//!
//! ## Quick Start
//!
//! ```rust
//! use holecard_engine::game::{GameRules, Variant};
//! use holecard_engine::hole::Granularity;
//! use holecard_sim::runner::{run, RunPlan};
//! use holecard_sim::trial::TrialSpec;
//! use holecard_strategy::{create_strategy, RangePolicy, StrategyKind};
//!
//! let rules = GameRules::standard(Variant::ThreeCardPoker);
//! let spec = TrialSpec::new(rules.clone(), Granularity::ExactCard).unwrap();
//! let strategy = create_strategy(&rules, StrategyKind::Holecard, RangePolicy::default()).unwrap();
//!
//! let plan = RunPlan::new(2_000).with_seed(Some(42));
//! let report = run(&plan, &spec, strategy.as_ref()).unwrap();
//! assert_eq!(report.completed, 2_000);
//! assert!(report.ci95.0 <= report.mean && report.mean <= report.ci95.1);
//! ```

use holecard_engine::errors::GameError;
use holecard_engine::game::{GameRules, Variant};
use holecard_engine::hole::Granularity;
use holecard_strategy::{create_strategy, RangePolicy, StrategyKind};

pub mod practice;
pub mod ruin;
pub mod runner;
pub mod stats;
pub mod trial;

use runner::{run, RunPlan};
use trial::TrialSpec;

fn mean_and_std_err(
    game: Variant,
    kind: StrategyKind,
    granularity: Granularity,
    trials: u64,
    seed: u64,
) -> Result<(f64, f64), GameError> {
    let rules = GameRules::standard(game);
    let spec = TrialSpec::new(rules.clone(), granularity)?.with_peek(kind.uses_peek())?;
    let strategy = create_strategy(&rules, kind, RangePolicy::default())?;
    let report = run(&RunPlan::new(trials).with_seed(Some(seed)), &spec, strategy.as_ref())?;
    Ok((report.mean, report.std_err))
}

/// Mean and standard error of hole-carding with the dealer's first card
/// known; hold'em also sees the flashed first flop card.
pub fn calculate_holecarding_ev(
    game: Variant,
    trials: u64,
    seed: u64,
) -> Result<(f64, f64), GameError> {
    let kind = match game {
        Variant::ThreeCardPoker => StrategyKind::Holecard,
        Variant::UltimateHoldem => StrategyKind::OneNOne,
    };
    mean_and_std_err(game, kind, Granularity::ExactCard, trials, seed)
}

/// Mean and standard error of basic strategy.
pub fn calculate_basic_strategy_ev(
    game: Variant,
    trials: u64,
    seed: u64,
) -> Result<(f64, f64), GameError> {
    mean_and_std_err(game, StrategyKind::Basic, Granularity::None, trials, seed)
}
