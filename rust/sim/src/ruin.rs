//! Risk of ruin: how often a bankroll busts before it doubles.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use holecard_engine::errors::{ConfigError, GameError};
use holecard_strategy::Strategy;

use crate::runner::build_pool;
use crate::trial::{run_trial, TrialSpec};

#[derive(Debug, Clone, PartialEq)]
pub struct RuinPlan {
    /// Starting bankroll in antes.
    pub bankroll: f64,
    pub runs: u64,
    pub seed: Option<u64>,
    /// Hands after which an undecided run is abandoned.
    pub max_hands: u64,
    pub threads: Option<usize>,
    /// Bankroll moves with every seat's result, not just the main seat's.
    pub team: bool,
}

impl RuinPlan {
    pub fn new(bankroll: f64, runs: u64) -> Self {
        Self {
            bankroll,
            runs,
            seed: None,
            max_hands: 1_000_000,
            threads: None,
            team: false,
        }
    }

    pub fn validate(&self, spec: &TrialSpec) -> Result<(), ConfigError> {
        if !self.bankroll.is_finite() || self.bankroll <= 0.0 {
            return Err(ConfigError::InvalidPlan(format!(
                "bankroll must be positive, got {}",
                self.bankroll
            )));
        }
        if self.runs == 0 || self.max_hands == 0 {
            return Err(ConfigError::InvalidPlan(
                "runs and max hands must be >= 1".to_string(),
            ));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::InvalidPlan("threads must be >= 1".to_string()));
        }
        if self.team && spec.partners() == 0 {
            return Err(ConfigError::InvalidPlan(
                "team bankroll needs at least one partner".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Outcomes {
    ruined: u64,
    doubled: u64,
    unfinished: u64,
    hands: u64,
}

impl Outcomes {
    fn merged(self, other: Outcomes) -> Outcomes {
        Outcomes {
            ruined: self.ruined + other.ruined,
            doubled: self.doubled + other.doubled,
            unfinished: self.unfinished + other.unfinished,
            hands: self.hands + other.hands,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuinReport {
    pub bankroll: f64,
    pub runs: u64,
    pub seed: u64,
    pub team: bool,
    pub ruined: u64,
    pub doubled: u64,
    /// Runs still undecided at the hand limit.
    pub unfinished: u64,
    /// Fraction of runs that went broke.
    pub risk: f64,
    pub mean_hands: f64,
}

fn play_run(
    plan: &RuinPlan,
    spec: &TrialSpec,
    strategy: &dyn Strategy,
    seed: u64,
) -> Result<Outcomes, GameError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let target = plan.bankroll * 2.0;
    let mut bank = plan.bankroll;
    let mut outcome = Outcomes::default();
    while outcome.hands < plan.max_hands {
        let result = run_trial(spec, strategy, rng.random())?;
        bank += if plan.team { result.team_net } else { result.net };
        outcome.hands += 1;
        if bank <= 0.0 {
            outcome.ruined = 1;
            return Ok(outcome);
        }
        if bank >= target {
            outcome.doubled = 1;
            return Ok(outcome);
        }
    }
    outcome.unfinished = 1;
    Ok(outcome)
}

/// Plays `plan.runs` independent bankrolls until each doubles or busts.
///
/// Run `r` draws its hand seeds from a ChaCha20 stream seeded with
/// `seed + r`, so the estimate does not depend on the thread count.
pub fn risk_of_ruin(
    plan: &RuinPlan,
    spec: &TrialSpec,
    strategy: &dyn Strategy,
) -> Result<RuinReport, GameError> {
    plan.validate(spec)?;
    let seed = plan.seed.unwrap_or_else(rand::random);
    let pool = build_pool(plan.threads)?;
    tracing::debug!(bankroll = plan.bankroll, runs = plan.runs, team = plan.team, seed, "starting risk of ruin");
    let total = pool.install(|| {
        (0..plan.runs)
            .into_par_iter()
            .map(|r| play_run(plan, spec, strategy, seed.wrapping_add(r)))
            .try_reduce(Outcomes::default, |a, b| Ok(a.merged(b)))
    })?;
    let report = RuinReport {
        bankroll: plan.bankroll,
        runs: plan.runs,
        seed,
        team: plan.team,
        ruined: total.ruined,
        doubled: total.doubled,
        unfinished: total.unfinished,
        risk: total.ruined as f64 / plan.runs as f64,
        mean_hands: total.hands as f64 / plan.runs as f64,
    };
    tracing::debug!(risk = report.risk, mean_hands = report.mean_hands, "risk of ruin finished");
    Ok(report)
}
