//! Parallel Monte-Carlo runs.
//!
//! A run is `trials` hands split into fixed-size batches. Trial `i` always
//! deals from seed `base + i` (wrapping), so any scheduling of the batches
//! over the worker pool sees exactly the same hands; only the merge order of
//! the partial aggregates changes.

use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use holecard_engine::errors::{ConfigError, GameError};
use holecard_engine::game::Variant;
use holecard_strategy::Strategy;

use crate::stats::{Aggregate, RunningStats, Tally};
use crate::trial::{run_trial, TrialSpec};

pub const DEFAULT_BATCH_SIZE: u64 = 1_000;

/// How many trials to run and under which limits.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub trials: u64,
    /// Base seed; drawn from the OS when `None`.
    pub seed: Option<u64>,
    pub batch_size: u64,
    /// Worker threads; all cores when `None`.
    pub threads: Option<usize>,
    /// Wall-clock budget measured from the start of the run.
    pub timeout: Option<Duration>,
    /// Standard error above which the report carries a warning.
    pub max_std_err: Option<f64>,
    /// Raised from outside to stop scheduling new batches.
    pub cancel: Arc<AtomicBool>,
}

impl RunPlan {
    pub fn new(trials: u64) -> Self {
        Self {
            trials,
            seed: None,
            batch_size: DEFAULT_BATCH_SIZE,
            threads: None,
            timeout: None,
            max_std_err: None,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_std_err(mut self, max_std_err: Option<f64>) -> Self {
        self.max_std_err = max_std_err;
        self
    }

    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::InvalidPlan("trials must be >= 1".to_string()));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidPlan("batch size must be >= 1".to_string()));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::InvalidPlan("threads must be >= 1".to_string()));
        }
        if let Some(t) = self.max_std_err {
            if !t.is_finite() || t <= 0.0 {
                return Err(ConfigError::InvalidPlan(format!(
                    "standard error threshold must be positive, got {}",
                    t
                )));
            }
        }
        Ok(())
    }

    fn batches(&self) -> Result<impl IndexedParallelIterator<Item = Range<u64>> + '_, ConfigError> {
        let n = usize::try_from(self.trials.div_ceil(self.batch_size)).map_err(|_| {
            ConfigError::InvalidPlan(format!("{} trials is too many batches", self.trials))
        })?;
        Ok((0..n).into_par_iter().map(move |b| {
            let start = b as u64 * self.batch_size;
            start..(start + self.batch_size).min(self.trials)
        }))
    }
}

/// Standard error of the mean exceeded the caller's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticalWarning {
    pub std_err: f64,
    pub threshold: f64,
    pub trials: u64,
}

impl fmt::Display for StatisticalWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "standard error {:.5} exceeds {:.5} after {} trials",
            self.std_err, self.threshold, self.trials
        )
    }
}

/// Summary of one strategy over one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvReport {
    pub game: Variant,
    pub strategy: String,
    pub hole_info: String,
    pub seed: u64,
    pub requested: u64,
    pub completed: u64,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub std_err: f64,
    pub ci95: (f64, f64),
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Mean over every seat when partners play.
    pub team_mean: Option<f64>,
    pub tally: Tally,
    pub elapsed_ms: u64,
    /// Cancelled or out of time before every trial ran.
    pub cut_short: bool,
    pub warning: Option<StatisticalWarning>,
    pub started_at: String,
}

impl EvReport {
    fn build(
        plan: &RunPlan,
        spec: &TrialSpec,
        strategy: &dyn Strategy,
        seed: u64,
        agg: &Aggregate,
        elapsed: Duration,
        started_at: String,
    ) -> Self {
        let net = &agg.net;
        let completed = net.count();
        let warning = plan
            .max_std_err
            .filter(|&t| completed > 0 && net.std_err() > t)
            .map(|threshold| StatisticalWarning {
                std_err: net.std_err(),
                threshold,
                trials: completed,
            });
        if let Some(w) = &warning {
            tracing::warn!(
                strategy = strategy.name(),
                std_err = w.std_err,
                threshold = w.threshold,
                trials = w.trials,
                "EV estimate is noisier than requested"
            );
        }
        Self {
            game: spec.variant(),
            strategy: strategy.name().to_string(),
            hole_info: spec.granularity().to_string(),
            seed,
            requested: plan.trials,
            completed,
            mean: net.mean(),
            variance: net.variance(),
            std_dev: net.std_dev(),
            std_err: net.std_err(),
            ci95: net.ci95(),
            min: net.min(),
            max: net.max(),
            team_mean: (spec.partners() > 0).then(|| agg.team.mean()),
            tally: agg.tally.clone(),
            elapsed_ms: elapsed.as_millis() as u64,
            cut_short: completed < plan.trials,
            warning,
            started_at,
        }
    }
}

pub(crate) fn build_pool(threads: Option<usize>) -> Result<rayon::ThreadPool, ConfigError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or(0))
        .build()
        .map_err(|e| ConfigError::InvalidPlan(format!("failed to create worker pool: {}", e)))
}

struct Driven<A> {
    aggregate: A,
    seed: u64,
    elapsed: Duration,
    started_at: String,
}

/// Runs `per_batch` over every batch of the plan on its own pool and merges
/// the partials. Batches that start after cancellation or the deadline
/// contribute `A::default()`.
fn drive<A, F, M>(plan: &RunPlan, per_batch: F, merge: M) -> Result<Driven<A>, GameError>
where
    A: Default + Send,
    F: Fn(u64, Range<u64>) -> Result<A, GameError> + Sync,
    M: Fn(A, A) -> A + Sync,
{
    plan.validate()?;
    let seed = plan.seed.unwrap_or_else(rand::random);
    let started_at = chrono::Utc::now().to_rfc3339();
    let start = Instant::now();
    let deadline = plan.timeout.map(|t| start + t);
    let pool = build_pool(plan.threads)?;
    let batches = plan.batches()?;
    tracing::debug!(
        trials = plan.trials,
        batch_size = plan.batch_size,
        threads = pool.current_num_threads(),
        seed,
        "starting run"
    );
    let aggregate = pool.install(|| {
        batches
            .map(|range| {
                let expired = deadline.is_some_and(|d| Instant::now() >= d);
                if expired || plan.cancel.load(Ordering::Relaxed) {
                    return Ok(A::default());
                }
                per_batch(seed, range)
            })
            .try_reduce(A::default, |a, b| Ok(merge(a, b)))
    })?;
    Ok(Driven {
        aggregate,
        seed,
        elapsed: start.elapsed(),
        started_at,
    })
}

/// Estimates the EV of `strategy` under `spec`.
///
/// # Errors
///
/// A [`ConfigError`] for an invalid plan, or the first [`GameError`] any
/// trial raises; a failed trial aborts the whole run.
pub fn run(plan: &RunPlan, spec: &TrialSpec, strategy: &dyn Strategy) -> Result<EvReport, GameError> {
    let driven = drive(
        plan,
        |seed, range| {
            let mut agg = Aggregate::default();
            for i in range {
                agg.record(&run_trial(spec, strategy, seed.wrapping_add(i))?);
            }
            Ok(agg)
        },
        Aggregate::merged,
    )?;
    let report = EvReport::build(
        plan,
        spec,
        strategy,
        driven.seed,
        &driven.aggregate,
        driven.elapsed,
        driven.started_at,
    );
    tracing::debug!(
        strategy = %report.strategy,
        completed = report.completed,
        mean = report.mean,
        std_err = report.std_err,
        elapsed_ms = report.elapsed_ms,
        "run finished"
    );
    Ok(report)
}

/// Two strategies played on the same hands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub baseline: EvReport,
    pub challenger: EvReport,
    /// Mean per-hand gain of the challenger over the baseline.
    pub gain: f64,
    /// Standard error of the paired gain.
    pub gain_std_err: f64,
}

#[derive(Default)]
struct Paired {
    baseline: Aggregate,
    challenger: Aggregate,
    gain: RunningStats,
}

/// Runs `baseline` and `challenger` over identical trials.
///
/// Both specs must describe the same variant and seating; they may reveal
/// different hole information.
pub fn compare(
    plan: &RunPlan,
    baseline: (&TrialSpec, &dyn Strategy),
    challenger: (&TrialSpec, &dyn Strategy),
) -> Result<Comparison, GameError> {
    let (base_spec, base) = baseline;
    let (chal_spec, chal) = challenger;
    if base_spec.variant() != chal_spec.variant() || base_spec.partners() != chal_spec.partners() {
        return Err(ConfigError::InvalidPlan(
            "compared strategies must play the same game and seats".to_string(),
        )
        .into());
    }
    let driven = drive(
        plan,
        |seed, range| {
            let mut paired = Paired::default();
            for i in range {
                let s = seed.wrapping_add(i);
                let a = run_trial(base_spec, base, s)?;
                let b = run_trial(chal_spec, chal, s)?;
                paired.gain.push(b.net - a.net);
                paired.baseline.record(&a);
                paired.challenger.record(&b);
            }
            Ok(paired)
        },
        |mut x, y| {
            x.gain.merge(&y.gain);
            Paired {
                baseline: x.baseline.merged(y.baseline),
                challenger: x.challenger.merged(y.challenger),
                gain: x.gain,
            }
        },
    )?;
    let Paired {
        baseline,
        challenger,
        gain,
    } = driven.aggregate;
    let report = |spec: &TrialSpec, strategy: &dyn Strategy, agg: &Aggregate| {
        EvReport::build(
            plan,
            spec,
            strategy,
            driven.seed,
            agg,
            driven.elapsed,
            driven.started_at.clone(),
        )
    };
    Ok(Comparison {
        baseline: report(base_spec, base, &baseline),
        challenger: report(chal_spec, chal, &challenger),
        gain: gain.mean(),
        gain_std_err: gain.std_err(),
    })
}
