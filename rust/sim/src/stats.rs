//! Streaming mean/variance and outcome counts that merge across workers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use holecard_engine::hand::Category;
use holecard_engine::rules::{Action, Street};

use crate::trial::TrialResult;

/// Two-sided 95% normal quantile.
pub const Z_95: f64 = 1.96;

/// Welford accumulator.
///
/// Partials built on disjoint samples combine with [`merge`](Self::merge) to
/// the same moments as a single pass over the union, up to rounding.
///
/// ```rust
/// use holecard_sim::stats::RunningStats;
///
/// let mut left = RunningStats::new();
/// let mut right = RunningStats::new();
/// for x in [1.0, 2.0] { left.push(x); }
/// for x in [3.0, 4.0] { right.push(x); }
/// left.merge(&right);
/// assert_eq!(left.count(), 4);
/// assert!((left.mean() - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningStats {
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    /// Chan et al. pairwise combination.
    pub fn merge(&mut self, other: &RunningStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;
        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance; zero below two samples.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn std_err(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.std_dev() / (self.count as f64).sqrt()
        }
    }

    pub fn ci95(&self) -> (f64, f64) {
        let half = Z_95 * self.std_err();
        (self.mean - half, self.mean + half)
    }

    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }
}

/// How often each committing action, street and final category occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub actions: BTreeMap<Action, u64>,
    pub streets: BTreeMap<Street, u64>,
    pub categories: BTreeMap<Category, u64>,
}

impl Tally {
    pub fn record(&mut self, result: &TrialResult) {
        *self.actions.entry(result.action).or_default() += 1;
        *self.streets.entry(result.street).or_default() += 1;
        *self.categories.entry(result.category).or_default() += 1;
    }

    pub fn merge(&mut self, other: &Tally) {
        fn add<K: Ord + Copy>(into: &mut BTreeMap<K, u64>, from: &BTreeMap<K, u64>) {
            for (k, v) in from {
                *into.entry(*k).or_default() += v;
            }
        }
        add(&mut self.actions, &other.actions);
        add(&mut self.streets, &other.streets);
        add(&mut self.categories, &other.categories);
    }

    pub fn total(&self) -> u64 {
        self.actions.values().sum()
    }
}

/// Everything one batch of trials contributes to a report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    pub net: RunningStats,
    pub team: RunningStats,
    pub tally: Tally,
}

impl Aggregate {
    pub fn record(&mut self, result: &TrialResult) {
        self.net.push(result.net);
        self.team.push(result.team_net);
        self.tally.record(result);
    }

    pub fn merged(mut self, other: Aggregate) -> Aggregate {
        self.net.merge(&other.net);
        self.team.merge(&other.team);
        self.tally.merge(&other.tally);
        self
    }
}
