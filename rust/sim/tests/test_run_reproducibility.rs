use holecard_engine::game::{GameRules, Variant};
use holecard_engine::hole::Granularity;
use holecard_sim::runner::{run, EvReport, RunPlan};
use holecard_sim::trial::{run_trial, TrialSpec};
use holecard_strategy::{create_strategy, RangePolicy, Strategy, StrategyKind};

fn setup(variant: Variant, kind: StrategyKind, granularity: Granularity) -> (TrialSpec, Box<dyn Strategy>) {
    let rules = GameRules::standard(variant);
    let spec = TrialSpec::new(rules.clone(), granularity).unwrap();
    let strategy = create_strategy(&rules, kind, RangePolicy::default()).unwrap();
    (spec, strategy)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

fn assert_same_moments(a: &EvReport, b: &EvReport) {
    assert_eq!(a.completed, b.completed);
    assert!(close(a.mean, b.mean), "{} vs {}", a.mean, b.mean);
    assert!(close(a.variance, b.variance), "{} vs {}", a.variance, b.variance);
    assert_eq!(a.min, b.min);
    assert_eq!(a.max, b.max);
    assert_eq!(a.tally, b.tally);
}

#[test]
fn any_batch_partition_gives_the_same_estimate() {
    let (spec, s) = setup(Variant::ThreeCardPoker, StrategyKind::Holecard, Granularity::ExactCard);
    let base = RunPlan::new(3_001).with_seed(Some(77));
    let reference = run(&base.clone().with_batch_size(3_001).with_threads(Some(1)), &spec, s.as_ref()).unwrap();
    for (batch, threads) in [(1, Some(4)), (7, Some(2)), (250, None), (1_000, Some(3))] {
        let plan = base.clone().with_batch_size(batch).with_threads(threads);
        let report = run(&plan, &spec, s.as_ref()).unwrap();
        assert_same_moments(&reference, &report);
    }
}

#[test]
fn report_matches_sequential_trials() {
    let (spec, s) = setup(Variant::ThreeCardPoker, StrategyKind::Basic, Granularity::None);
    let seed = u64::MAX - 10;
    let report = run(&RunPlan::new(50).with_seed(Some(seed)).with_batch_size(8), &spec, s.as_ref()).unwrap();
    // Seeds wrap past u64::MAX.
    let nets: Vec<f64> = (0..50u64)
        .map(|i| run_trial(&spec, s.as_ref(), seed.wrapping_add(i)).unwrap().net)
        .collect();
    let mean = nets.iter().sum::<f64>() / 50.0;
    assert!(close(report.mean, mean));
    assert_eq!(report.tally.total(), 50);
    assert_eq!(report.seed, seed);
    assert!(!report.cut_short);
}

#[test]
fn holdem_team_runs_reproduce() {
    let (spec, s) = setup(Variant::UltimateHoldem, StrategyKind::Holecard, Granularity::ExactCard);
    let spec = spec.with_partners(1).unwrap();
    let plan = RunPlan::new(300).with_seed(Some(9)).with_batch_size(16);
    let a = run(&plan, &spec, s.as_ref()).unwrap();
    let b = run(&plan.clone().with_threads(Some(1)), &spec, s.as_ref()).unwrap();
    assert_same_moments(&a, &b);
    assert!(a.team_mean.is_some());
    assert_eq!(a.game, Variant::UltimateHoldem);
    let streets: u64 = a.tally.streets.values().sum();
    assert_eq!(streets, 300);
}

#[test]
fn report_serializes_to_json() {
    let (spec, s) = setup(Variant::ThreeCardPoker, StrategyKind::Basic, Granularity::None);
    let report = run(&RunPlan::new(20).with_seed(Some(1)), &spec, s.as_ref()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["game"], "ocp");
    assert_eq!(json["strategy"], "basic");
    assert_eq!(json["completed"], 20);
    let back: EvReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}
