use holecard_cli::run;

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut argv = vec!["holecard"];
    argv.extend_from_slice(args);
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn ev_prints_estimate_with_interval() {
    let (code, out, err) = run_cli(&[
        "ev", "--game", "ocp", "--strategy", "holecard", "--trials", "2000", "--seed", "42",
    ]);
    assert_eq!(code, 0, "stderr={}", err);
    assert!(out.contains("ocp holecard (hole info: card) seed=42"));
    assert!(out.contains("Trials: 2000/2000"));
    assert!(out.contains("95% CI: ["));
}

#[test]
fn ev_json_parses() {
    let (code, out, _) = run_cli(&[
        "ev", "--game", "uth", "--strategy", "ono", "--trials", "300", "--seed", "1", "--json",
    ]);
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["game"], "uth");
    assert_eq!(v["completed"], 300);
    assert!(v["ci95"][0].as_f64().unwrap() <= v["mean"].as_f64().unwrap());
}

#[test]
fn ev_with_rank_bands() {
    let (code, out, err) = run_cli(&[
        "ev",
        "--game",
        "ocp",
        "--strategy",
        "holecard",
        "--info",
        "bands:2-J/Q-A",
        "--range-policy",
        "minimax",
        "--trials",
        "500",
        "--seed",
        "3",
        "--json",
    ]);
    assert_eq!(code, 0, "stderr={}", err);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(v["hole_info"].as_str().unwrap().starts_with("bands:"));
}

#[test]
fn team_ev_reports_team_mean() {
    let (code, out, _) = run_cli(&[
        "ev",
        "--game",
        "uth",
        "--strategy",
        "holecard",
        "--partners",
        "2",
        "--trials",
        "200",
        "--seed",
        "9",
        "--json",
    ]);
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(v["team_mean"].is_number());
}

#[test]
fn compare_prints_gain() {
    let (code, out, _) = run_cli(&["compare", "--game", "ocp", "--trials", "1000", "--seed", "4"]);
    assert_eq!(code, 0);
    assert!(out.contains("Baseline:   basic"));
    assert!(out.contains("Challenger: holecard"));
    assert!(out.contains("over 1000 paired hands"));
}

#[test]
fn deal_is_reproducible() {
    let (code1, out1, _) = run_cli(&["deal", "--game", "ocp", "--seed", "1"]);
    let (code2, out2, _) = run_cli(&["deal", "--game", "ocp", "--seed", "1"]);
    assert_eq!((code1, code2), (0, 0));
    assert_eq!(out1, out2);
    assert!(out1.contains("Dealer shows: first card "));
    assert!(out1.contains("Result: "));
}

#[test]
fn ror_prints_risk() {
    let (code, out, _) = run_cli(&[
        "ror", "--game", "ocp", "--bankroll", "5", "--runs", "30", "--seed", "2",
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("Risk of ruin: "));
    assert!(out.contains("over 30 runs (seed=2)"));
}

#[test]
fn rng_prints_sample() {
    let (code, out, _) = run_cli(&["rng", "--seed", "2", "--count", "3"]);
    assert_eq!(code, 0);
    assert!(out.contains("RNG sample:"));
}

#[test]
fn verbose_logging_does_not_touch_stdout_json() {
    let (code, out, _) = run_cli(&["-v", "rng", "--seed", "5"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("seed=5 "));
}
