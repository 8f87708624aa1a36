use holecard_engine::cards::{parse_cards, Rank, RankSet};
use holecard_engine::errors::{GameError, StateError};
use holecard_engine::game::{GameRules, Observation, Variant};
use holecard_engine::hole::HoleInfo;
use holecard_engine::rules::{Action, ActionSpace, Street};
use holecard_strategy::three_card::ThreeCardHolecard;
use holecard_strategy::{create_strategy, RangePolicy, Strategy, StrategyKind};

fn obs(hand: &str, hole: HoleInfo) -> Observation {
    Observation::new(Street::Decision, parse_cards(hand).unwrap(), hole)
}

fn legal() -> ActionSpace {
    ActionSpace::for_street(Variant::ThreeCardPoker, Street::Decision).unwrap()
}

fn holecard(policy: RangePolicy) -> Box<dyn Strategy> {
    let rules = GameRules::standard(Variant::ThreeCardPoker);
    create_strategy(&rules, StrategyKind::Holecard, policy).unwrap()
}

#[test]
fn exact_card_decisions_match_table() {
    let table = [
        ("Qs 6d 4c", "5h", Action::Call),
        ("2s 3d 5c", "Jh", Action::Call),
        ("Qs 9d 2c", "Qh", Action::Call),
        ("Qs 8d 7c", "Qh", Action::Fold),
        ("Qd 9s 2c", "Kc", Action::Fold),
        ("Kd 9s 3c", "Qc", Action::Call),
        ("Ks 9d 2c", "Kh", Action::Call),
        ("Ks 8d 7c", "Kh", Action::Fold),
        ("As 9d 2c", "Ad", Action::Call),
        ("As 8d 7c", "Ad", Action::Fold),
        ("Ks Qd 9c", "Ah", Action::Fold),
        ("2s 2d 3c", "As", Action::Call),
        ("Qs Jd Tc", "Ah", Action::Call),
    ];
    let s = holecard(RangePolicy::Expectation);
    for (hand, dealer, expected) in table {
        let o = obs(hand, HoleInfo::ExactCard(dealer.parse().unwrap()));
        assert_eq!(s.decide(&o, &legal()).unwrap(), expected, "{} vs {}", hand, dealer);
    }
}

#[test]
fn exact_rank_matches_exact_card() {
    let s = holecard(RangePolicy::Expectation);
    for (hand, rank) in [("Qs 8d 7c", Rank::Queen), ("Ks 9d 2c", Rank::King), ("Js 4d 3c", Rank::Ace)] {
        let by_rank = s.choose(&obs(hand, HoleInfo::ExactRank(rank))).unwrap();
        let card = holecard_engine::cards::Card::new(rank, holecard_engine::cards::Suit::Hearts);
        let by_card = s.choose(&obs(hand, HoleInfo::ExactCard(card))).unwrap();
        assert_eq!(by_rank, by_card, "{}", hand);
    }
}

#[test]
fn mixed_range_policies_disagree_on_marginal_hand() {
    // Ranks two through jack call, a queen folds Q-8-7.
    let range = HoleInfo::RankRange(RankSet::range(Rank::Two, Rank::Queen));
    let expectation = holecard(RangePolicy::Expectation);
    let minimax = holecard(RangePolicy::Minimax);
    assert_eq!(expectation.choose(&obs("Qs 8d 7c", range.clone())).unwrap(), Action::Call);
    assert_eq!(minimax.choose(&obs("Qs 8d 7c", range)).unwrap(), Action::Fold);
}

#[test]
fn expectation_folds_when_range_is_mostly_aces() {
    let mut ranks = RankSet::new();
    ranks.insert(Rank::Queen);
    ranks.insert(Rank::Ace);
    let s = holecard(RangePolicy::Expectation);
    assert_eq!(s.choose(&obs("Qs 9d 2c", HoleInfo::RankRange(ranks))).unwrap(), Action::Fold);
}

#[test]
fn range_expectation_agrees_with_its_ev() {
    let rules = GameRules::standard(Variant::ThreeCardPoker);
    let s = ThreeCardHolecard::new(rules, RangePolicy::Expectation);
    let ranks = RankSet::range(Rank::Queen, Rank::Ace);
    for hand in ["Kd 9s 3c", "Ks Qd 9c", "Qs 9d 2c"] {
        let o = obs(hand, HoleInfo::RankRange(ranks));
        let ev = s.range_call_ev(&o, ranks).unwrap();
        let expected = if ev > -1.0 { Action::Call } else { Action::Fold };
        // Asked twice so the second answer comes from the cache.
        assert_eq!(s.choose(&o).unwrap(), expected, "{} ev {}", hand, ev);
        assert_eq!(s.choose(&o).unwrap(), expected, "{} ev {}", hand, ev);
    }
}

#[test]
fn certainty_boundaries_pick_extreme_actions() {
    let s = holecard(RangePolicy::Expectation);
    let space = legal();
    let unqualified = HoleInfo::FullHand(parse_cards("Jh 8c 5d").unwrap());
    assert_eq!(
        s.decide(&obs("4s 3d 2c", unqualified), &space).unwrap(),
        space.max_stake().unwrap()
    );
    let sure_winner = HoleInfo::FullHand(parse_cards("Ah Ac Ad").unwrap());
    assert_eq!(
        s.decide(&obs("Ks Kd 2c", sure_winner), &space).unwrap(),
        space.min_cost().unwrap()
    );
}

#[test]
fn basic_ignores_hole_information() {
    let rules = GameRules::standard(Variant::ThreeCardPoker);
    let basic = create_strategy(&rules, StrategyKind::Basic, RangePolicy::default()).unwrap();
    let o = obs("Js 4d 3c", HoleInfo::ExactCard("2h".parse().unwrap()));
    assert_eq!(basic.choose(&o).unwrap(), Action::Fold);
    assert_eq!(basic.name(), "basic");
}

#[test]
fn illegal_action_is_a_state_error() {
    struct Raiser;
    impl Strategy for Raiser {
        fn choose(&self, _obs: &Observation) -> Result<Action, GameError> {
            Ok(Action::Bet4x)
        }
        fn name(&self) -> &str {
            "raiser"
        }
    }
    let err = Raiser
        .decide(&obs("As Kd Qc", HoleInfo::Unknown), &legal())
        .unwrap_err();
    assert_eq!(
        err,
        GameError::State(StateError::IllegalAction {
            action: Action::Bet4x,
            street: Street::Decision
        })
    );
}

#[test]
fn malformed_hole_info_is_a_config_error() {
    let s = holecard(RangePolicy::Expectation);
    let err = s
        .choose(&obs("As Kd Qc", HoleInfo::RankRange(RankSet::new())))
        .unwrap_err();
    assert!(err.is_config());
}
