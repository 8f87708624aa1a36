use holecard_engine::cards::{parse_cards, Card, Rank};
use holecard_engine::errors::{ConfigError, GameError};
use holecard_engine::game::{GameRules, Observation, Variant};
use holecard_engine::hole::HoleInfo;
use holecard_engine::rules::{Action, ActionSpace, Street};
use holecard_strategy::{create_strategy, RangePolicy, Strategy, StrategyKind};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

fn strategy(kind: StrategyKind) -> Box<dyn Strategy> {
    let rules = GameRules::standard(Variant::UltimateHoldem);
    create_strategy(&rules, kind, RangePolicy::default()).unwrap()
}

fn space(street: Street) -> ActionSpace {
    ActionSpace::for_street(Variant::UltimateHoldem, street).unwrap()
}

fn one_card(street: Street, hand: &str, dealer: &str, board: &str) -> Observation {
    Observation::new(street, cards(hand), HoleInfo::ExactCard(dealer.parse().unwrap()))
        .with_board(cards(board))
}

#[test]
fn preflop_one_card_rules() {
    let s = strategy(StrategyKind::Holecard);
    let pre = space(Street::Preflop);
    let cases = [
        ("7c 7d", "Ah", Action::Bet4x),
        ("5c 5d", "4h", Action::Bet4x),
        ("5c 5d", "9h", Action::Check),
        ("Jc 8d", "8h", Action::Bet4x),
        ("9c 8d", "2h", Action::Check),
        ("Ac 3d", "Kh", Action::Check),
        ("Ac 7d", "Kh", Action::Bet4x),
        ("Ac 9d", "Ah", Action::Check),
        ("Ac Td", "Ah", Action::Bet4x),
    ];
    for (hand, dealer, expected) in cases {
        let o = one_card(Street::Preflop, hand, dealer, "");
        assert_eq!(s.decide(&o, &pre).unwrap(), expected, "{} vs {}", hand, dealer);
    }
}

#[test]
fn flashed_card_changes_preflop_play() {
    let s = strategy(StrategyKind::OneNOne);
    let pre = space(Street::Preflop);
    let without = one_card(Street::Preflop, "7h 2d", "Kc", "");
    assert_eq!(s.decide(&without, &pre).unwrap(), Action::Check);
    let with = without.clone().with_peek(Some("7s".parse().unwrap()));
    assert_eq!(s.decide(&with, &pre).unwrap(), Action::Bet4x);
    // Dealer pairs the flashed card and we hold nothing.
    let paired = one_card(Street::Preflop, "Ac 9d", "Kc", "").with_peek(Some("Ks".parse().unwrap()));
    assert_eq!(s.decide(&paired, &pre).unwrap(), Action::Check);
}

#[test]
fn flop_one_card_rules() {
    let s = strategy(StrategyKind::Holecard);
    let flop = space(Street::Flop);
    let cases = [
        // Straight.
        ("9c Td", "2h", "Jh Qs 8d", Action::Bet2x),
        // Dealer's king pairs the board over our nines.
        ("9c 3d", "Kc", "Kd 9s 4c", Action::Check),
        // Pair with one hole card, dealer without draws.
        ("Qc 5d", "3h", "Qs 9h 2c", Action::Bet2x),
        // Same pair as the dealer with a weak kicker.
        ("Qc 5d", "Qh", "Qs 9d 2c", Action::Check),
        // Ace high with a dead dealer card.
        ("Ac 5d", "3h", "Ks 9d 7c", Action::Bet2x),
        // Probably dominated.
        ("Ac 5d", "As", "Ks 9d 7c", Action::Check),
    ];
    for (hand, dealer, board, expected) in cases {
        let o = one_card(Street::Flop, hand, dealer, board);
        assert_eq!(s.decide(&o, &flop).unwrap(), expected, "{} vs {} on {}", hand, dealer, board);
    }
}

#[test]
fn river_folds_when_known_card_wins_and_calls_straights() {
    let s = strategy(StrategyKind::Holecard);
    let river = space(Street::River);
    let beaten = one_card(Street::River, "3c 4d", "Ah", "As Kd 9c 7h 2s");
    assert_eq!(s.decide(&beaten, &river).unwrap(), river.min_cost().unwrap());
    let straight = one_card(Street::River, "3c 4d", "Ah", "5s 6d 9c Kh 2s");
    assert_eq!(s.decide(&straight, &river).unwrap(), Action::Bet1x);
}

#[test]
fn river_uses_dealer_outs() {
    let s = strategy(StrategyKind::Holecard);
    let river = space(Street::River);
    // Top pair, top kicker: no second dealer card beats us.
    let strong = one_card(Street::River, "Kc Ad", "8h", "Ks 9h 7d 4c 2s");
    assert_eq!(s.decide(&strong, &river).unwrap(), Action::Bet1x);
    // Seven high against a known queen: every second card wins for the dealer.
    let weak = one_card(Street::River, "7c 3d", "Qh", "Ks Jh 9d 5c 2s");
    assert_eq!(s.decide(&weak, &river).unwrap(), Action::Fold);
}

#[test]
fn full_knowledge_boundaries() {
    let s = strategy(StrategyKind::Holecard);
    let river = space(Street::River);
    let board = cards("Qh 9s 7s 4h 2d");
    let unqualified = Observation::new(Street::River, cards("3c 5d"), HoleInfo::FullHand(cards("Ac Kd")))
        .with_board(board.clone());
    assert_eq!(s.decide(&unqualified, &river).unwrap(), river.max_stake().unwrap());
    let winner = Observation::new(Street::River, cards("3c 5d"), HoleInfo::FullHand(cards("Ac Ad")))
        .with_board(board);
    assert_eq!(s.decide(&winner, &river).unwrap(), river.min_cost().unwrap());
}

#[test]
fn unknown_hole_plays_basic_chart() {
    let holecard = strategy(StrategyKind::Holecard);
    let basic = strategy(StrategyKind::Basic);
    let pre = space(Street::Preflop);
    for hand in ["Kc 5d", "Kc 4d", "3c 3d", "Jc Td", "Jc 9d"] {
        let o = Observation::new(Street::Preflop, cards(hand), HoleInfo::Unknown);
        assert_eq!(holecard.decide(&o, &pre).unwrap(), basic.decide(&o, &pre).unwrap());
    }
}

#[test]
fn rank_information_is_rejected_for_holdem() {
    let s = strategy(StrategyKind::Holecard);
    let o = Observation::new(Street::Preflop, cards("Ac Kd"), HoleInfo::ExactRank(Rank::Ace));
    match s.choose(&o) {
        Err(GameError::Config(ConfigError::InvalidHoleInfo { variant, .. })) => {
            assert_eq!(variant, Variant::UltimateHoldem)
        }
        other => panic!("expected invalid hole info, got {:?}", other),
    }
}

#[test]
fn flop_bet_is_rejected_on_the_river() {
    let s = strategy(StrategyKind::Holecard);
    let o = one_card(Street::Flop, "Ac Kd", "2h", "As Kc 7d");
    assert!(s.decide(&o, &space(Street::Flop)).is_ok());
    // The same observation asked with the river's actions is rejected.
    assert!(s.decide(&o, &space(Street::River)).is_err());
}
