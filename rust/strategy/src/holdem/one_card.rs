//! Hold'em play knowing one dealer hole card, optionally with the first flop
//! card flashed before the pre-flop decision.

use holecard_engine::cards::Card;
use holecard_engine::errors::{GameError, StateError};
use holecard_engine::game::{joined, GameRules, Observation};
use holecard_engine::hand::Category;
use holecard_engine::rules::{Action, Street};

use super::board_for;
use super::texture::{
    dealer_extremes, dealer_outs, flush_draw, has_three_flush, high_low, holds_at_least,
    holds_rank, is_pocket_pair, is_suited, live_four_flush, paired_board, pairs,
    probably_dominated, straight_fills, trips_kicker, trips_on_board, two_pair_kicker,
};

/// Minimum chance the dealer's unknown card does not beat us to call the river.
pub const RIVER_CALL_THRESHOLD: f64 = 0.2;

type Rule = (&'static str, bool);

fn value(c: &Card) -> u8 {
    c.rank.value()
}

/// Pre-flop rules on pairs made with the flashed card `peek`.
/// `None` when none applies.
pub fn peek_preflop(hand: &[Card], dealer: Card, peek: Card) -> Option<Rule> {
    let [a, b] = hand else {
        return None;
    };
    let p = peek.rank;
    let dealer_pairs = dealer.rank == p;
    let pocket = is_pocket_pair(hand);
    let rule = if a.rank == p && b.rank == p {
        ("trips with the flashed card", true)
    } else if pocket && !dealer_pairs {
        ("pocket pair, dealer unpaired", true)
    } else if pocket && a.rank > dealer.rank {
        ("pocket pair over the dealer's pair", true)
    } else if a.rank == p && dealer_pairs && value(b) >= 10 {
        ("shared pair with a ten or better kicker", true)
    } else if b.rank == p && dealer_pairs && value(a) >= 10 {
        ("shared pair with a ten or better kicker", true)
    } else if (a.rank == p || b.rank == p) && !dealer_pairs {
        ("pair with the flashed card, dealer unpaired", true)
    } else if dealer_pairs && !pocket {
        ("dealer paired the flashed card", false)
    } else {
        return None;
    };
    Some(rule)
}

/// Pre-flop rules on high card `H`, low card `x` and the dealer's card `D`.
pub fn one_card_preflop(hand: &[Card], dealer: Card, peek: Option<Card>) -> Rule {
    let (h, x) = high_low(hand);
    let d = dealer.rank.value();
    if is_pocket_pair(hand) && h >= 7 {
        return ("pocket sevens or better", true);
    }
    if is_pocket_pair(hand) && h >= d {
        return ("pocket pair, dealer card no higher", true);
    }
    if h >= 10 && x >= d {
        return ("ten or better with x at least D", true);
    }
    if h <= 9 {
        return ("nine high or worse", false);
    }
    if d > h {
        return ("dealer card over our high card", false);
    }
    let suited = is_suited(hand) && peek.is_none_or(|p| hand.iter().all(|c| c.suit == p.suit));
    // (x needed below D, x needed when D pairs H)
    let (under, paired) = match (h, suited) {
        (12, true) => (8, 9),
        (12, false) => (10, 10),
        (13, true) => (6, 9),
        (13, false) => (10, 10),
        (14, true) => (2, 9),
        (14, false) => (7, 10),
        _ => return ("ten or jack high under D", false),
    };
    let raise = (x < d && d < h && x >= under) || (d == h && x >= paired);
    ("high card chart", raise)
}

fn trips(worst: Category, hand: &[Card], flop: &[Card]) -> Rule {
    if worst < Category::ThreeOfAKind {
        ("trips over the dealer", true)
    } else if trips_on_board(flop) && holds_at_least(hand, 12) {
        ("trips on board with a queen or better", true)
    } else if worst == Category::ThreeOfAKind && paired_board(flop) {
        ("shared trips, kicker decides", trips_kicker(hand, flop) >= 10)
    } else {
        ("trips without an edge", false)
    }
}

fn two_pair(worst: Category, hand: &[Card], dealer: Card, flop: &[Card]) -> Rule {
    let d = dealer.rank.value();
    if worst < Category::TwoPair {
        let board_pairs = pairs(flop);
        let pocket = is_pocket_pair(hand);
        if !pocket && !paired_board(flop) {
            ("two pair using both hole cards", true)
        } else if pocket
            && board_pairs.len() == 1
            && value(&hand[0]) < board_pairs[0]
            && value(&hand[0]) < d
        {
            ("pocket pair under the board pair and D", false)
        } else {
            ("two pair over the dealer", true)
        }
    } else if worst == Category::TwoPair {
        let ours = pairs(&joined(hand, flop));
        let theirs = pairs(&joined(&[dealer], flop));
        if ours == theirs {
            ("same two pair, kicker decides", two_pair_kicker(hand, flop) > 10)
        } else {
            ("different two pair", ours > theirs)
        }
    } else {
        ("dealer ahead of two pair", false)
    }
}

fn one_pair(hand: &[Card], dealer: Card, flop: &[Card]) -> Rule {
    let d = dealer.rank.value();
    let dealer_draw = flush_draw(&[dealer], flop).is_some();
    let live = live_four_flush(hand, dealer, flop);
    let dealer_fills = straight_fills(&joined(&[dealer], flop));
    let our_fills = straight_fills(&joined(hand, flop));
    let paired = paired_board(flop);
    if dealer_draw && !live {
        ("dealer flush draw", false)
    } else if dealer_fills >= 2 {
        ("dealer open-ended straight draw", false)
    } else if paired && live {
        ("paired board with a live flush draw", true)
    } else if paired && (holds_rank(hand, 14) || holds_rank(hand, 13)) && dealer_fills == 0 {
        ("paired board holding an ace or king", true)
    } else if paired
        && our_fills >= 2
        && holds_at_least(hand, 10)
        && dealer_fills == 0
        && !probably_dominated(hand, dealer)
    {
        ("paired board with an open-ended draw", true)
    } else if !paired && !is_pocket_pair(hand) {
        let our_pair = pairs(&joined(hand, flop)).first().copied().unwrap_or(0);
        let kicker = hand
            .iter()
            .map(value)
            .find(|&r| r != our_pair)
            .unwrap_or(0);
        let dealer_pair = pairs(&joined(&[dealer], flop)).first().copied();
        if dealer_pair == Some(our_pair) && kicker <= 9 {
            ("dealer shares our pair, weak kicker", false)
        } else if dealer_fills > our_fills && d > our_pair {
            ("dealer draws more and holds an overcard", false)
        } else {
            ("pair with one hole card", true)
        }
    } else {
        ("pair without an edge", false)
    }
}

fn high_card(hand: &[Card], dealer: Card, flop: &[Card]) -> Rule {
    let dealer_draw = flush_draw(&[dealer], flop).is_some();
    let dealer_fills = straight_fills(&joined(&[dealer], flop));
    if probably_dominated(hand, dealer) {
        ("probably dominated", false)
    } else if live_four_flush(hand, dealer, flop) && holds_at_least(hand, 8) {
        ("live flush draw with an eight or better", true)
    } else if straight_fills(&joined(hand, flop)) >= 2
        && holds_at_least(hand, 10)
        && !dealer_draw
        && dealer_fills == 0
    {
        ("open-ended draw, dealer drawing dead", true)
    } else if holds_rank(hand, 14)
        && dealer.rank.value() < 14
        && !dealer_draw
        && dealer_fills == 0
        && !has_three_flush(&[dealer], flop)
    {
        ("ace high, dealer without draws", true)
    } else {
        ("nothing", false)
    }
}

/// Flop decision: bet 2x or check.
pub fn flop(rules: &GameRules, hand: &[Card], dealer: Card, flop: &[Card], dead: &[Card]) -> Rule {
    let ours = rules.rank(&joined(hand, flop));
    let Some((worst, _)) = dealer_extremes(rules.ranker(), dealer, flop, &joined(hand, dead))
    else {
        return ("no dealer card possible", false);
    };
    if worst > ours {
        return ("dealer's card already beats us", false);
    }
    match ours.category {
        c if c >= Category::Straight => ("straight or better", true),
        Category::ThreeOfAKind => trips(worst.category, hand, flop),
        Category::TwoPair => two_pair(worst.category, hand, dealer, flop),
        Category::OnePair => one_pair(hand, dealer, flop),
        _ => high_card(hand, dealer, flop),
    }
}

/// River decision: bet 1x or fold.
pub fn river(
    rules: &GameRules,
    hand: &[Card],
    dealer: Card,
    board: &[Card],
    dead: &[Card],
) -> Result<Rule, GameError> {
    let ours = rules.rank(&joined(hand, board));
    let dead = joined(hand, dead);
    let (worst, best) = dealer_extremes(rules.ranker(), dealer, board, &dead).ok_or(
        StateError::InsufficientCards {
            requested: 1,
            remaining: 0,
        },
    )?;
    if !rules.dealer_qualifies(&best) {
        return Ok(("dealer cannot qualify", true));
    }
    if worst > ours {
        return Ok(("dealer's card already beats us", false));
    }
    if ours.category >= Category::Straight {
        return Ok(("straight or better", true));
    }
    let (outs, total) = dealer_outs(rules.ranker(), &ours, dealer, board, &dead);
    let not_beaten = 1.0 - outs as f64 / total as f64;
    tracing::trace!(outs, total, not_beaten, "dealer outs");
    Ok(("dealer outs", not_beaten >= RIVER_CALL_THRESHOLD))
}

/// Dispatches on the observation's street.
pub fn decide(rules: &GameRules, obs: &Observation, dealer: Card) -> Result<Action, GameError> {
    let hand = &obs.hand;
    let (street, (rule, play)) = match obs.street {
        Street::Flop => {
            let board = board_for(obs, 3)?;
            (Street::Flop, flop(rules, hand, dealer, board, &obs.dead))
        }
        Street::River => {
            let board = board_for(obs, 5)?;
            (Street::River, river(rules, hand, dealer, board, &obs.dead)?)
        }
        _ => {
            let rule = match obs.peek.and_then(|p| peek_preflop(hand, dealer, p)) {
                Some(rule) => rule,
                None => one_card_preflop(hand, dealer, obs.peek),
            };
            (Street::Preflop, rule)
        }
    };
    tracing::trace!(%street, rule, play, "one card decision");
    let action = match (street, play) {
        (Street::Preflop, true) => Action::Bet4x,
        (Street::Flop, true) => Action::Bet2x,
        (Street::River, true) => Action::Bet1x,
        (Street::River, false) => Action::Fold,
        _ => Action::Check,
    };
    Ok(action)
}
