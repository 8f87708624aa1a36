//! Hold'em play from the player's own cards.

use holecard_engine::cards::Card;
use holecard_engine::errors::GameError;
use holecard_engine::game::{joined, GameRules, Observation};
use holecard_engine::hand::Category;
use holecard_engine::rules::{Action, Street};

use super::board_for;
use super::texture::{board_outs, flush_draw, high_low, is_pocket_pair, is_suited};

/// Dealer outs at or above this count fold on the river.
pub const RIVER_OUTS_LIMIT: usize = 21;

/// Raise 4x with 3-3+, any ace, K2s+, K5o+, Q6s+, Q8o+, J8s+, JTo+.
pub fn preflop(hand: &[Card]) -> Action {
    let (high, low) = high_low(hand);
    let suited = is_suited(hand);
    let raise = if is_pocket_pair(hand) {
        high >= 3
    } else {
        match high {
            14 => true,
            13 => suited || low >= 5,
            12 => low >= if suited { 6 } else { 8 },
            11 => low >= if suited { 8 } else { 10 },
            _ => false,
        }
    };
    if raise { Action::Bet4x } else { Action::Check }
}

/// Bet 2x with two pair or better using a hole card, a hidden pair other
/// than pocket deuces, or four to a flush holding a ten or better of the suit.
pub fn flop(rules: &GameRules, hand: &[Card], flop: &[Card]) -> Action {
    let ours = rules.rank(&joined(hand, flop));
    let board = rules.rank(flop);
    let improved = ours.category > board.category;
    let (high, _) = high_low(hand);
    let bet = if improved && ours.category >= Category::TwoPair {
        true
    } else if improved && ours.category == Category::OnePair {
        !(is_pocket_pair(hand) && high == 2)
    } else if let Some(suit) = flush_draw(hand, flop) {
        hand.iter().any(|c| c.suit == suit && c.rank.value() >= 10)
    } else {
        false
    };
    if bet { Action::Bet2x } else { Action::Check }
}

/// Bet 1x with a hidden pair or better, or when fewer than
/// [`RIVER_OUTS_LIMIT`] single cards would beat us.
pub fn river(rules: &GameRules, hand: &[Card], board: &[Card], dead: &[Card]) -> Action {
    let ours = rules.rank(&joined(hand, board));
    let on_board = rules.rank(board);
    if ours.category > on_board.category {
        return Action::Bet1x;
    }
    let outs = board_outs(rules.ranker(), &ours, board, &joined(hand, dead));
    tracing::trace!(outs, "basic river outs");
    if outs < RIVER_OUTS_LIMIT { Action::Bet1x } else { Action::Fold }
}

/// Dispatches on the observation's street.
pub fn decide(rules: &GameRules, obs: &Observation) -> Result<Action, GameError> {
    let action = match obs.street {
        Street::Flop => flop(rules, &obs.hand, board_for(obs, 3)?),
        Street::River => river(rules, &obs.hand, board_for(obs, 5)?, &obs.dead),
        _ => preflop(&obs.hand),
    };
    Ok(action)
}
