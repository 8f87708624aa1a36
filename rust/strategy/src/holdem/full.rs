//! Hold'em play with both dealer hole cards known.

use holecard_engine::cards::{unseen_cards, Card};
use holecard_engine::errors::GameError;
use holecard_engine::game::{joined, GameRules, Observation};
use holecard_engine::rules::{Action, Street};

use super::board_for;

/// Raise pre-flop when our two cards rank at least as high as the dealer's.
pub fn preflop(rules: &GameRules, hand: &[Card], dealer: &[Card]) -> Action {
    if rules.rank(hand) >= rules.rank(dealer) {
        Action::Bet4x
    } else {
        Action::Check
    }
}

/// Expected value of betting 2x now and of checking with the best river
/// play, over every turn and river still possible.
pub fn flop_values(
    rules: &GameRules,
    hand: &[Card],
    dealer: &[Card],
    flop: &[Card],
    dead: &[Card],
) -> Result<(f64, f64), GameError> {
    let mut known = joined(hand, dealer);
    known.extend_from_slice(flop);
    known.extend_from_slice(dead);
    let unseen = unseen_cards(&known);
    let mut board = flop.to_vec();
    board.extend_from_slice(&[flop[0], flop[0]]);
    let (mut bet, mut check, mut n) = (0.0, 0.0, 0u32);
    for i in 0..unseen.len() {
        for j in i + 1..unseen.len() {
            board[3] = unseen[i];
            board[4] = unseen[j];
            bet += rules.settle_holdem(hand, dealer, &board, 2)?;
            let call = rules.settle_holdem(hand, dealer, &board, 1)?;
            let fold = rules.settle_holdem(hand, dealer, &board, 0)?;
            check += call.max(fold);
            n += 1;
        }
    }
    if n == 0 {
        return Ok((0.0, 0.0));
    }
    Ok((bet / f64::from(n), check / f64::from(n)))
}

pub fn river(rules: &GameRules, hand: &[Card], dealer: &[Card], board: &[Card]) -> Action {
    let theirs = rules.rank(&joined(dealer, board));
    if !rules.dealer_qualifies(&theirs) {
        return Action::Bet1x;
    }
    if rules.rank(&joined(hand, board)) < theirs {
        Action::Fold
    } else {
        Action::Bet1x
    }
}

pub fn decide(rules: &GameRules, obs: &Observation, dealer: &[Card]) -> Result<Action, GameError> {
    let action = match obs.street {
        Street::Flop => {
            let flop = board_for(obs, 3)?;
            let (bet, check) = flop_values(rules, &obs.hand, dealer, flop, &obs.dead)?;
            tracing::trace!(bet, check, "full knowledge flop values");
            // Ties go to the smaller stake.
            if bet > check { Action::Bet2x } else { Action::Check }
        }
        Street::River => river(rules, &obs.hand, dealer, board_for(obs, 5)?),
        _ => preflop(rules, &obs.hand, dealer),
    };
    Ok(action)
}
