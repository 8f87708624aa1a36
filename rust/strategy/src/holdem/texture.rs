//! Board texture and draw helpers shared by the hold'em policies.
//!
//! Ranks are compared by value (2..=14). "Fills" counts the ranks that would
//! complete five in a row, the ace playing high and low.

use holecard_engine::cards::{all_ranks, all_suits, unseen_cards, Card, RankSet, Suit};
use holecard_engine::game::joined;
use holecard_engine::hand::{HandRanker, HandStrength};

pub fn rank_counts(cards: &[Card]) -> [u8; 15] {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank.value() as usize] += 1;
    }
    counts
}

/// High and low hole card ranks.
pub fn high_low(hand: &[Card]) -> (u8, u8) {
    let a = hand.first().map_or(0, |c| c.rank.value());
    let b = hand.get(1).map_or(0, |c| c.rank.value());
    (a.max(b), a.min(b))
}

pub fn is_pocket_pair(hand: &[Card]) -> bool {
    hand.len() == 2 && hand[0].rank == hand[1].rank
}

pub fn is_suited(hand: &[Card]) -> bool {
    hand.windows(2).all(|w| w[0].suit == w[1].suit)
}

pub fn holds_rank(hand: &[Card], value: u8) -> bool {
    hand.iter().any(|c| c.rank.value() == value)
}

pub fn holds_at_least(hand: &[Card], value: u8) -> bool {
    hand.iter().any(|c| c.rank.value() >= value)
}

fn suit_count(cards: &[Card], suit: Suit) -> usize {
    cards.iter().filter(|c| c.suit == suit).count()
}

/// Suit with exactly four cards among `hand` and `board`, one of them in `hand`.
pub fn flush_draw(hand: &[Card], board: &[Card]) -> Option<Suit> {
    let all = joined(hand, board);
    all_suits()
        .into_iter()
        .find(|&s| suit_count(&all, s) == 4 && hand.iter().any(|c| c.suit == s))
}

/// Three or more of a suit held in `hand`.
pub fn has_three_flush(hand: &[Card], board: &[Card]) -> bool {
    let all = joined(hand, board);
    all_suits()
        .into_iter()
        .any(|s| suit_count(&all, s) >= 3 && hand.iter().any(|c| c.suit == s))
}

fn top_in_suit(cards: &[Card], suit: Suit) -> u8 {
    cards
        .iter()
        .filter(|c| c.suit == suit)
        .map(|c| c.rank.value())
        .max()
        .unwrap_or(0)
}

/// The player's flush draw is live: the dealer's known card has no draw, or a
/// lower one.
pub fn live_four_flush(hand: &[Card], dealer: Card, board: &[Card]) -> bool {
    let ours = flush_draw(hand, board);
    let theirs = flush_draw(&[dealer], board);
    match (ours, theirs) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(hs), Some(ds)) => {
            top_in_suit(&joined(hand, board), hs) > top_in_suit(&joined(&[dealer], board), ds)
        }
    }
}

/// Number of ranks that would complete a straight.
pub fn straight_fills(cards: &[Card]) -> usize {
    let present = RankSet::from_cards(cards);
    all_ranks()
        .into_iter()
        .filter(|&r| {
            let mut with = present;
            with.insert(r);
            with.straight_high().is_some()
        })
        .count()
}

pub fn paired_board(board: &[Card]) -> bool {
    RankSet::from_cards(board).len() < board.len()
}

pub fn trips_on_board(board: &[Card]) -> bool {
    rank_counts(board).contains(&3)
}

/// Ranks appearing exactly twice, high to low.
pub fn pairs(cards: &[Card]) -> Vec<u8> {
    let counts = rank_counts(cards);
    (2..=14u8).rev().filter(|&r| counts[r as usize] == 2).collect()
}

/// One hole card matches the dealer's card and the other is six or lower.
pub fn probably_dominated(hand: &[Card], dealer: Card) -> bool {
    match hand {
        [a, b] => {
            (a.rank == dealer.rank && b.rank.value() < 7)
                || (b.rank == dealer.rank && a.rank.value() < 7)
        }
        _ => false,
    }
}

/// Kicker of trips made with one hole card on a paired board; deuce when
/// neither hole card pairs the board.
pub fn trips_kicker(hand: &[Card], board: &[Card]) -> u8 {
    let counts = rank_counts(board);
    let mut kickers = Vec::new();
    if let [a, b] = hand {
        for r in (2..=14u8).filter(|&r| counts[r as usize] >= 2) {
            if a.rank.value() == r {
                kickers.push(b.rank.value());
            } else if b.rank.value() == r {
                kickers.push(a.rank.value());
            }
        }
    }
    kickers.into_iter().min().unwrap_or(2)
}

/// Highest rank of hand and board outside the pairs.
pub fn two_pair_kicker(hand: &[Card], board: &[Card]) -> u8 {
    let all = joined(hand, board);
    let paired = pairs(&all);
    all.iter()
        .map(|c| c.rank.value())
        .filter(|r| !paired.contains(r))
        .max()
        .unwrap_or(0)
}

/// Weakest and strongest hands the dealer can hold given one known card.
///
/// Second cards range over everything not in `board`, not the known card and
/// not in `dead`. Returns `None` when no second card is possible.
pub fn dealer_extremes(
    ranker: &dyn HandRanker,
    dealer: Card,
    board: &[Card],
    dead: &[Card],
) -> Option<(HandStrength, HandStrength)> {
    let mut known = joined(board, dead);
    known.push(dealer);
    let mut cards = joined(&[dealer], board);
    cards.push(dealer);
    let last = cards.len() - 1;
    let mut extremes: Option<(HandStrength, HandStrength)> = None;
    for c in unseen_cards(&known) {
        cards[last] = c;
        let s = ranker.rank(&cards);
        extremes = Some(match extremes {
            None => (s, s),
            Some((lo, hi)) => (lo.min(s), hi.max(s)),
        });
    }
    extremes
}

/// Dealer second cards beating `ours`, and how many second cards are possible.
pub fn dealer_outs(
    ranker: &dyn HandRanker,
    ours: &HandStrength,
    dealer: Card,
    board: &[Card],
    dead: &[Card],
) -> (usize, usize) {
    let mut known = joined(board, dead);
    known.push(dealer);
    let candidates = unseen_cards(&known);
    let mut cards = joined(&[dealer], board);
    cards.push(dealer);
    let last = cards.len() - 1;
    let outs = candidates
        .iter()
        .filter(|&&c| {
            cards[last] = c;
            ranker.rank(&cards) > *ours
        })
        .count();
    (outs, candidates.len())
}

/// Single unseen cards that, played with the board alone, beat `ours`.
pub fn board_outs(ranker: &dyn HandRanker, ours: &HandStrength, board: &[Card], dead: &[Card]) -> usize {
    unseen_cards(&joined(board, dead))
        .into_iter()
        .filter(|&c| ranker.rank(&joined(board, &[c])) > *ours)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use holecard_engine::cards::parse_cards;
    use holecard_engine::hand::{Category, StandardRanker};

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    #[test]
    fn flush_draw_needs_a_hole_card() {
        assert_eq!(flush_draw(&cards("Ks 9s"), &cards("Js 4s 2h")), Some(Suit::Spades));
        assert_eq!(flush_draw(&cards("Kh 9d"), &cards("Js 4s 2s")), None);
    }

    #[test]
    fn live_four_flush_compares_top_cards() {
        let hand = cards("Kh 2h");
        assert!(live_four_flush(&hand, "Qh".parse().unwrap(), &cards("8h 7h 2c")));
        let weak = cards("Kh Tc");
        assert!(!live_four_flush(&weak, "Ah".parse().unwrap(), &cards("8h 7h 2h")));
    }

    #[test]
    fn open_ended_draw_has_two_fills() {
        assert_eq!(straight_fills(&cards("9c Td Jh Qs")), 2);
        assert_eq!(straight_fills(&cards("9c Td Qs Kh")), 1);
        assert_eq!(straight_fills(&cards("2c 7d Qs")), 0);
        // wheel draw
        assert_eq!(straight_fills(&cards("Ac 2d 3h 4s")), 1);
    }

    #[test]
    fn kickers_for_made_hands() {
        assert_eq!(trips_kicker(&cards("9s 4d"), &cards("9h 9c 2d")), 4);
        assert_eq!(trips_kicker(&cards("As Kd"), &cards("9h 9c 2d")), 2);
        assert_eq!(two_pair_kicker(&cards("As 9d"), &cards("9h Ac 2d")), 2);
        assert_eq!(two_pair_kicker(&cards("8s 9d"), &cards("9h 8c Kd")), 13);
    }

    #[test]
    fn dealer_extremes_span_second_cards() {
        let board = cards("Ah Kd 7c 4s 2h");
        let (worst, best) =
            dealer_extremes(&StandardRanker, "As".parse().unwrap(), &board, &cards("Qc Jd")).unwrap();
        assert_eq!(worst.category, Category::OnePair);
        assert_eq!(best.category, Category::ThreeOfAKind);
    }

    #[test]
    fn outs_count_only_beating_cards() {
        let hand = cards("Kc Qd");
        let board = cards("Ks 9h 7d 4c 2s");
        let ours = StandardRanker.rank(&joined(&hand, &board));
        let (outs, total) =
            dealer_outs(&StandardRanker, &ours, "Ah".parse().unwrap(), &board, &hand);
        assert_eq!(total, 52 - 5 - 1 - 2);
        // Three aces make aces, two kings make better kings.
        assert_eq!(outs, 3 + 2);
    }
}
