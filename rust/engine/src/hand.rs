use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, RankSet};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub fn all() -> [Category; 10] {
        [
            Category::HighCard,
            Category::OnePair,
            Category::TwoPair,
            Category::ThreeOfAKind,
            Category::Straight,
            Category::Flush,
            Category::FullHouse,
            Category::FourOfAKind,
            Category::StraightFlush,
            Category::RoyalFlush,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Trips",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Quads",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ranked value of a hand under one ranker.
///
/// Ordering is by `precedence` (the category's position in the ranker's own
/// ordering), then by `kickers` high to low. Values from different rankers
/// are not comparable.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    pub precedence: u8,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

impl PartialEq for HandStrength {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandStrength {}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence
            .cmp(&other.precedence)
            .then_with(|| self.kickers.cmp(&other.kickers))
    }
}

/// Ranking oracle consumed by strategies and settlement.
///
/// Implementations must be deterministic and return a total order where a
/// larger value is a stronger hand.
pub trait HandRanker: Send + Sync {
    fn rank(&self, cards: &[Card]) -> HandStrength;

    fn name(&self) -> &str;
}

/// Standard poker ranking: best five of up to seven cards.
/// Royal flush is reported as its own category.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRanker;

impl HandRanker for StandardRanker {
    fn rank(&self, cards: &[Card]) -> HandStrength {
        let (category, kickers) = evaluate_best(cards);
        HandStrength {
            category,
            precedence: category as u8,
            kickers,
        }
    }

    fn name(&self) -> &str {
        "standard"
    }
}

/// Three card poker ranking: straight flush > trips > straight > flush > pair > high card.
/// A-2-3 is the lowest straight and Q-K-A the highest. Only the first three cards count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeCardRanker;

impl ThreeCardRanker {
    pub fn precedence(category: Category) -> u8 {
        match category {
            Category::HighCard => 0,
            Category::OnePair => 1,
            Category::Flush => 2,
            Category::Straight => 3,
            Category::ThreeOfAKind => 4,
            _ => 5,
        }
    }
}

impl HandRanker for ThreeCardRanker {
    fn rank(&self, cards: &[Card]) -> HandStrength {
        let cards = &cards[..cards.len().min(3)];
        let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let full = cards.len() == 3;
        let flush = full && cards.iter().all(|c| c.suit == cards[0].suit);
        let straight_high = if !full {
            None
        } else if ranks == [14, 3, 2] {
            Some(3)
        } else if ranks[0] == ranks[1] + 1 && ranks[1] == ranks[2] + 1 {
            Some(ranks[0])
        } else {
            None
        };

        let (category, kickers) = match (straight_high, flush) {
            (Some(h), true) => (Category::StraightFlush, [h, 0, 0, 0, 0]),
            _ if full && ranks[0] == ranks[2] => (Category::ThreeOfAKind, [ranks[0], 0, 0, 0, 0]),
            (Some(h), false) => (Category::Straight, [h, 0, 0, 0, 0]),
            (None, true) => (Category::Flush, pad(&ranks)),
            _ => {
                let pair = ranks.windows(2).find(|w| w[0] == w[1]).map(|w| w[0]);
                match pair {
                    Some(p) => {
                        let kicker = ranks.iter().copied().find(|&r| r != p).unwrap_or(0);
                        (Category::OnePair, [p, kicker, 0, 0, 0])
                    }
                    None => (Category::HighCard, pad(&ranks)),
                }
            }
        };
        HandStrength {
            category,
            precedence: Self::precedence(category),
            kickers,
        }
    }

    fn name(&self) -> &str {
        "three-card"
    }
}

fn pad(desc: &[u8]) -> [u8; 5] {
    let mut k = [0u8; 5];
    for (slot, r) in k.iter_mut().zip(desc) {
        *slot = *r;
    }
    k
}

fn evaluate_best(cards: &[Card]) -> (Category, [u8; 5]) {
    // Count ranks and suits
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut suit_counts = [0u8; 4];
    let mut by_suit = [RankSet::new(); 4];
    for &c in cards {
        rank_counts[c.rank.value() as usize] += 1;
        let s = c.suit.index();
        suit_counts[s] += 1;
        by_suit[s].insert(c.rank);
    }

    let flush_suit = (0..4).find(|&s| suit_counts[s] >= 5);

    if let Some(s) = flush_suit {
        if let Some(high) = by_suit[s].straight_high() {
            let category = if high == 14 {
                Category::RoyalFlush
            } else {
                Category::StraightFlush
            };
            return (category, [high, 0, 0, 0, 0]);
        }
    }

    // Group ranks by multiplicity, high to low
    let mut quads = Vec::with_capacity(1);
    let mut trips = Vec::with_capacity(2);
    let mut pairs = Vec::with_capacity(3);
    let mut singles = Vec::with_capacity(7);
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            0 => {}
            1 => singles.push(r),
            2 => pairs.push(r),
            3 => trips.push(r),
            _ => quads.push(r),
        }
    }

    if let Some(&q) = quads.first() {
        let kicker = (2..=14u8)
            .rev()
            .find(|&r| r != q && rank_counts[r as usize] > 0)
            .unwrap_or(0);
        return (Category::FourOfAKind, [q, kicker, 0, 0, 0]);
    }

    if let Some(&t) = trips.first() {
        // second trips plays as the pair
        let pair = trips.get(1).copied().into_iter().chain(pairs.first().copied()).max();
        if let Some(p) = pair {
            return (Category::FullHouse, [t, p, 0, 0, 0]);
        }
    }

    if let Some(s) = flush_suit {
        let mut desc: Vec<u8> = by_suit[s].iter().map(|r| r.value()).collect();
        desc.reverse();
        return (Category::Flush, pad(&desc[..5]));
    }

    let present = RankSet::from_cards(cards);
    if let Some(high) = present.straight_high() {
        return (Category::Straight, [high, 0, 0, 0, 0]);
    }

    if let Some(&t) = trips.first() {
        let rest: Vec<u8> = descending_except(&rank_counts, &[t]);
        let mut k = [t, 0, 0, 0, 0];
        for (slot, r) in k[1..3].iter_mut().zip(&rest) {
            *slot = *r;
        }
        return (Category::ThreeOfAKind, k);
    }

    if pairs.len() >= 2 {
        let (high, low) = (pairs[0], pairs[1]);
        let rest = descending_except(&rank_counts, &[high, low]);
        return (
            Category::TwoPair,
            [high, low, rest.first().copied().unwrap_or(0), 0, 0],
        );
    }

    if let Some(&p) = pairs.first() {
        let rest = descending_except(&rank_counts, &[p]);
        let mut k = [p, 0, 0, 0, 0];
        for (slot, r) in k[1..4].iter_mut().zip(&rest) {
            *slot = *r;
        }
        return (Category::OnePair, k);
    }

    (Category::HighCard, pad(&singles))
}

fn descending_except(rank_counts: &[u8; 15], skip: &[u8]) -> Vec<u8> {
    (2..=14u8)
        .rev()
        .filter(|r| rank_counts[*r as usize] > 0 && !skip.contains(r))
        .collect()
}
