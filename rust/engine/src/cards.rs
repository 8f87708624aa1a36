use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ParseCardError;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn from_symbol(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' | '♣' => Some(Suit::Clubs),
            'd' | '♦' => Some(Suit::Diamonds),
            'h' | '♥' => Some(Suit::Hearts),
            's' | '♠' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Numeric values are assigned for comparison and hand evaluation purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14)
    Ace,
}

impl Rank {
    pub fn from_u8(v: u8) -> Option<Rank> {
        match v {
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> char {
        match self {
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            r => (b'0' + r.value()) as char,
        }
    }

    pub fn from_symbol(c: char) -> Option<Rank> {
        match c.to_ascii_uppercase() {
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            d @ '2'..='9' => Rank::from_u8(d as u8 - b'0'),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Rank {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t == "10" {
            return Ok(Rank::Ten);
        }
        let mut chars = t.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::from_symbol(c).ok_or_else(|| ParseCardError(s.to_string())),
            _ => Err(ParseCardError(s.to_string())),
        }
    }
}

/// Represents a single playing card with a suit and rank.
///
/// Cards print and parse in the two-character form used throughout the
/// tooling: rank symbol followed by suit symbol.
///
/// ```rust
/// use holecard_engine::cards::{Card, Rank, Suit};
///
/// let card: Card = "Td".parse().unwrap();
/// assert_eq!(card, Card::new(Rank::Ten, Suit::Diamonds));
/// assert_eq!(card.to_string(), "Td");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card { suit, rank }
    }

    /// Dense index in `0..52`, suit-major.
    pub fn index(self) -> usize {
        self.suit.index() * 13 + (self.rank.value() as usize - 2)
    }

    pub fn from_index(i: usize) -> Option<Card> {
        if i >= 52 {
            return None;
        }
        let suit = all_suits()[i / 13];
        let rank = Rank::from_u8((i % 13) as u8 + 2)?;
        Some(Card { suit, rank })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let err = || ParseCardError(s.to_string());
        let suit_char = t.chars().last().ok_or_else(err)?;
        let rank_part = &t[..t.len() - suit_char.len_utf8()];
        let suit = Suit::from_symbol(suit_char).ok_or_else(err)?;
        let rank: Rank = rank_part.parse().map_err(|_| err())?;
        Ok(Card { suit, rank })
    }
}

/// Parses a whitespace or comma separated list such as `"As Kd, 7c"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, ParseCardError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}

/// Bit set over the 52 cards, indexed by [`Card::index`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct CardMask(u64);

impl CardMask {
    pub fn new() -> Self {
        CardMask(0)
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        let mut m = CardMask::new();
        for &c in cards {
            m.insert(c);
        }
        m
    }

    /// Returns false if the card was already present.
    pub fn insert(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.index();
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0 & (1u64 << card.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Every card of the deck not present in `known`, in deck order.
pub fn unseen_cards(known: &[Card]) -> Vec<Card> {
    let mask = CardMask::from_cards(known);
    full_deck()
        .into_iter()
        .filter(|c| !mask.contains(*c))
        .collect()
}

/// Compact set of ranks, bit `r` set for rank value `r`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RankSet(u16);

const ALL_RANK_BITS: u16 = 0x7ffc;

impl RankSet {
    pub fn new() -> Self {
        RankSet(0)
    }

    pub fn full() -> Self {
        RankSet(ALL_RANK_BITS)
    }

    /// Inclusive range `lo..=hi`; empty when `lo > hi`.
    pub fn range(lo: Rank, hi: Rank) -> Self {
        let mut s = RankSet::new();
        for v in lo.value()..=hi.value() {
            s.0 |= 1 << v;
        }
        s
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        let mut s = RankSet::new();
        for c in cards {
            s.insert(c.rank);
        }
        s
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn insert(&mut self, rank: Rank) {
        self.0 |= 1 << rank.value();
    }

    pub fn contains(self, rank: Rank) -> bool {
        self.0 & (1 << rank.value()) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: RankSet) -> RankSet {
        RankSet(self.0 | other.0)
    }

    pub fn intersects(self, other: RankSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Ranks in ascending order.
    pub fn iter(self) -> impl Iterator<Item = Rank> {
        all_ranks().into_iter().filter(move |r| self.contains(*r))
    }

    pub fn highest(self) -> Option<Rank> {
        self.iter().last()
    }

    /// High card of the best five-in-a-row contained in the set, ace playing low as well.
    pub fn straight_high(self) -> Option<u8> {
        let mut m = self.0;
        if m & (1 << 14) != 0 {
            m |= 1 << 1;
        }
        for high in (5..=14u16).rev() {
            let window = 0b11111u16 << (high - 4);
            if m & window == window {
                return Some(high as u8);
            }
        }
        None
    }
}

impl fmt::Display for RankSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        let mut run: Option<(Rank, Rank)> = None;
        for r in self.iter() {
            run = match run {
                Some((lo, hi)) if hi.value() + 1 == r.value() => Some((lo, r)),
                Some((lo, hi)) => {
                    parts.push(format_run(lo, hi));
                    Some((r, r))
                }
                None => Some((r, r)),
            };
        }
        if let Some((lo, hi)) = run {
            parts.push(format_run(lo, hi));
        }
        write!(f, "{}", parts.join(","))
    }
}

fn format_run(lo: Rank, hi: Rank) -> String {
    if lo == hi {
        lo.to_string()
    } else {
        format!("{}-{}", lo, hi)
    }
}

impl FromStr for RankSet {
    type Err = ParseCardError;

    /// Accepts comma separated ranks or ranges: `"2-J"`, `"Q,K,A"`, `"T-Q,A"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = RankSet::new();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.split_once('-') {
                Some((lo, hi)) => {
                    let lo: Rank = lo.parse()?;
                    let hi: Rank = hi.parse()?;
                    if lo > hi {
                        return Err(ParseCardError(token.to_string()));
                    }
                    set = set.union(RankSet::range(lo, hi));
                }
                None => set.insert(token.parse()?),
            }
        }
        if set.is_empty() {
            return Err(ParseCardError(s.to_string()));
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_index_round_trips_for_whole_deck() {
        for c in full_deck() {
            assert_eq!(Card::from_index(c.index()), Some(c));
        }
        assert_eq!(Card::from_index(52), None);
    }

    #[test]
    fn parses_ten_in_both_spellings() {
        assert_eq!("10h".parse::<Card>().unwrap(), "Th".parse::<Card>().unwrap());
        assert!("1h".parse::<Card>().is_err());
        assert!("Ax".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn rank_set_display_compresses_runs() {
        let s: RankSet = "2-J".parse().unwrap();
        assert_eq!(s.len(), 10);
        assert_eq!(s.to_string(), "2-J");
        let t: RankSet = "Q,A,K".parse().unwrap();
        assert_eq!(t.to_string(), "Q-A");
        let u: RankSet = "2,4-5,K".parse().unwrap();
        assert_eq!(u.to_string(), "2,4-5,K");
    }

    #[test]
    fn straight_high_handles_wheel_and_broadway() {
        let wheel = RankSet::from_cards(&parse_cards("As 2d 3c 4h 5s").unwrap());
        assert_eq!(wheel.straight_high(), Some(5));
        let broadway = RankSet::range(Rank::Ten, Rank::Ace);
        assert_eq!(broadway.straight_high(), Some(14));
        let gap = RankSet::from_cards(&parse_cards("9s Td Jc Kh As").unwrap());
        assert_eq!(gap.straight_high(), None);
    }

    #[test]
    fn unseen_cards_skips_known() {
        let known = parse_cards("As Kd").unwrap();
        let rest = unseen_cards(&known);
        assert_eq!(rest.len(), 50);
        assert!(!rest.contains(&known[0]));
    }
}
