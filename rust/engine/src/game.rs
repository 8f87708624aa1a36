use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::{unseen_cards, Card};
use crate::errors::{ConfigError, GameError};
use crate::hand::{Category, HandRanker, HandStrength, StandardRanker, ThreeCardRanker};
use crate::hole::HoleInfo;
use crate::payout::{BetType, PayoutTable};
use crate::rules::{Action, Street};

/// Supported table games.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Three card poker: ante and play, dealer qualifies with queen high.
    #[serde(rename = "ocp")]
    ThreeCardPoker,
    /// Ultimate Texas Hold'em: ante and blind, play bet of 4x, 2x or 1x.
    #[serde(rename = "uth")]
    UltimateHoldem,
}

impl Variant {
    pub fn player_cards(self) -> usize {
        match self {
            Variant::ThreeCardPoker => 3,
            Variant::UltimateHoldem => 2,
        }
    }

    pub fn dealer_cards(self) -> usize {
        self.player_cards()
    }

    pub fn board_cards(self) -> usize {
        match self {
            Variant::ThreeCardPoker => 0,
            Variant::UltimateHoldem => 5,
        }
    }

    /// Categories the variant's hands can reach.
    pub fn categories(self) -> &'static [Category] {
        match self {
            Variant::ThreeCardPoker => &[
                Category::HighCard,
                Category::OnePair,
                Category::Flush,
                Category::Straight,
                Category::ThreeOfAKind,
                Category::StraightFlush,
            ],
            Variant::UltimateHoldem => &[
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
            ],
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::ThreeCardPoker => write!(f, "ocp"),
            Variant::UltimateHoldem => write!(f, "uth"),
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ocp" | "3cp" | "three-card" | "three_card" => Ok(Variant::ThreeCardPoker),
            "uth" | "holdem" | "ultimate" => Ok(Variant::UltimateHoldem),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Immutable game configuration shared by every trial of a run.
///
/// ```rust
/// use holecard_engine::cards::parse_cards;
/// use holecard_engine::game::{GameRules, Variant};
/// use holecard_engine::rules::Action;
///
/// let rules = GameRules::standard(Variant::ThreeCardPoker);
/// let player = parse_cards("Ah Kh Qh").unwrap();
/// let dealer = parse_cards("2c 7d 9s").unwrap();
/// // Dealer does not qualify: ante wins, play pushes, straight flush bonus 5.
/// let net = rules.settle_three_card(&player, &dealer, Action::Call).unwrap();
/// assert_eq!(net, 6.0);
/// ```
#[derive(Clone)]
pub struct GameRules {
    variant: Variant,
    payouts: Arc<PayoutTable>,
    ranker: Arc<dyn HandRanker>,
}

impl fmt::Debug for GameRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameRules")
            .field("variant", &self.variant)
            .field("ranker", &self.ranker.name())
            .field("ante_bonus_on_loss", &self.payouts.ante_bonus_on_loss)
            .finish()
    }
}

impl GameRules {
    /// Standard payouts and the variant's default ranker.
    pub fn standard(variant: Variant) -> Self {
        Self {
            variant,
            payouts: Arc::new(PayoutTable::standard(variant)),
            ranker: default_ranker(variant),
        }
    }

    pub fn with_payouts(table: PayoutTable) -> Result<Self, ConfigError> {
        table.validate()?;
        Ok(Self {
            variant: table.variant,
            ranker: default_ranker(table.variant),
            payouts: Arc::new(table),
        })
    }

    /// Swaps in another ranking oracle.
    pub fn with_ranker(mut self, ranker: Arc<dyn HandRanker>) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn payouts(&self) -> &PayoutTable {
        &self.payouts
    }

    pub fn ranker(&self) -> &dyn HandRanker {
        self.ranker.as_ref()
    }

    pub fn rank(&self, cards: &[Card]) -> HandStrength {
        self.ranker.rank(cards)
    }

    /// Queen high or better for three card poker, a pair or better for hold'em.
    pub fn dealer_qualifies(&self, dealer: &HandStrength) -> bool {
        match self.variant {
            Variant::ThreeCardPoker => {
                dealer.category != Category::HighCard || dealer.kickers[0] >= 12
            }
            Variant::UltimateHoldem => dealer.category != Category::HighCard,
        }
    }

    /// Net result in antes of a three card poker hand.
    pub fn settle_three_card(
        &self,
        player: &[Card],
        dealer: &[Card],
        action: Action,
    ) -> Result<f64, GameError> {
        if action == Action::Fold {
            return Ok(-1.0);
        }
        let p = self.rank(player);
        let d = self.rank(dealer);
        let table = &self.payouts;
        let mut net = if !self.dealer_qualifies(&d) {
            table.payout(p.category, BetType::Ante)?
        } else {
            match p.cmp(&d) {
                Ordering::Greater => {
                    table.payout(p.category, BetType::Ante)?
                        + table.payout(p.category, BetType::Play)?
                }
                Ordering::Less => -2.0,
                Ordering::Equal => 0.0,
            }
        };
        if p >= d || table.ante_bonus_on_loss {
            net += table.payout(p.category, BetType::AnteBonus)?;
        }
        Ok(net)
    }

    /// Net result in antes of a hold'em hand; `stake` is the play multiple, 0 for a fold.
    pub fn settle_holdem(
        &self,
        hand: &[Card],
        dealer: &[Card],
        board: &[Card],
        stake: u8,
    ) -> Result<f64, GameError> {
        if stake == 0 {
            return Ok(-2.0);
        }
        let p = self.rank(&joined(hand, board));
        let d = self.rank(&joined(dealer, board));
        let qualifies = self.dealer_qualifies(&d);
        let stake = f64::from(stake);
        let table = &self.payouts;
        let net = match p.cmp(&d) {
            Ordering::Equal => 0.0,
            Ordering::Less => -stake - 1.0 - if qualifies { 1.0 } else { 0.0 },
            Ordering::Greater => {
                let ante = if qualifies {
                    table.payout(p.category, BetType::Ante)?
                } else {
                    0.0
                };
                stake * table.payout(p.category, BetType::Play)?
                    + ante
                    + table.payout(p.category, BetType::Blind)?
            }
        };
        Ok(net)
    }
}

fn default_ranker(variant: Variant) -> Arc<dyn HandRanker> {
    match variant {
        Variant::ThreeCardPoker => Arc::new(ThreeCardRanker),
        Variant::UltimateHoldem => Arc::new(StandardRanker),
    }
}

pub fn joined(a: &[Card], b: &[Card]) -> Vec<Card> {
    let mut v = Vec::with_capacity(a.len() + b.len());
    v.extend_from_slice(a);
    v.extend_from_slice(b);
    v
}

/// Everything the player can see at one decision point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub street: Street,
    pub hand: Vec<Card>,
    /// Community cards visible on this street.
    pub board: Vec<Card>,
    pub hole: HoleInfo,
    /// First flop card flashed before the pre-flop decision.
    pub peek: Option<Card>,
    /// Cards known to be out of play, such as a teammate's hand.
    pub dead: Vec<Card>,
}

impl Observation {
    pub fn new(street: Street, hand: Vec<Card>, hole: HoleInfo) -> Self {
        Self {
            street,
            hand,
            board: Vec::new(),
            hole,
            peek: None,
            dead: Vec::new(),
        }
    }

    pub fn with_board(mut self, board: Vec<Card>) -> Self {
        self.board = board;
        self
    }

    pub fn with_peek(mut self, peek: Option<Card>) -> Self {
        self.peek = peek;
        self
    }

    pub fn with_dead(mut self, dead: Vec<Card>) -> Self {
        self.dead = dead;
        self
    }

    /// Cards whose location the player knows.
    pub fn known(&self) -> Vec<Card> {
        let mut v = joined(&self.hand, &self.board);
        v.extend(self.peek);
        v.extend_from_slice(&self.dead);
        v.extend_from_slice(self.hole.known_cards());
        v
    }

    /// Cards the player has not seen, deck order.
    pub fn unseen(&self) -> Vec<Card> {
        unseen_cards(&self.known())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    #[test]
    fn three_card_bonus_withheld_on_loss_when_disabled() {
        let mut table = PayoutTable::standard(Variant::ThreeCardPoker);
        table.ante_bonus_on_loss = false;
        let rules = GameRules::with_payouts(table).unwrap();
        let straight = cards("4s 5d 6c");
        let trips = cards("9s 9d 9c");
        assert_eq!(rules.settle_three_card(&straight, &trips, Action::Call), Ok(-2.0));
        let paying = GameRules::standard(Variant::ThreeCardPoker);
        assert_eq!(paying.settle_three_card(&straight, &trips, Action::Call), Ok(-1.0));
    }

    #[test]
    fn holdem_fold_costs_ante_and_blind() {
        let rules = GameRules::standard(Variant::UltimateHoldem);
        let net = rules
            .settle_holdem(&cards("2c 7d"), &cards("As Ad"), &cards("Kh Qh 9s 5c 3d"), 0)
            .unwrap();
        assert_eq!(net, -2.0);
    }

    #[test]
    fn holdem_flush_win_pays_blind_bonus() {
        let rules = GameRules::standard(Variant::UltimateHoldem);
        let net = rules
            .settle_holdem(&cards("Qh 9s"), &cards("8h 2c"), &cards("Jh Th 3h Ah 2h"), 2)
            .unwrap();
        // play 2 + ante 1 (dealer flush qualifies) + flush 1.5
        assert_eq!(net, 4.5);
    }

    #[test]
    fn holdem_loss_to_unqualified_dealer_keeps_ante() {
        let rules = GameRules::standard(Variant::UltimateHoldem);
        let net = rules
            .settle_holdem(&cards("3c 4d"), &cards("Ac Kd"), &cards("Qh Jh 8s 7c 2d"), 1)
            .unwrap();
        assert_eq!(net, -2.0);
    }

    #[test]
    fn unseen_excludes_everything_known() {
        let obs = Observation::new(Street::Preflop, cards("As Ks"), HoleInfo::ExactCard("Qd".parse().unwrap()))
            .with_peek(Some("Jc".parse().unwrap()))
            .with_dead(cards("2h 3h"));
        assert_eq!(obs.unseen().len(), 52 - 6);
    }
}
