//! Three card poker play.
//!
//! Basic strategy calls with queen-six-four or better. Hole-carding keys off
//! the dealer's first card: below a queen always call, otherwise call with
//! the matching X-9-2 or better. Rank ranges, full knowledge and the
//! configured range policy refine that table.

use std::collections::HashMap;
use std::sync::RwLock;

use holecard_engine::cards::{Card, CardMask, Rank, RankSet, Suit};
use holecard_engine::errors::GameError;
use holecard_engine::game::{GameRules, Observation, Variant};
use holecard_engine::hand::HandStrength;
use holecard_engine::hole::HoleInfo;
use holecard_engine::rules::Action;

use crate::{RangePolicy, Strategy};

/// High card reference hand in mixed suits.
fn reference(rules: &GameRules, ranks: [Rank; 3]) -> HandStrength {
    let suits = [Suit::Spades, Suit::Hearts, Suit::Clubs];
    let cards: Vec<Card> = ranks
        .into_iter()
        .zip(suits)
        .map(|(r, s)| Card::new(r, s))
        .collect();
    rules.rank(&cards)
}

fn call_or_fold(call: bool) -> Action {
    if call { Action::Call } else { Action::Fold }
}

#[derive(Debug, Clone)]
pub struct ThreeCardBasic {
    rules: GameRules,
    call_at: HandStrength,
}

impl ThreeCardBasic {
    pub fn new(rules: GameRules) -> Self {
        let call_at = reference(&rules, [Rank::Queen, Rank::Six, Rank::Four]);
        Self { rules, call_at }
    }

    fn action_for(&self, hand: &[Card]) -> Action {
        call_or_fold(self.rules.rank(hand) >= self.call_at)
    }
}

impl Strategy for ThreeCardBasic {
    fn choose(&self, obs: &Observation) -> Result<Action, GameError> {
        Ok(self.action_for(&obs.hand))
    }

    fn name(&self) -> &str {
        "basic"
    }
}

/// Hole-carding play for three card poker.
#[derive(Debug)]
pub struct ThreeCardHolecard {
    rules: GameRules,
    policy: RangePolicy,
    basic: ThreeCardBasic,
    /// Minimum hands calling against a queen, king and ace.
    vs_queen: HandStrength,
    vs_king: HandStrength,
    vs_ace: HandStrength,
    range_cache: RwLock<HashMap<(CardMask, RankSet), Action>>,
}

impl ThreeCardHolecard {
    pub fn new(rules: GameRules, policy: RangePolicy) -> Self {
        Self {
            vs_queen: reference(&rules, [Rank::Queen, Rank::Nine, Rank::Two]),
            vs_king: reference(&rules, [Rank::King, Rank::Nine, Rank::Two]),
            vs_ace: reference(&rules, [Rank::Ace, Rank::Nine, Rank::Two]),
            basic: ThreeCardBasic::new(rules.clone()),
            rules,
            policy,
            range_cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Decision when the dealer's first card has rank `dealer`.
    pub fn exact_rank_action(&self, hand: &HandStrength, dealer: Rank) -> Action {
        let threshold = match dealer {
            Rank::Queen => &self.vs_queen,
            Rank::King => &self.vs_king,
            Rank::Ace => &self.vs_ace,
            _ => return Action::Call,
        };
        call_or_fold(hand >= threshold)
    }

    fn range_action(&self, obs: &Observation, ranks: RankSet) -> Result<Action, GameError> {
        let strength = self.rules.rank(&obs.hand);
        let mut decisions = ranks.iter().map(|r| self.exact_rank_action(&strength, r));
        let first = decisions.next().unwrap_or(Action::Fold);
        if decisions.all(|a| a == first) {
            tracing::trace!(range = %ranks, action = %first, "range agrees on one action");
            return Ok(first);
        }
        match self.policy {
            // Some rank folds, so not every rank calls.
            RangePolicy::Minimax => Ok(Action::Fold),
            RangePolicy::Expectation => {
                let mut known = obs.hand.clone();
                known.extend_from_slice(&obs.dead);
                let key = (CardMask::from_cards(&known), ranks);
                if let Some(&cached) = self
                    .range_cache
                    .read()
                    .expect("range cache lock poisoned")
                    .get(&key)
                {
                    return Ok(cached);
                }
                let ev = self.range_call_ev(obs, ranks)?;
                // Fold returns -1; ties go to the smaller stake.
                let action = call_or_fold(ev > -1.0);
                tracing::trace!(range = %ranks, ev, action = %action, "range resolved by expectation");
                self.range_cache
                    .write()
                    .expect("range cache lock poisoned")
                    .insert(key, action);
                Ok(action)
            }
        }
    }

    /// Conditional EV of calling given the dealer's first card is in `ranks`.
    ///
    /// Each unordered dealer hand is weighted by how many of its cards could
    /// have been the exposed first card.
    pub fn range_call_ev(&self, obs: &Observation, ranks: RankSet) -> Result<f64, GameError> {
        let unseen = obs.unseen();
        let mut total = 0.0;
        let mut weight = 0u64;
        for i in 0..unseen.len() {
            for j in i + 1..unseen.len() {
                for k in j + 1..unseen.len() {
                    let dealer = [unseen[i], unseen[j], unseen[k]];
                    let w = dealer.iter().filter(|c| ranks.contains(c.rank)).count() as u64;
                    if w == 0 {
                        continue;
                    }
                    let net = self
                        .rules
                        .settle_three_card(&obs.hand, &dealer, Action::Call)?;
                    total += net * w as f64;
                    weight += w;
                }
            }
        }
        if weight == 0 {
            return Ok(0.0);
        }
        Ok(total / weight as f64)
    }

    fn full_hand_action(&self, hand: &[Card], dealer: &[Card]) -> Result<Action, GameError> {
        let d = self.rules.rank(dealer);
        if !self.rules.dealer_qualifies(&d) {
            tracing::trace!("dealer cannot qualify");
            return Ok(Action::Call);
        }
        let call = self.rules.settle_three_card(hand, dealer, Action::Call)?;
        let fold = self.rules.settle_three_card(hand, dealer, Action::Fold)?;
        Ok(call_or_fold(call > fold))
    }
}

impl Strategy for ThreeCardHolecard {
    fn choose(&self, obs: &Observation) -> Result<Action, GameError> {
        obs.hole.validate_for(Variant::ThreeCardPoker)?;
        let action = match &obs.hole {
            HoleInfo::Unknown => self.basic.action_for(&obs.hand),
            HoleInfo::ExactCard(c) => self.exact_rank_action(&self.rules.rank(&obs.hand), c.rank),
            HoleInfo::ExactRank(r) => self.exact_rank_action(&self.rules.rank(&obs.hand), *r),
            HoleInfo::RankRange(ranks) => self.range_action(obs, *ranks)?,
            HoleInfo::FullHand(dealer) => self.full_hand_action(&obs.hand, dealer)?,
        };
        tracing::trace!(hole = %obs.hole, action = %action, "three card decision");
        Ok(action)
    }

    fn name(&self) -> &str {
        "holecard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holecard_engine::cards::parse_cards;
    use holecard_engine::rules::Street;

    fn obs(hand: &str, hole: HoleInfo) -> Observation {
        Observation::new(Street::Decision, parse_cards(hand).unwrap(), hole)
    }

    fn holecard() -> ThreeCardHolecard {
        ThreeCardHolecard::new(
            GameRules::standard(Variant::ThreeCardPoker),
            RangePolicy::Expectation,
        )
    }

    #[test]
    fn basic_threshold_is_queen_six_four() {
        let s = ThreeCardBasic::new(GameRules::standard(Variant::ThreeCardPoker));
        assert_eq!(s.choose(&obs("Qs 6d 4c", HoleInfo::Unknown)).unwrap(), Action::Call);
        assert_eq!(s.choose(&obs("Qs 6d 3c", HoleInfo::Unknown)).unwrap(), Action::Fold);
        assert_eq!(s.choose(&obs("2s 2d 3c", HoleInfo::Unknown)).unwrap(), Action::Call);
    }

    #[test]
    fn unknown_hole_falls_back_to_basic() {
        let s = holecard();
        assert_eq!(s.choose(&obs("Qs 5d 4c", HoleInfo::Unknown)).unwrap(), Action::Fold);
    }

    #[test]
    fn full_hand_calls_unqualified_dealer() {
        let s = holecard();
        let dealer = parse_cards("Js 8d 3h").unwrap();
        let o = obs("5s 3d 2c", HoleInfo::FullHand(dealer));
        assert_eq!(s.choose(&o).unwrap(), Action::Call);
    }

    #[test]
    fn full_hand_folds_sure_loss_but_calls_paying_trips() {
        let s = holecard();
        let aces = parse_cards("As Ad Ah").unwrap();
        assert_eq!(
            s.choose(&obs("Ks Kd 2c", HoleInfo::FullHand(aces.clone()))).unwrap(),
            Action::Fold
        );
        // Straight loses to trips but the bonus makes -1 a tie with folding.
        assert_eq!(
            s.choose(&obs("9s Td Jc", HoleInfo::FullHand(aces.clone()))).unwrap(),
            Action::Fold
        );
        // Trips lose to higher trips yet the 4x bonus pays more than the fold.
        assert_eq!(
            s.choose(&obs("Ks Kd Kc", HoleInfo::FullHand(aces))).unwrap(),
            Action::Call
        );
    }

    #[test]
    fn uniform_range_uses_table_without_enumeration() {
        let s = holecard();
        let low = RankSet::range(Rank::Two, Rank::Jack);
        assert_eq!(
            s.choose(&obs("7c 4d 2s", HoleInfo::RankRange(low))).unwrap(),
            Action::Call
        );
    }
}
