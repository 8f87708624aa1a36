//! One simulated hand: deal, reveal, decide, settle.

use serde::{Deserialize, Serialize};

use holecard_engine::cards::Card;
use holecard_engine::errors::{ConfigError, GameError, StateError};
use holecard_engine::game::{joined, GameRules, Observation, Variant};
use holecard_engine::hand::Category;
use holecard_engine::hole::{Granularity, HoleInfo};
use holecard_engine::rules::{Action, ActionSpace, Street};
use holecard_engine::shoe::Shoe;
use holecard_strategy::Strategy;

/// Most teammate seats a hold'em table leaves room for.
pub const MAX_PARTNERS: usize = 5;

/// Everything fixed across the trials of one run.
#[derive(Debug, Clone)]
pub struct TrialSpec {
    rules: GameRules,
    granularity: Granularity,
    peek: bool,
    partners: usize,
}

impl TrialSpec {
    /// # Errors
    ///
    /// [`ConfigError::InvalidHoleInfo`] when the granularity makes no sense for
    /// the variant or its rank bands do not partition the ranks.
    pub fn new(rules: GameRules, granularity: Granularity) -> Result<Self, ConfigError> {
        granularity.validate_for(rules.variant())?;
        Ok(Self {
            rules,
            granularity,
            peek: false,
            partners: 0,
        })
    }

    /// Flash the first flop card before the pre-flop decision.
    pub fn with_peek(mut self, peek: bool) -> Result<Self, ConfigError> {
        if peek && self.rules.variant() != Variant::UltimateHoldem {
            return Err(ConfigError::InvalidPlan(format!(
                "flashed flop card needs a board; {} has none",
                self.rules.variant()
            )));
        }
        self.peek = peek;
        Ok(self)
    }

    /// Teammate seats whose cards the player sees.
    pub fn with_partners(mut self, partners: usize) -> Result<Self, ConfigError> {
        if partners > 0 && self.rules.variant() != Variant::UltimateHoldem {
            return Err(ConfigError::InvalidPlan(format!(
                "team play is only modelled for {}",
                Variant::UltimateHoldem
            )));
        }
        if partners > MAX_PARTNERS {
            return Err(ConfigError::InvalidPlan(format!(
                "at most {} partners, got {}",
                MAX_PARTNERS, partners
            )));
        }
        self.partners = partners;
        Ok(self)
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn variant(&self) -> Variant {
        self.rules.variant()
    }

    pub fn granularity(&self) -> &Granularity {
        &self.granularity
    }

    pub fn peek(&self) -> bool {
        self.peek
    }

    pub fn partners(&self) -> usize {
        self.partners
    }
}

/// Cards of one hand, with what the player is told about the dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub hand: Vec<Card>,
    pub dealer: Vec<Card>,
    /// Full five-card board for hold'em, empty otherwise.
    pub board: Vec<Card>,
    pub partners: Vec<Vec<Card>>,
    pub hole: HoleInfo,
    pub peek: Option<Card>,
}

impl Deal {
    /// Deals a fresh hand from a shoe seeded with `seed`.
    ///
    /// The dealer is dealt first. The shoe is then reset to the pool the
    /// player cannot see: revealed dealer cards leave it, hidden ones stay in
    /// it but never reach a seat or the board. Every hole granularity deals
    /// the same cards for the same seed.
    ///
    /// # Errors
    ///
    /// Any shoe error.
    pub fn draw(spec: &TrialSpec, seed: u64) -> Result<Self, StateError> {
        let variant = spec.variant();
        let mut shoe = Shoe::seeded(seed, &[])?;
        let dealer = shoe.draw_random(variant.dealer_cards())?;
        let hole = spec.granularity.reveal(&dealer);
        shoe.reset();
        for &c in hole.known_cards() {
            shoe.remove(c)?;
        }
        let hand = shoe.draw_random_excluding(variant.player_cards(), &dealer)?;
        let partners = (0..spec.partners)
            .map(|_| shoe.draw_random_excluding(variant.player_cards(), &dealer))
            .collect::<Result<Vec<_>, _>>()?;
        let board = shoe.draw_random_excluding(variant.board_cards(), &dealer)?;
        let peek = if spec.peek { board.first().copied() } else { None };
        Ok(Self {
            hand,
            dealer,
            board,
            partners,
            hole,
            peek,
        })
    }

    /// Cards of `seat`: 0 is the main player, 1.. the partners.
    pub fn seat(&self, seat: usize) -> Option<&[Card]> {
        match seat {
            0 => Some(&self.hand),
            n => self.partners.get(n - 1).map(Vec::as_slice),
        }
    }

    pub fn seats(&self) -> usize {
        1 + self.partners.len()
    }

    /// What `seat` sees on `street`. Every other seat's cards are dead.
    pub fn observation(&self, street: Street, seat: usize) -> Observation {
        let hand = self.seat(seat).unwrap_or_default().to_vec();
        let dead = (0..self.seats())
            .filter(|&s| s != seat)
            .filter_map(|s| self.seat(s))
            .flatten()
            .copied()
            .collect();
        let shown = street.board_len().min(self.board.len());
        let peek = if street == Street::Preflop { self.peek } else { None };
        Observation::new(street, hand, self.hole.clone())
            .with_board(self.board[..shown].to_vec())
            .with_peek(peek)
            .with_dead(dead)
    }

    /// Net result for `hand` committing `action`, in antes.
    pub fn settle(&self, rules: &GameRules, hand: &[Card], action: Action) -> Result<f64, GameError> {
        match rules.variant() {
            Variant::ThreeCardPoker => rules.settle_three_card(hand, &self.dealer, action),
            Variant::UltimateHoldem => {
                rules.settle_holdem(hand, &self.dealer, &self.board, action.stake())
            }
        }
    }

    /// Final category of `hand` with the whole board.
    pub fn category(&self, rules: &GameRules, hand: &[Card]) -> Category {
        rules.rank(&joined(hand, &self.board)).category
    }
}

/// How one seat's hand ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatOutcome {
    pub net: f64,
    pub action: Action,
    pub street: Street,
}

/// Plays every street of `seat` with `strategy` until an action commits.
pub fn play_seat(
    rules: &GameRules,
    strategy: &dyn Strategy,
    deal: &Deal,
    seat: usize,
) -> Result<SeatOutcome, GameError> {
    let variant = rules.variant();
    let hand = deal.seat(seat).unwrap_or_default();
    let streets = Street::sequence(variant);
    for &street in streets {
        let legal = ActionSpace::for_street(variant, street)?;
        let action = strategy.decide(&deal.observation(street, seat), &legal)?;
        if action.is_terminal() {
            let net = deal.settle(rules, hand, action)?;
            return Ok(SeatOutcome {
                net,
                action,
                street,
            });
        }
    }
    // Only reachable if the last street allowed a check.
    Err(StateError::IllegalAction {
        action: Action::Check,
        street: streets.last().copied().unwrap_or(Street::Decision),
    }
    .into())
}

/// Result of one trial for the main seat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub net: f64,
    /// The action that committed the hand.
    pub action: Action,
    pub street: Street,
    pub category: Category,
    /// Main seat plus every partner.
    pub team_net: f64,
}

/// Deals and plays one hand from `seed`. No state survives the call.
pub fn run_trial(
    spec: &TrialSpec,
    strategy: &dyn Strategy,
    seed: u64,
) -> Result<TrialResult, GameError> {
    let deal = Deal::draw(spec, seed)?;
    let main = play_seat(&spec.rules, strategy, &deal, 0)?;
    let mut team_net = main.net;
    for seat in 1..deal.seats() {
        team_net += play_seat(&spec.rules, strategy, &deal, seat)?.net;
    }
    tracing::trace!(seed, net = main.net, action = %main.action, street = %main.street, "trial settled");
    Ok(TrialResult {
        net: main.net,
        action: main.action,
        street: main.street,
        category: deal.category(&spec.rules, &deal.hand),
        team_net,
    })
}
