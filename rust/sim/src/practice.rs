//! Hand-by-hand play for a human, checked against a strategy.
//!
//! A [`PracticeHand`] is an immutable value: [`PracticeHand::apply_action`]
//! consumes it and returns the next state, so a front end only ever holds the
//! current one.

use serde::{Deserialize, Serialize};

use holecard_engine::cards::Card;
use holecard_engine::errors::{GameError, StateError};
use holecard_engine::game::{joined, Observation};
use holecard_engine::hand::Category;
use holecard_engine::rules::{validate_action, Action, ActionSpace, Street};
use holecard_strategy::Strategy;

use crate::stats::RunningStats;
use crate::trial::{play_seat, Deal, TrialSpec};

/// A decision the player has to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionPoint {
    pub observation: Observation,
    pub legal: ActionSpace,
}

impl DecisionPoint {
    pub fn street(&self) -> Street {
        self.observation.street
    }
}

/// Final accounting of a practice hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub net: f64,
    pub action: Action,
    pub street: Street,
    pub player: Vec<Card>,
    pub dealer: Vec<Card>,
    pub board: Vec<Card>,
    pub player_category: Category,
    pub dealer_category: Category,
    pub dealer_qualified: bool,
}

#[derive(Debug, Clone)]
pub struct PracticeHand {
    spec: TrialSpec,
    deal: Deal,
    street: usize,
    settled: bool,
}

impl PracticeHand {
    pub fn deal(spec: &TrialSpec, seed: u64) -> Result<Self, GameError> {
        let deal = Deal::draw(spec, seed)?;
        Ok(Self::from_deal(spec, deal))
    }

    /// Starts a hand from fixed cards.
    pub fn from_deal(spec: &TrialSpec, deal: Deal) -> Self {
        Self {
            spec: spec.clone(),
            deal,
            street: 0,
            settled: false,
        }
    }

    pub fn cards(&self) -> &Deal {
        &self.deal
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    fn streets(&self) -> &'static [Street] {
        Street::sequence(self.spec.variant())
    }

    /// `None` once the hand is settled.
    pub fn next_decision_point(&self) -> Option<DecisionPoint> {
        if self.settled {
            return None;
        }
        let street = *self.streets().get(self.street)?;
        let legal = ActionSpace::for_street(self.spec.variant(), street).ok()?;
        Some(DecisionPoint {
            observation: self.deal.observation(street, 0),
            legal,
        })
    }

    /// Applies the player's action. Returns the settlement when it ends the hand.
    ///
    /// # Errors
    ///
    /// [`StateError::HandSettled`] after the hand is over,
    /// [`StateError::IllegalAction`] for an action outside the street's space.
    pub fn apply_action(self, action: Action) -> Result<(Self, Option<Settlement>), GameError> {
        let point = self.next_decision_point().ok_or(StateError::HandSettled)?;
        validate_action(&point.legal, action)?;
        if !action.is_terminal() {
            let next = Self {
                street: self.street + 1,
                ..self
            };
            return Ok((next, None));
        }
        let settlement = self.settle(action, point.street())?;
        tracing::debug!(action = %action, net = settlement.net, "practice hand settled");
        Ok((
            Self {
                settled: true,
                ..self
            },
            Some(settlement),
        ))
    }

    fn settle(&self, action: Action, street: Street) -> Result<Settlement, GameError> {
        let rules = self.spec.rules();
        let deal = &self.deal;
        let net = deal.settle(rules, &deal.hand, action)?;
        let dealer = rules.rank(&joined(&deal.dealer, &deal.board));
        Ok(Settlement {
            net,
            action,
            street,
            player: deal.hand.clone(),
            dealer: deal.dealer.clone(),
            board: deal.board.clone(),
            player_category: deal.category(rules, &deal.hand),
            dealer_category: dealer.category,
            dealer_qualified: rules.dealer_qualifies(&dealer),
        })
    }

    /// What `strategy` would do at the current decision point.
    pub fn recommended(&self, strategy: &dyn Strategy) -> Result<Option<Action>, GameError> {
        match self.next_decision_point() {
            Some(point) => Ok(Some(strategy.decide(&point.observation, &point.legal)?)),
            None => Ok(None),
        }
    }

    /// The whole hand as `strategy` plays it from the deal.
    pub fn autoplay(&self, strategy: &dyn Strategy) -> Result<Settlement, GameError> {
        let rules = self.spec.rules();
        let outcome = play_seat(rules, strategy, &self.deal, 0)?;
        self.settle(outcome.action, outcome.street)
    }
}

/// Running score of a practice session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PracticeSummary {
    pub hands: u64,
    /// Decisions where the player differed from the strategy.
    pub mistakes: u64,
    pub player: RunningStats,
    pub strategy: RunningStats,
    pub categories: Vec<(Category, Category)>,
}

impl PracticeSummary {
    pub fn record(&mut self, player: &Settlement, computer: &Settlement, mistakes: u64) {
        self.hands += 1;
        self.mistakes += mistakes;
        self.player.push(player.net);
        self.strategy.push(computer.net);
        self.categories
            .push((player.player_category, player.dealer_category));
    }

    /// Antes the player's deviations cost (negative when they paid off).
    pub fn cost_of_mistakes(&self) -> f64 {
        let total = |s: &RunningStats| s.mean() * s.count() as f64;
        total(&self.strategy) - total(&self.player)
    }
}
