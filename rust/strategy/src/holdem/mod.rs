//! Ultimate Texas Hold'em play.
//!
//! Streets are pre-flop (check or 4x), flop (check or 2x) and river (fold or
//! 1x); a bet ends the hand's decisions. [`HoldemHolecard`] picks its rule set
//! from the observation's hole information:
//!
//! - unknown: the basic chart in [`basic`]
//! - one dealer card: the one-card rules in [`one_card`], with the pre-flop
//!   peek rules when the first flop card was flashed
//! - both dealer cards: exact comparison and enumeration in [`full`]

use holecard_engine::cards::Card;
use holecard_engine::errors::{GameError, StateError};
use holecard_engine::game::{GameRules, Observation, Variant};
use holecard_engine::hole::HoleInfo;
use holecard_engine::rules::{Action, Street};

use crate::Strategy;

pub mod basic;
pub mod full;
pub mod one_card;
pub mod texture;

/// The first `n` board cards of the observation.
pub(crate) fn board_for(obs: &Observation, n: usize) -> Result<&[Card], GameError> {
    obs.board.get(..n).ok_or_else(|| {
        GameError::from(StateError::InsufficientCards {
            requested: n,
            remaining: obs.board.len(),
        })
    })
}

fn check_street(obs: &Observation) -> Result<(), GameError> {
    if obs.street == Street::Decision {
        return Err(StateError::InvalidStreet {
            variant: Variant::UltimateHoldem,
            street: obs.street,
        }
        .into());
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct HoldemBasic {
    rules: GameRules,
}

impl HoldemBasic {
    pub fn new(rules: GameRules) -> Self {
        Self { rules }
    }
}

impl Strategy for HoldemBasic {
    fn choose(&self, obs: &Observation) -> Result<Action, GameError> {
        check_street(obs)?;
        basic::decide(&self.rules, obs)
    }

    fn name(&self) -> &str {
        "basic"
    }
}

#[derive(Debug, Clone)]
pub struct HoldemHolecard {
    rules: GameRules,
}

impl HoldemHolecard {
    pub fn new(rules: GameRules) -> Self {
        Self { rules }
    }
}

impl Strategy for HoldemHolecard {
    fn choose(&self, obs: &Observation) -> Result<Action, GameError> {
        check_street(obs)?;
        obs.hole.validate_for(Variant::UltimateHoldem)?;
        match &obs.hole {
            HoleInfo::ExactCard(dealer) => one_card::decide(&self.rules, obs, *dealer),
            HoleInfo::FullHand(dealer) => full::decide(&self.rules, obs, dealer),
            _ => basic::decide(&self.rules, obs),
        }
    }

    fn name(&self) -> &str {
        "holecard"
    }
}
