//! # holecard-strategy: Decision Policies
//!
//! Deterministic policies mapping what the player sees to an action, for
//! three card poker and Ultimate Texas Hold'em. Every policy answers through
//! the same [`Strategy`] trait so the simulator, the practice loop and the
//! CLI never care which one is in use.
//!
//! ## Core Components
//!
//! - [`Strategy`] - Trait defining the interface for decision-making
//! - [`three_card`] - Basic and hole-carding play for three card poker
//! - [`holdem`] - Basic, one-card, one 'n' one and full-knowledge hold'em play
//! - [`create_strategy`] - Factory building a strategy for a game configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use holecard_engine::cards::parse_cards;
//! use holecard_engine::game::{GameRules, Observation, Variant};
//! use holecard_engine::hole::HoleInfo;
//! use holecard_engine::rules::{Action, ActionSpace, Street};
//! use holecard_strategy::{create_strategy, RangePolicy, StrategyKind};
//!
//! let rules = GameRules::standard(Variant::ThreeCardPoker);
//! let strategy = create_strategy(&rules, StrategyKind::Holecard, RangePolicy::default()).unwrap();
//!
//! // Dealer shows a jack: any hand calls.
//! let obs = Observation::new(
//!     Street::Decision,
//!     parse_cards("7c 4d 2s").unwrap(),
//!     HoleInfo::ExactCard("Jh".parse().unwrap()),
//! );
//! let legal = ActionSpace::for_street(Variant::ThreeCardPoker, Street::Decision).unwrap();
//! assert_eq!(strategy.decide(&obs, &legal).unwrap(), Action::Call);
//! ```
//!
//! ## Strategy Kinds
//!
//! - `"basic"` - Uses the player's own cards only
//! - `"holecard"` - Uses whatever [`HoleInfo`](holecard_engine::hole::HoleInfo) the observation carries
//! - `"ono"` - Hold'em hole-carding that also expects the flashed first flop card

use std::fmt;
use std::str::FromStr;

use holecard_engine::errors::{ConfigError, GameError};
use holecard_engine::game::{GameRules, Observation, Variant};
use holecard_engine::rules::{validate_action, Action, ActionSpace};

pub mod holdem;
pub mod three_card;

/// Interface shared by every decision policy.
///
/// Implementations hold no mutable state between calls (caches excepted)
/// and never draw random numbers, so the same observation always yields the
/// same action.
///
/// # Example Implementation
///
/// ```rust
/// use holecard_engine::errors::GameError;
/// use holecard_engine::game::Observation;
/// use holecard_engine::rules::Action;
/// use holecard_strategy::Strategy;
///
/// struct AlwaysCall;
///
/// impl Strategy for AlwaysCall {
///     fn choose(&self, _obs: &Observation) -> Result<Action, GameError> {
///         Ok(Action::Call)
///     }
///
///     fn name(&self) -> &str {
///         "always-call"
///     }
/// }
/// ```
pub trait Strategy: Send + Sync {
    /// Computes the preferred action for the observation.
    ///
    /// # Errors
    ///
    /// A configuration error when the observation carries hole information
    /// the policy cannot use for its variant.
    fn choose(&self, obs: &Observation) -> Result<Action, GameError>;

    /// Identifier used in reports and logs.
    fn name(&self) -> &str;

    /// Chooses an action and checks it against the legal actions.
    ///
    /// # Errors
    ///
    /// Everything [`choose`](Strategy::choose) returns, plus
    /// [`StateError::IllegalAction`](holecard_engine::errors::StateError::IllegalAction)
    /// when the chosen action is not in `legal`.
    fn decide(&self, obs: &Observation, legal: &ActionSpace) -> Result<Action, GameError> {
        let action = self.choose(obs)?;
        Ok(validate_action(legal, action)?)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StrategyKind {
    Basic,
    Holecard,
    /// Hold'em hole-carding with the flashed first flop card.
    OneNOne,
}

impl StrategyKind {
    /// True when trials must flash the first flop card before pre-flop.
    pub fn uses_peek(self) -> bool {
        matches!(self, StrategyKind::OneNOne)
    }

    pub fn uses_hole_info(self) -> bool {
        !matches!(self, StrategyKind::Basic)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrategyKind::Basic => "basic",
            StrategyKind::Holecard => "holecard",
            StrategyKind::OneNOne => "ono",
        };
        f.write_str(s)
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(StrategyKind::Basic),
            "holecard" | "hole-card" | "ocr" => Ok(StrategyKind::Holecard),
            "ono" | "one-n-one" => Ok(StrategyKind::OneNOne),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// How three card poker resolves a rank range whose ranks disagree.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum RangePolicy {
    /// Conditional EV over every dealer hand consistent with the range.
    #[default]
    Expectation,
    /// Call only when every rank in the range calls.
    Minimax,
}

impl fmt::Display for RangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangePolicy::Expectation => f.write_str("expectation"),
            RangePolicy::Minimax => f.write_str("minimax"),
        }
    }
}

impl FromStr for RangePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expectation" | "ev" => Ok(RangePolicy::Expectation),
            "minimax" | "worst-case" => Ok(RangePolicy::Minimax),
            _ => Err(ConfigError::UnknownStrategy(format!("range policy '{}'", s))),
        }
    }
}

/// Builds the strategy of `kind` for the variant of `rules`.
///
/// # Errors
///
/// [`ConfigError::UnknownStrategy`] when `kind` has no meaning for the
/// variant (one 'n' one is a hold'em technique).
///
/// # Example
///
/// ```rust
/// use holecard_engine::game::{GameRules, Variant};
/// use holecard_strategy::{create_strategy, RangePolicy, StrategyKind};
///
/// let rules = GameRules::standard(Variant::UltimateHoldem);
/// let s = create_strategy(&rules, StrategyKind::Basic, RangePolicy::default()).unwrap();
/// assert_eq!(s.name(), "basic");
///
/// let ocp = GameRules::standard(Variant::ThreeCardPoker);
/// assert!(create_strategy(&ocp, StrategyKind::OneNOne, RangePolicy::default()).is_err());
/// ```
pub fn create_strategy(
    rules: &GameRules,
    kind: StrategyKind,
    policy: RangePolicy,
) -> Result<Box<dyn Strategy>, ConfigError> {
    let strategy: Box<dyn Strategy> = match (rules.variant(), kind) {
        (Variant::ThreeCardPoker, StrategyKind::Basic) => {
            Box::new(three_card::ThreeCardBasic::new(rules.clone()))
        }
        (Variant::ThreeCardPoker, StrategyKind::Holecard) => {
            Box::new(three_card::ThreeCardHolecard::new(rules.clone(), policy))
        }
        (Variant::ThreeCardPoker, StrategyKind::OneNOne) => {
            return Err(ConfigError::UnknownStrategy(format!(
                "{} is not defined for {}",
                kind,
                rules.variant()
            )));
        }
        (Variant::UltimateHoldem, StrategyKind::Basic) => {
            Box::new(holdem::HoldemBasic::new(rules.clone()))
        }
        (Variant::UltimateHoldem, StrategyKind::Holecard | StrategyKind::OneNOne) => {
            Box::new(holdem::HoldemHolecard::new(rules.clone()))
        }
    };
    Ok(strategy)
}
