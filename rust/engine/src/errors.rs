use thiserror::Error;

use crate::cards::Card;
use crate::game::Variant;
use crate::hand::Category;
use crate::payout::BetType;
use crate::rules::{Action, Street};

/// Setup-time failures. Never produced once a run has started.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown game variant: {0}")]
    UnknownVariant(String),
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
    #[error("Payout table has no {bet:?} entry for {category:?}")]
    UnknownCategory { category: Category, bet: BetType },
    #[error("Malformed payout table: {0}")]
    MalformedPayoutTable(String),
    #[error("Invalid hole information for {variant}: {reason}")]
    InvalidHoleInfo { variant: Variant, reason: String },
    #[error("Invalid run plan: {0}")]
    InvalidPlan(String),
}

/// Broken invariants inside a trial. Any of these invalidates the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Duplicate card {0} in shoe")]
    DuplicateCard(Card),
    #[error("Cannot exclude {0} cards from a 52-card shoe")]
    TooManyExcluded(usize),
    #[error("Insufficient cards: requested {requested}, remaining {remaining}")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("Card {0} is not in the shoe")]
    CardNotInShoe(Card),
    #[error("Action {action:?} is not legal on street {street:?}")]
    IllegalAction { action: Action, street: Street },
    #[error("Street {street:?} does not exist in {variant}")]
    InvalidStreet { variant: Variant, street: Street },
    #[error("Hand is already settled")]
    HandSettled,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    State(#[from] StateError),
}

impl GameError {
    pub fn is_config(&self) -> bool {
        matches!(self, GameError::Config(_))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid card text: {0:?}")]
pub struct ParseCardError(pub String);
