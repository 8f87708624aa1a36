//! Payout tables: multiplier per (hand category, bet type) for one variant.
//!
//! Ante and play bets are listed per category like the bonus bets so that a
//! table can be fully described by data. Tables are validated once, when a
//! [`GameRules`](crate::game::GameRules) is built; lookups after that cannot
//! fail for categories the variant's ranker produces.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::game::Variant;
use crate::hand::Category;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetType {
    Ante,
    Play,
    Blind,
    AnteBonus,
}

impl BetType {
    /// Bets placed in `variant`.
    pub fn for_variant(variant: Variant) -> &'static [BetType] {
        match variant {
            Variant::ThreeCardPoker => &[BetType::Ante, BetType::Play, BetType::AnteBonus],
            Variant::UltimateHoldem => &[BetType::Ante, BetType::Play, BetType::Blind],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoutRule {
    pub category: Category,
    pub bet: BetType,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutTable {
    pub variant: Variant,
    /// Three card poker only: pay the ante bonus even when the hand loses.
    #[serde(default = "default_true")]
    pub ante_bonus_on_loss: bool,
    pub rules: Vec<PayoutRule>,
}

fn default_true() -> bool {
    true
}

impl PayoutTable {
    /// Standard table: ante bonus 1/4/5 for three card poker, blind 1/1.5/3/10/50/500 for hold'em.
    pub fn standard(variant: Variant) -> Self {
        let mut rules = Vec::new();
        for &category in variant.categories() {
            for &bet in BetType::for_variant(variant) {
                let multiplier = match bet {
                    BetType::Ante | BetType::Play => 1.0,
                    BetType::AnteBonus => match category {
                        Category::Straight => 1.0,
                        Category::ThreeOfAKind => 4.0,
                        Category::StraightFlush => 5.0,
                        _ => 0.0,
                    },
                    BetType::Blind => match category {
                        Category::Straight => 1.0,
                        Category::Flush => 1.5,
                        Category::FullHouse => 3.0,
                        Category::FourOfAKind => 10.0,
                        Category::StraightFlush => 50.0,
                        Category::RoyalFlush => 500.0,
                        _ => 0.0,
                    },
                };
                rules.push(PayoutRule {
                    category,
                    bet,
                    multiplier,
                });
            }
        }
        Self {
            variant,
            ante_bonus_on_loss: true,
            rules,
        }
    }

    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let table: PayoutTable = serde_json::from_str(s)
            .map_err(|e| ConfigError::MalformedPayoutTable(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    pub fn payout(&self, category: Category, bet: BetType) -> Result<f64, ConfigError> {
        self.rules
            .iter()
            .find(|r| r.category == category && r.bet == bet)
            .map(|r| r.multiplier)
            .ok_or(ConfigError::UnknownCategory { category, bet })
    }

    /// Replaces (or adds) one multiplier.
    pub fn set(&mut self, category: Category, bet: BetType, multiplier: f64) {
        match self
            .rules
            .iter_mut()
            .find(|r| r.category == category && r.bet == bet)
        {
            Some(rule) => rule.multiplier = multiplier,
            None => self.rules.push(PayoutRule {
                category,
                bet,
                multiplier,
            }),
        }
    }

    /// Every category the variant produces must be priced for every bet it uses,
    /// exactly once, with a finite non-negative multiplier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for rule in &self.rules {
            if !rule.multiplier.is_finite() || rule.multiplier < 0.0 {
                return Err(ConfigError::MalformedPayoutTable(format!(
                    "{:?}/{:?} multiplier {} must be finite and non-negative",
                    rule.category, rule.bet, rule.multiplier
                )));
            }
            if !BetType::for_variant(self.variant).contains(&rule.bet) {
                return Err(ConfigError::MalformedPayoutTable(format!(
                    "{:?} is not a bet in {}",
                    rule.bet, self.variant
                )));
            }
        }
        for &category in self.variant.categories() {
            for &bet in BetType::for_variant(self.variant) {
                let n = self
                    .rules
                    .iter()
                    .filter(|r| r.category == category && r.bet == bet)
                    .count();
                match n {
                    0 => return Err(ConfigError::UnknownCategory { category, bet }),
                    1 => {}
                    _ => {
                        return Err(ConfigError::MalformedPayoutTable(format!(
                            "{:?}/{:?} listed {} times",
                            category, bet, n
                        )))
                    }
                }
            }
        }
        Ok(())
    }
}
