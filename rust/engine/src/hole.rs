//! What the player knows about the dealer's hidden cards.
//!
//! [`HoleInfo`] is the knowledge itself, handed to strategies inside an
//! observation. [`Granularity`] is the configuration choosing which
//! `HoleInfo` the simulator reveals from the dealer's actual cards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, RankSet};
use crate::errors::ConfigError;
use crate::game::Variant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HoleInfo {
    Unknown,
    /// The dealer's first card.
    ExactCard(Card),
    /// Rank of the dealer's first card.
    ExactRank(Rank),
    /// The dealer's first card has one of these ranks.
    RankRange(RankSet),
    /// Every dealer card.
    FullHand(Vec<Card>),
}

impl HoleInfo {
    /// Cards this information pins down. They must be out of the draw pool.
    pub fn known_cards(&self) -> &[Card] {
        match self {
            HoleInfo::ExactCard(c) => std::slice::from_ref(c),
            HoleInfo::FullHand(cards) => cards,
            _ => &[],
        }
    }

    pub fn validate_for(&self, variant: Variant) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidHoleInfo {
            variant,
            reason: reason.to_string(),
        };
        match (variant, self) {
            (Variant::UltimateHoldem, HoleInfo::ExactRank(_) | HoleInfo::RankRange(_)) => {
                Err(invalid("rank-level information is not supported"))
            }
            (_, HoleInfo::RankRange(set)) if set.is_empty() => Err(invalid("empty rank range")),
            (_, HoleInfo::FullHand(cards)) if cards.len() != variant.dealer_cards() => {
                Err(invalid(&format!(
                    "full hand needs {} cards, got {}",
                    variant.dealer_cards(),
                    cards.len()
                )))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for HoleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoleInfo::Unknown => write!(f, "unknown"),
            HoleInfo::ExactCard(c) => write!(f, "{}", c),
            HoleInfo::ExactRank(r) => write!(f, "{}x", r),
            HoleInfo::RankRange(set) => write!(f, "[{}]", set),
            HoleInfo::FullHand(cards) => {
                let s: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
                write!(f, "{}", s.join(" "))
            }
        }
    }
}

/// How much of the dealer's hand the simulator reveals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    None,
    ExactCard,
    ExactRank,
    /// A partition of the ranks; the band holding the first card is revealed.
    Bands(Vec<RankSet>),
    Full,
}

impl Granularity {
    /// Low cards versus queen or better.
    pub fn default_bands() -> Self {
        Granularity::Bands(vec![
            RankSet::range(Rank::Two, Rank::Jack),
            RankSet::range(Rank::Queen, Rank::Ace),
        ])
    }

    pub fn validate_for(&self, variant: Variant) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidHoleInfo { variant, reason };
        match self {
            Granularity::ExactRank | Granularity::Bands(_)
                if variant == Variant::UltimateHoldem =>
            {
                Err(invalid(format!("granularity '{}' is not supported", self)))
            }
            Granularity::Bands(bands) => {
                let mut seen = RankSet::new();
                for band in bands {
                    if band.is_empty() || seen.intersects(*band) {
                        return Err(invalid(format!("bands '{}' overlap or are empty", self)));
                    }
                    seen = seen.union(*band);
                }
                if seen != RankSet::full() {
                    return Err(invalid(format!("bands '{}' do not cover every rank", self)));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Builds the information revealed about `dealer`.
    pub fn reveal(&self, dealer: &[Card]) -> HoleInfo {
        let first = match dealer.first() {
            Some(c) => *c,
            None => return HoleInfo::Unknown,
        };
        match self {
            Granularity::None => HoleInfo::Unknown,
            Granularity::ExactCard => HoleInfo::ExactCard(first),
            Granularity::ExactRank => HoleInfo::ExactRank(first.rank),
            Granularity::Bands(bands) => bands
                .iter()
                .find(|b| b.contains(first.rank))
                .map(|b| HoleInfo::RankRange(*b))
                .unwrap_or(HoleInfo::Unknown),
            Granularity::Full => HoleInfo::FullHand(dealer.to_vec()),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::None => write!(f, "none"),
            Granularity::ExactCard => write!(f, "card"),
            Granularity::ExactRank => write!(f, "rank"),
            Granularity::Bands(bands) => {
                let s: Vec<String> = bands.iter().map(|b| b.to_string()).collect();
                write!(f, "bands:{}", s.join("/"))
            }
            Granularity::Full => write!(f, "full"),
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    /// `none`, `card`, `rank`, `full`, `bands` or `bands:2-J/Q-A`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        match t.as_str() {
            "none" | "unknown" => return Ok(Granularity::None),
            "card" | "exact-card" => return Ok(Granularity::ExactCard),
            "rank" | "exact-rank" => return Ok(Granularity::ExactRank),
            "full" | "full-hand" => return Ok(Granularity::Full),
            "bands" => return Ok(Granularity::default_bands()),
            _ => {}
        }
        let spec = t
            .strip_prefix("bands:")
            .ok_or_else(|| format!("unknown hole granularity '{}'", s))?;
        let bands = spec
            .split('/')
            .map(|b| b.to_ascii_uppercase().parse::<RankSet>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?;
        Ok(Granularity::Bands(bands))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn bands_reveal_the_containing_band() {
        let g: Granularity = "bands:2-J/Q-A".parse().unwrap();
        assert_eq!(g, Granularity::default_bands());
        g.validate_for(Variant::ThreeCardPoker).unwrap();
        let dealer = parse_cards("Kd 4c 9s").unwrap();
        assert_eq!(
            g.reveal(&dealer),
            HoleInfo::RankRange(RankSet::range(Rank::Queen, Rank::Ace))
        );
    }

    #[test]
    fn overlapping_bands_are_rejected() {
        let g: Granularity = "bands:2-Q/Q-A".parse().unwrap();
        assert!(g.validate_for(Variant::ThreeCardPoker).is_err());
        let gap: Granularity = "bands:2-9/Q-A".parse().unwrap();
        assert!(gap.validate_for(Variant::ThreeCardPoker).is_err());
    }

    #[test]
    fn holdem_rejects_rank_information() {
        assert!(Granularity::ExactRank
            .validate_for(Variant::UltimateHoldem)
            .is_err());
        assert!(HoleInfo::RankRange(RankSet::full())
            .validate_for(Variant::UltimateHoldem)
            .is_err());
        assert!(HoleInfo::ExactCard("As".parse().unwrap())
            .validate_for(Variant::UltimateHoldem)
            .is_ok());
    }
}
