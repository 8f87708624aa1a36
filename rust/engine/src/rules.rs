use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::StateError;
use crate::game::Variant;

/// Decision points. Three card poker has a single one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    Decision,
    Preflop,
    Flop,
    River,
}

impl Street {
    /// Streets of `variant` in play order.
    pub fn sequence(variant: Variant) -> &'static [Street] {
        match variant {
            Variant::ThreeCardPoker => &[Street::Decision],
            Variant::UltimateHoldem => &[Street::Preflop, Street::Flop, Street::River],
        }
    }

    /// Board cards visible to the player on this street.
    pub fn board_len(self) -> usize {
        match self {
            Street::Decision | Street::Preflop => 0,
            Street::Flop => 3,
            Street::River => 5,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::Decision => "decision",
            Street::Preflop => "pre-flop",
            Street::Flop => "flop",
            Street::River => "river",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet4x,
    Bet2x,
    Bet1x,
}

impl Action {
    /// Play bet placed by this action, in antes.
    pub fn stake(self) -> u8 {
        match self {
            Action::Fold | Action::Check => 0,
            Action::Call | Action::Bet1x => 1,
            Action::Bet2x => 2,
            Action::Bet4x => 4,
        }
    }

    /// True when the action ends the player's decisions for the hand.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Action::Check)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Fold => "fold",
            Action::Check => "check",
            Action::Call => "call",
            Action::Bet4x => "bet 4x",
            Action::Bet2x => "bet 2x",
            Action::Bet1x => "bet 1x",
        };
        f.write_str(s)
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(' ', "").as_str() {
            "fold" | "f" => Ok(Action::Fold),
            "check" | "x" => Ok(Action::Check),
            "call" | "c" => Ok(Action::Call),
            "bet4x" | "4x" | "4" | "raise" => Ok(Action::Bet4x),
            "bet2x" | "2x" | "2" => Ok(Action::Bet2x),
            "bet1x" | "1x" | "1" => Ok(Action::Bet1x),
            other => Err(format!("unknown action '{}'", other)),
        }
    }
}

/// Legal actions at one decision point, cheapest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpace {
    street: Street,
    actions: Vec<Action>,
}

impl ActionSpace {
    pub fn for_street(variant: Variant, street: Street) -> Result<Self, StateError> {
        let actions = match (variant, street) {
            (Variant::ThreeCardPoker, Street::Decision) => vec![Action::Fold, Action::Call],
            (Variant::UltimateHoldem, Street::Preflop) => vec![Action::Check, Action::Bet4x],
            (Variant::UltimateHoldem, Street::Flop) => vec![Action::Check, Action::Bet2x],
            (Variant::UltimateHoldem, Street::River) => vec![Action::Fold, Action::Bet1x],
            _ => return Err(StateError::InvalidStreet { variant, street }),
        };
        Ok(Self { street, actions })
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn contains(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    /// Action putting the most money in play; `None` for an empty space.
    pub fn max_stake(&self) -> Option<Action> {
        self.actions
            .iter()
            .copied()
            .reduce(|best, a| if a.stake() > best.stake() { a } else { best })
    }

    /// Action putting the least money in play; the first listed on ties.
    pub fn min_cost(&self) -> Option<Action> {
        self.actions
            .iter()
            .copied()
            .reduce(|best, a| if a.stake() < best.stake() { a } else { best })
    }
}

/// Validates that an action is legal at the current decision point.
///
/// Strategies compute actions on their own; this is the check between their
/// output and the game's state machine. A failure means a strategy and game
/// configuration disagree, never a recoverable condition.
///
/// # Arguments
///
/// * `space` - Legal actions for the current street
/// * `action` - Action to validate
///
/// # Returns
///
/// * `Ok(action)` - The action, unchanged
/// * `Err(StateError::IllegalAction)` - The action is not in `space`
///
/// # Examples
///
/// ```rust
/// use holecard_engine::game::Variant;
/// use holecard_engine::rules::{validate_action, Action, ActionSpace, Street};
///
/// let space = ActionSpace::for_street(Variant::UltimateHoldem, Street::Flop).unwrap();
/// assert_eq!(validate_action(&space, Action::Bet2x), Ok(Action::Bet2x));
/// assert!(validate_action(&space, Action::Bet4x).is_err());
/// ```
pub fn validate_action(space: &ActionSpace, action: Action) -> Result<Action, StateError> {
    if space.contains(action) {
        Ok(action)
    } else {
        Err(StateError::IllegalAction {
            action,
            street: space.street,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_of_a_deserialized_empty_space_are_none() {
        let space: ActionSpace =
            serde_json::from_str(r#"{"street":"river","actions":[]}"#).unwrap();
        assert_eq!(space.max_stake(), None);
        assert_eq!(space.min_cost(), None);
    }

    #[test]
    fn extremes_follow_stake() {
        let river = ActionSpace::for_street(Variant::UltimateHoldem, Street::River).unwrap();
        assert_eq!(river.max_stake(), Some(Action::Bet1x));
        assert_eq!(river.min_cost(), Some(Action::Fold));
        let pre = ActionSpace::for_street(Variant::UltimateHoldem, Street::Preflop).unwrap();
        assert_eq!(pre.max_stake(), Some(Action::Bet4x));
        assert_eq!(pre.min_cost(), Some(Action::Check));
    }

    #[test]
    fn holdem_bet_sizes_shrink_by_street() {
        let stakes: Vec<u8> = Street::sequence(Variant::UltimateHoldem)
            .iter()
            .map(|&s| {
                ActionSpace::for_street(Variant::UltimateHoldem, s)
                    .unwrap()
                    .max_stake()
                    .unwrap()
                    .stake()
            })
            .collect();
        assert_eq!(stakes, vec![4, 2, 1]);
    }

    #[test]
    fn three_card_has_no_flop() {
        assert_eq!(
            ActionSpace::for_street(Variant::ThreeCardPoker, Street::Flop),
            Err(StateError::InvalidStreet {
                variant: Variant::ThreeCardPoker,
                street: Street::Flop
            })
        );
    }

    #[test]
    fn parses_practice_shorthand() {
        assert_eq!("4x".parse::<Action>(), Ok(Action::Bet4x));
        assert_eq!("Bet 2x".parse::<Action>(), Ok(Action::Bet2x));
        assert_eq!("x".parse::<Action>(), Ok(Action::Check));
        assert!("shove".parse::<Action>().is_err());
    }
}
